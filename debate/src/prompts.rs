//! Prompt templates — one builder per stage × variant combination.
//!
//! Nine distinct templates: opening and rebuttal for the vanilla and IRAC
//! shapes (hybrid runs reuse the IRAC opening and the vanilla rebuttal),
//! plus three judge-decision templates. The protocol core depends only on
//! these signatures; the text itself is data.

use crate::config::DebateVariant;
use crate::transcript::{Choices, DebateTranscript, DebaterSide, OpeningArgument, Position};

/// Question text with its dataset context prepended, when present.
fn full_question(question: &str, context: &str) -> String {
    if context.is_empty() {
        question.to_string()
    } else {
        format!("{}\n\n{}", context, question)
    }
}

/// Opening-argument prompt for a debater.
pub fn opening_prompt(
    variant: DebateVariant,
    question: &str,
    context: &str,
    choices: &Choices,
    assigned: Option<Position>,
) -> String {
    if variant.irac_opening() {
        irac_opening_prompt(question, context, choices, assigned)
    } else {
        vanilla_opening_prompt(question, context, choices, assigned)
    }
}

fn vanilla_opening_prompt(
    question: &str,
    context: &str,
    choices: &Choices,
    assigned: Option<Position>,
) -> String {
    let full_question = full_question(question, context);
    let choices_text = choices.as_prompt_block();

    match assigned {
        None => format!(
            r#"You are a legal expert participating in a debate.

{full_question}

Answer choices:
{choices_text}

Your task:
1. Analyze the question and select which answer choice you believe is most legally correct
2. Argue convincingly for that choice
3. Cite relevant legal authorities (statutes, cases, legal doctrines)

Respond in JSON format:
{{
  "position": "A, B, C, or D (your selected answer)",
  "argument": "Your detailed legal argument here...",
  "citations": ["Citation 1", "Citation 2", "..."]
}}"#
        ),
        Some(position) => format!(
            r#"You are a legal expert participating in a debate.

{full_question}

Answer choices:
{choices_text}

Your task: Argue convincingly that answer choice {position} is the legally correct answer.
Cite relevant legal authorities (statutes, cases, legal doctrines).

Respond in JSON format:
{{
  "position": "{position}",
  "argument": "Your detailed legal argument here...",
  "citations": ["Citation 1", "Citation 2", "..."]
}}"#
        ),
    }
}

fn irac_opening_prompt(
    question: &str,
    context: &str,
    choices: &Choices,
    assigned: Option<Position>,
) -> String {
    let full_question = full_question(question, context);
    let choices_text = choices.as_prompt_block();

    match assigned {
        None => format!(
            r#"You are a legal expert participating in a debate.

{full_question}

Answer choices:
{choices_text}

Your task:
1. Analyze the question and select which answer choice you believe is most legally correct
2. Structure your argument using IRAC methodology (Issue, Rule, Application, Conclusion)
3. Cite relevant legal authorities

Respond in JSON format using IRAC structure:
{{
  "position": "A, B, C, or D (your selected answer)",
  "irac": {{
    "issue": "Identify the key legal issue at the heart of the scenario",
    "rule": "Detail the specific laws or legal principles that govern the identified issue",
    "application": "Examine how the laws or principles apply to the facts of the case, discussing the legal merits based on this application",
    "conclusion": "Conclude by synthesizing the analysis to state why your chosen answer is correct"
  }},
  "citations": ["Citation 1", "Citation 2", "..."]
}}"#
        ),
        Some(position) => format!(
            r#"You are a legal expert participating in a debate.

{full_question}

Answer choices:
{choices_text}

Your task: Argue convincingly that answer choice {position} is the legally correct answer.
Structure your argument using IRAC methodology (Issue, Rule, Application, Conclusion).
Cite relevant legal authorities.

Respond in JSON format using IRAC structure:
{{
  "position": "{position}",
  "irac": {{
    "issue": "Identify the key legal issue at the heart of the scenario",
    "rule": "Detail the specific laws or legal principles that govern the identified issue",
    "application": "Examine how the laws or principles apply to the facts of the case, discussing the legal merits based on this application",
    "conclusion": "Conclude by synthesizing the analysis to state why {position} is correct"
  }},
  "citations": ["Citation 1", "Citation 2", "..."]
}}"#
        ),
    }
}

/// Rebuttal prompt for a debater, referencing the opponent's opening.
pub fn rebuttal_prompt(
    variant: DebateVariant,
    question: &str,
    context: &str,
    my_position: Position,
    my_opening: &OpeningArgument,
    opponent_opening: &OpeningArgument,
) -> String {
    if variant.irac_rebuttal() {
        irac_rebuttal_prompt(question, context, my_position, opponent_opening)
    } else {
        vanilla_rebuttal_prompt(question, context, my_position, my_opening, opponent_opening)
    }
}

fn vanilla_rebuttal_prompt(
    question: &str,
    context: &str,
    my_position: Position,
    my_opening: &OpeningArgument,
    opponent_opening: &OpeningArgument,
) -> String {
    let full_question = full_question(question, context);
    let my_argument = my_opening.argument_text();
    let opponent_position = opponent_opening.position();
    let opponent_argument = opponent_opening.argument_text();

    format!(
        r#"You are continuing your legal debate.

Question:
{full_question}

Your previous argument (defending {my_position}):
{my_argument}

Opponent's argument (defending {opponent_position}):
{opponent_argument}

Your task:
1. Identify weaknesses in opponent's argument
2. Explain why your position ({my_position}) is legally superior
3. Reinforce your argument with additional legal reasoning

Respond in JSON format:
{{
  "rebuttal": "Your rebuttal argument here...",
  "counterarguments": ["Point against opponent 1", "Point against opponent 2"],
  "citations": ["Additional citation 1", "..."]
}}"#
    )
}

fn irac_rebuttal_prompt(
    question: &str,
    context: &str,
    my_position: Position,
    opponent_opening: &OpeningArgument,
) -> String {
    let full_question = full_question(question, context);
    let opponent_position = opponent_opening.position();
    let irac = opponent_opening.irac().cloned().unwrap_or_default();

    format!(
        r#"You are continuing your legal debate.

Question:
{full_question}

Your position: {my_position}

Opponent's position: {opponent_position}
Opponent's IRAC argument:
- Issue: {issue}
- Rule: {rule}
- Application: {application}
- Conclusion: {conclusion}

Your task: Critique opponent's IRAC argument and reinforce why your position ({my_position}) is legally superior.

Respond in JSON format with structured critique:
{{
  "rebuttal": {{
    "issue_critique": "Explain if opponent misidentified the legal issue or missed key aspects",
    "rule_critique": "Explain if opponent's legal rule is incorrect, incomplete, or misapplied",
    "application_critique": "Explain flaws in how opponent applied the rule to the facts",
    "my_reinforcement": "Reinforce why your IRAC analysis is superior and leads to the correct answer"
  }},
  "citations": ["Additional citation 1", "..."]
}}"#,
        issue = irac.issue,
        rule = irac.rule,
        application = irac.application,
        conclusion = irac.conclusion,
    )
}

/// Judge-decision prompt over a complete transcript.
pub fn judge_prompt(
    variant: DebateVariant,
    question: &str,
    context: &str,
    choices: &Choices,
    transcript: &DebateTranscript,
) -> String {
    match variant {
        DebateVariant::Vanilla => vanilla_judge_prompt(question, context, choices, transcript),
        DebateVariant::Irac => irac_judge_prompt(question, context, choices, transcript),
        DebateVariant::Hybrid => hybrid_judge_prompt(question, context, choices, transcript),
    }
}

fn rebuttal_text_of(transcript: &DebateTranscript, side: DebaterSide) -> &str {
    transcript
        .entry(side)
        .rebuttal
        .as_ref()
        .map(|r| r.rebuttal_text())
        .unwrap_or("")
}

fn vanilla_judge_prompt(
    question: &str,
    context: &str,
    choices: &Choices,
    transcript: &DebateTranscript,
) -> String {
    let full_question = full_question(question, context);
    let choices_text = choices.as_prompt_block();
    let x_position = transcript.position_of(DebaterSide::DebaterX);
    let y_position = transcript.position_of(DebaterSide::DebaterY);
    let x_argument = transcript.debater_x.opening.argument_text();
    let y_argument = transcript.debater_y.opening.argument_text();
    let x_rebuttal = rebuttal_text_of(transcript, DebaterSide::DebaterX);
    let y_rebuttal = rebuttal_text_of(transcript, DebaterSide::DebaterY);

    format!(
        r#"You are an impartial legal judge reviewing a debate between two legal experts.

Question:
{full_question}

Answer choices:
{choices_text}

Debater X (defending {x_position}):
Opening argument: {x_argument}
Rebuttal: {x_rebuttal}

Debater Y (defending {y_position}):
Opening argument: {y_argument}
Rebuttal: {y_rebuttal}

Your task: Based on the legal arguments presented, select the most legally correct answer choice.
Consider:
- Accuracy of legal reasoning
- Quality and relevance of citations
- Strength of application to the facts
- How well each side addressed counterarguments

Respond in JSON format with 4 fields:
{{
  "rationale": "Concise analysis of the key points from each debater's arguments, identifying strengths and weaknesses of each position...",
  "winner": "debater_x, debater_y, or tie (which debater presented the stronger legal argument overall)",
  "decision": "A, B, C, or D (the legally correct answer)",
  "synthesis": "Your final explanation of why this is the legally correct answer, applying relevant legal principles and addressing the key issues in the question..."
}}"#
    )
}

fn irac_lines(opening: &OpeningArgument) -> String {
    let irac = opening.irac().cloned().unwrap_or_default();
    format!(
        "- Issue: {}\n- Rule: {}\n- Application: {}\n- Conclusion: {}",
        irac.issue, irac.rule, irac.application, irac.conclusion
    )
}

fn irac_judge_prompt(
    question: &str,
    context: &str,
    choices: &Choices,
    transcript: &DebateTranscript,
) -> String {
    let full_question = full_question(question, context);
    let choices_text = choices.as_prompt_block();
    let x_position = transcript.position_of(DebaterSide::DebaterX);
    let y_position = transcript.position_of(DebaterSide::DebaterY);
    let x_irac = irac_lines(&transcript.debater_x.opening);
    let y_irac = irac_lines(&transcript.debater_y.opening);
    // IRAC rebuttals are structured; render them as JSON for the judge.
    let x_rebuttal = transcript
        .debater_x
        .rebuttal
        .as_ref()
        .and_then(|r| serde_json::to_string(r).ok())
        .unwrap_or_default();
    let y_rebuttal = transcript
        .debater_y
        .rebuttal
        .as_ref()
        .and_then(|r| serde_json::to_string(r).ok())
        .unwrap_or_default();

    format!(
        r#"You are an impartial legal judge reviewing a debate between two legal experts.

Question:
{full_question}

Answer choices:
{choices_text}

Debater X (defending {x_position}):
IRAC Analysis:
{x_irac}
Rebuttal critique: {x_rebuttal}

Debater Y (defending {y_position}):
IRAC Analysis:
{y_irac}
Rebuttal critique: {y_rebuttal}

Your task: Based on the IRAC arguments presented, select the most legally correct answer choice.
Evaluate each debater's IRAC components for accuracy and completeness.

Respond in JSON format:
{{
  "rationale": "Compare both debaters' IRAC analyses, identifying which correctly identified the issue, applied the right rule, and reached the correct conclusion",
  "winner": "debater_x, debater_y, or tie (which debater's IRAC analysis was more legally sound)",
  "decision": "A, B, C, or D (the legally correct answer)",
  "synthesis": {{
    "issue": "The key legal issue in this scenario",
    "rule": "The correct legal principle(s) that govern this issue",
    "application": "How the rule applies to these specific facts",
    "conclusion": "Why [decision] is the legally correct answer"
  }}
}}"#
    )
}

fn irac_tagged(opening: &OpeningArgument) -> String {
    let irac = opening.irac().cloned().unwrap_or_default();
    format!(
        "<issue>{}</issue>\n<rule>{}</rule>\n<application>{}</application>\n<conclusion>{}</conclusion>",
        irac.issue, irac.rule, irac.application, irac.conclusion
    )
}

fn hybrid_judge_prompt(
    question: &str,
    context: &str,
    choices: &Choices,
    transcript: &DebateTranscript,
) -> String {
    let full_question = full_question(question, context);
    let choices_text = choices.as_prompt_block();
    let x_position = transcript.position_of(DebaterSide::DebaterX);
    let y_position = transcript.position_of(DebaterSide::DebaterY);
    let x_irac = irac_tagged(&transcript.debater_x.opening);
    let y_irac = irac_tagged(&transcript.debater_y.opening);
    let x_rebuttal = rebuttal_text_of(transcript, DebaterSide::DebaterX);
    let y_rebuttal = rebuttal_text_of(transcript, DebaterSide::DebaterY);

    format!(
        r#"You are an impartial legal judge. Determine which debater presented the stronger argument.

Question: {full_question}

Choices: {choices_text}

ROUND 1 - Opening Arguments:

Debater X (answer {x_position}):
{x_irac}

Debater Y (answer {y_position}):
{y_irac}

ROUND 2 - Rebuttals:

Debater X: {x_rebuttal}

Debater Y: {y_rebuttal}

IMPORTANT: You must judge which debater won. Your decision MUST be either {x_position} (if debater_x won) OR {y_position} (if debater_y won). You CANNOT choose any other answer.

Respond in JSON:
{{
  "winner": "debater_x or debater_y",
  "decision": "{x_position} or {y_position} only - must match your winner",
  "rationale": "Why this debater's argument was legally stronger",
  "synthesis": "Your final explanation of why this is the legally correct answer, applying relevant legal principles and addressing the key issues in the question"
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{DebaterEntry, IracArgument, Rebuttal};

    fn choices() -> Choices {
        Choices::from(["one", "two", "three", "four"])
    }

    fn vanilla_transcript() -> DebateTranscript {
        DebateTranscript {
            debater_x: DebaterEntry {
                opening: OpeningArgument::Vanilla {
                    position: Position::A,
                    argument: "x opening".to_string(),
                    citations: vec![],
                },
                rebuttal: Some(Rebuttal::Vanilla {
                    rebuttal: "x rebuttal".to_string(),
                    counterarguments: vec![],
                    citations: vec![],
                }),
            },
            debater_y: DebaterEntry {
                opening: OpeningArgument::Vanilla {
                    position: Position::B,
                    argument: "y opening".to_string(),
                    citations: vec![],
                },
                rebuttal: None,
            },
        }
    }

    fn irac_transcript() -> DebateTranscript {
        let irac = IracArgument {
            issue: "the issue".to_string(),
            rule: "the rule".to_string(),
            application: "the application".to_string(),
            conclusion: "the conclusion".to_string(),
        };
        DebateTranscript {
            debater_x: DebaterEntry {
                opening: OpeningArgument::Irac {
                    position: Position::A,
                    irac: irac.clone(),
                    citations: vec![],
                },
                rebuttal: Some(Rebuttal::Vanilla {
                    rebuttal: "x hybrid rebuttal".to_string(),
                    counterarguments: vec![],
                    citations: vec![],
                }),
            },
            debater_y: DebaterEntry {
                opening: OpeningArgument::Irac {
                    position: Position::B,
                    irac,
                    citations: vec![],
                },
                rebuttal: None,
            },
        }
    }

    #[test]
    fn test_free_choice_opening_lists_all_labels() {
        let prompt = opening_prompt(DebateVariant::Vanilla, "Q?", "", &choices(), None);
        assert!(prompt.contains("select which answer choice"));
        assert!(prompt.contains("A) one"));
        assert!(prompt.contains("D) four"));
    }

    #[test]
    fn test_assigned_opening_names_the_position() {
        for position in Position::ALL {
            let prompt =
                opening_prompt(DebateVariant::Vanilla, "Q?", "", &choices(), Some(position));
            assert!(prompt.contains(&format!(
                "answer choice {} is the legally correct answer",
                position
            )));
            assert!(prompt.contains(&format!("\"position\": \"{}\"", position)));
        }
    }

    #[test]
    fn test_context_is_prepended() {
        let prompt = opening_prompt(
            DebateVariant::Vanilla,
            "Q?",
            "Background facts.",
            &choices(),
            None,
        );
        assert!(prompt.contains("Background facts.\n\nQ?"));
    }

    #[test]
    fn test_irac_opening_asks_for_structure() {
        let prompt = opening_prompt(DebateVariant::Irac, "Q?", "", &choices(), Some(Position::B));
        assert!(prompt.contains("IRAC methodology"));
        assert!(prompt.contains("\"irac\""));
    }

    #[test]
    fn test_hybrid_opening_uses_irac_template() {
        let prompt = opening_prompt(DebateVariant::Hybrid, "Q?", "", &choices(), None);
        assert!(prompt.contains("IRAC methodology"));
    }

    #[test]
    fn test_vanilla_rebuttal_quotes_both_sides() {
        let transcript = vanilla_transcript();
        let prompt = rebuttal_prompt(
            DebateVariant::Vanilla,
            "Q?",
            "",
            Position::A,
            &transcript.debater_x.opening,
            &transcript.debater_y.opening,
        );
        assert!(prompt.contains("x opening"));
        assert!(prompt.contains("y opening"));
        assert!(prompt.contains("defending B"));
    }

    #[test]
    fn test_irac_rebuttal_quotes_opponent_components() {
        let transcript = irac_transcript();
        let prompt = rebuttal_prompt(
            DebateVariant::Irac,
            "Q?",
            "",
            Position::A,
            &transcript.debater_x.opening,
            &transcript.debater_y.opening,
        );
        assert!(prompt.contains("- Issue: the issue"));
        assert!(prompt.contains("issue_critique"));
    }

    #[test]
    fn test_vanilla_judge_prompt_structure() {
        let prompt = judge_prompt(
            DebateVariant::Vanilla,
            "Q?",
            "",
            &choices(),
            &vanilla_transcript(),
        );
        assert!(prompt.contains("Debater X (defending A)"));
        assert!(prompt.contains("Debater Y (defending B)"));
        assert!(prompt.contains("\"winner\": \"debater_x, debater_y, or tie"));
    }

    #[test]
    fn test_hybrid_judge_prompt_restricts_choices() {
        let prompt = judge_prompt(
            DebateVariant::Hybrid,
            "Q?",
            "",
            &choices(),
            &irac_transcript(),
        );
        assert!(prompt.contains("MUST be either A (if debater_x won) OR B (if debater_y won)"));
        assert!(prompt.contains("<issue>the issue</issue>"));
        assert!(prompt.contains("x hybrid rebuttal"));
    }

    #[test]
    fn test_missing_rebuttal_reads_as_empty() {
        let prompt = judge_prompt(
            DebateVariant::Vanilla,
            "Q?",
            "",
            &choices(),
            &vanilla_transcript(),
        );
        assert!(prompt.contains("Debater Y (defending B):\nOpening argument: y opening\nRebuttal: \n"));
    }
}
