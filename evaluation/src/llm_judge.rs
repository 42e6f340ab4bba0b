//! LLM-graded rubric scoring for open-ended legal answers.
//!
//! Grades a candidate answer against a reference on three criteria:
//! legal correctness (0–4), reasoning quality (0–3), and citation accuracy
//! (0–4). Scores are clamped to their ranges and normalized against the
//! 11-point maximum. A failed grading call zero-fills rather than erroring
//! — this layer sits outside the debate core's abort-on-failure policy.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use debate::ReasoningClient;

const RUBRIC_MAX_TOKENS: u32 = 500;
const MAX_TOTAL: f64 = 11.0;

/// Rubric scores for one graded answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricScore {
    /// Legal correctness, 0–4.
    pub correctness: f64,
    /// Reasoning quality, 0–3.
    pub reasoning: f64,
    /// Citation accuracy and completeness, 0–4.
    pub citations: f64,
    /// Sum of the three criteria, 0–11.
    pub total: f64,
    /// `total / 11`.
    pub normalized: f64,
    /// Grader's brief explanation.
    pub justification: String,
}

impl RubricScore {
    fn zeroed(justification: &str) -> Self {
        Self {
            correctness: 0.0,
            reasoning: 0.0,
            citations: 0.0,
            total: 0.0,
            normalized: 0.0,
            justification: justification.to_string(),
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

fn score_field(value: &Value, field: &str) -> f64 {
    match value.get(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn rubric_prompt(question: &str, prediction: &str, reference: &str) -> String {
    format!(
        r#"You are an expert grader of bar-exam legal answers.

<task>
Evaluate the quality of a candidate legal answer against the official reference answer.
</task>

<question>
{question}
</question>

<reference_answer>
{reference}
</reference_answer>

<candidate_answer>
{prediction}
</candidate_answer>

<evaluation_criteria>
Grade the CANDIDATE ANSWER on the following criteria:

1. LEGAL CORRECTNESS (0-4 points):
   0 = Completely incorrect or irrelevant
   1 = Partially correct, with serious grounding errors
   2 = Correct but incomplete or superficial
   3 = Correct and complete
   4 = Correct, complete, and exceptionally well grounded

2. LEGAL REASONING (0-3 points):
   0 = No legal logic or incoherent reasoning
   1 = Basic reasoning present
   2 = Clear, structured reasoning
   3 = Excellent structured reasoning (e.g. IRAC or similar)

3. LEGAL CITATIONS (0-4 points):
   0 = No citations or entirely wrong citations
   1 = Correct statute or code but wrong article/provision
   2 = Cited an article close or related to the correct one
   3 = Correct article but missing complements (paragraphs, clauses)
   4 = Perfect and complete citation
</evaluation_criteria>

<instructions>
IMPORTANT:
- Compare the candidate answer carefully against the reference answer
- Be rigorous but fair
- Answers may be correct even when worded differently
- The justification must be objective and technical (two sentences at most)

Return ONLY valid JSON in the following format:
{{
    "correctness": <number from 0 to 4>,
    "reasoning": <number from 0 to 3>,
    "citations": <number from 0 to 4>,
    "justification": "<brief, objective explanation>"
}}
</instructions>"#
    )
}

/// Grade a candidate answer against a reference.
///
/// Empty inputs and generation failures yield a zero-filled score with an
/// explanatory justification.
pub async fn evaluate_with_llm_judge(
    client: &dyn ReasoningClient,
    question: &str,
    prediction: &str,
    reference: &str,
) -> RubricScore {
    if prediction.is_empty() || reference.is_empty() {
        return RubricScore::zeroed("Empty prediction or reference");
    }

    let prompt = rubric_prompt(question, prediction, reference);
    let value = match client.generate_structured(&prompt, RUBRIC_MAX_TOKENS).await {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "LLM-judge grading failed");
            return RubricScore::zeroed(&format!("Error: {}", e));
        }
    };

    let correctness = score_field(&value, "correctness").clamp(0.0, 4.0);
    let reasoning = score_field(&value, "reasoning").clamp(0.0, 3.0);
    let citations = score_field(&value, "citations").clamp(0.0, 4.0);
    let justification = value
        .get("justification")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let total = correctness + reasoning + citations;
    RubricScore {
        correctness: round2(correctness),
        reasoning: round2(reasoning),
        citations: round2(citations),
        total: round2(total),
        normalized: round4(total / MAX_TOTAL),
        justification,
    }
}
