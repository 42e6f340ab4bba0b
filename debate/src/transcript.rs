//! Typed debate entities — positions, arguments, rebuttals, transcripts,
//! and judge decisions.
//!
//! Each inter-phase payload is a sum type with one case per structural
//! variant; validation happens once at the reasoning-client boundary
//! (`schema`), so everything in here is already well-formed.

use serde::{Deserialize, Serialize};

/// Answer-choice label a debater defends. Closed four-label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    A,
    B,
    C,
    D,
}

impl Position {
    /// All four labels, in choice order.
    pub const ALL: [Position; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// The bare letter for this label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    /// Label for a zero-based choice index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse a label, rejecting anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid position label: {:?}", s))
    }
}

/// Which side of the debate a participant argues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebaterSide {
    DebaterX,
    DebaterY,
}

impl DebaterSide {
    /// The opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Self::DebaterX => Self::DebaterY,
            Self::DebaterY => Self::DebaterX,
        }
    }
}

impl std::fmt::Display for DebaterSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DebaterX => write!(f, "debater_x"),
            Self::DebaterY => write!(f, "debater_y"),
        }
    }
}

/// Who the judge declares the stronger side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    DebaterX,
    DebaterY,
    Tie,
}

impl Winner {
    /// The debater side this winner names, if it names one.
    pub fn side(self) -> Option<DebaterSide> {
        match self {
            Self::DebaterX => Some(DebaterSide::DebaterX),
            Self::DebaterY => Some(DebaterSide::DebaterY),
            Self::Tie => None,
        }
    }

    /// Parse a winner token as emitted by the judge.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "debater_x" => Some(Self::DebaterX),
            "debater_y" => Some(Self::DebaterY),
            "tie" => Some(Self::Tie),
            _ => None,
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DebaterX => write!(f, "debater_x"),
            Self::DebaterY => write!(f, "debater_y"),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// Exactly four answer-option texts, in A..D order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choices(pub [String; 4]);

impl Choices {
    /// Build from four option texts.
    pub fn new(options: [String; 4]) -> Self {
        Self(options)
    }

    /// Iterate (label, option text) pairs in order.
    pub fn labelled(&self) -> impl Iterator<Item = (Position, &str)> {
        Position::ALL
            .iter()
            .copied()
            .zip(self.0.iter().map(String::as_str))
    }

    /// Render the "A) ..." block used in every prompt.
    pub fn as_prompt_block(&self) -> String {
        self.labelled()
            .map(|(label, text)| format!("{}) {}", label, text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<[&str; 4]> for Choices {
    fn from(options: [&str; 4]) -> Self {
        Self(options.map(str::to_string))
    }
}

/// Issue–Rule–Application–Conclusion argument structure.
///
/// All four keys must exist in the wire payload; their text may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IracArgument {
    pub issue: String,
    pub rule: String,
    pub application: String,
    pub conclusion: String,
}

/// A debater's opening argument, in one of the two structural shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpeningArgument {
    /// IRAC-structured opening.
    Irac {
        position: Position,
        irac: IracArgument,
        citations: Vec<String>,
    },
    /// Free-form opening.
    Vanilla {
        position: Position,
        argument: String,
        citations: Vec<String>,
    },
}

impl OpeningArgument {
    /// The position this opening defends. Always present, by construction.
    pub fn position(&self) -> Position {
        match self {
            Self::Vanilla { position, .. } | Self::Irac { position, .. } => *position,
        }
    }

    /// Citations attached to the opening.
    pub fn citations(&self) -> &[String] {
        match self {
            Self::Vanilla { citations, .. } | Self::Irac { citations, .. } => citations,
        }
    }

    /// The IRAC block, when this opening has one.
    pub fn irac(&self) -> Option<&IracArgument> {
        match self {
            Self::Irac { irac, .. } => Some(irac),
            Self::Vanilla { .. } => None,
        }
    }

    /// The free-form argument text, empty for IRAC openings.
    pub fn argument_text(&self) -> &str {
        match self {
            Self::Vanilla { argument, .. } => argument,
            Self::Irac { .. } => "",
        }
    }
}

/// Structured critique of an opponent's IRAC opening.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IracCritique {
    pub issue_critique: String,
    pub rule_critique: String,
    pub application_critique: String,
    pub my_reinforcement: String,
}

/// A debater's rebuttal, in one of the two structural shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rebuttal {
    /// Structured critique of an IRAC opening.
    Irac {
        rebuttal: IracCritique,
        citations: Vec<String>,
    },
    /// Free-form rebuttal.
    Vanilla {
        rebuttal: String,
        counterarguments: Vec<String>,
        citations: Vec<String>,
    },
}

impl Rebuttal {
    /// Citations attached to the rebuttal.
    pub fn citations(&self) -> &[String] {
        match self {
            Self::Vanilla { citations, .. } | Self::Irac { citations, .. } => citations,
        }
    }

    /// Free-form rebuttal text, empty for IRAC critiques.
    pub fn rebuttal_text(&self) -> &str {
        match self {
            Self::Vanilla { rebuttal, .. } => rebuttal,
            Self::Irac { .. } => "",
        }
    }
}

/// One side's recorded contribution to a debate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebaterEntry {
    pub opening: OpeningArgument,
    /// A missing rebuttal is missing content, not an error, at the judge
    /// layer.
    pub rebuttal: Option<Rebuttal>,
}

/// The complete recorded exchange for one debate run.
///
/// Built incrementally by the orchestrator; handed to the judge by shared
/// reference, so it cannot change once judging begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateTranscript {
    pub debater_x: DebaterEntry,
    pub debater_y: DebaterEntry,
}

impl DebateTranscript {
    /// The entry for one side.
    pub fn entry(&self, side: DebaterSide) -> &DebaterEntry {
        match side {
            DebaterSide::DebaterX => &self.debater_x,
            DebaterSide::DebaterY => &self.debater_y,
        }
    }

    /// The position a side's opening defends.
    pub fn position_of(&self, side: DebaterSide) -> Position {
        self.entry(side).opening.position()
    }
}

/// Judge's IRAC-structured synthesis of the debate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IracSynthesis {
    pub issue: String,
    pub rule: String,
    pub application: String,
    pub conclusion: String,
}

/// The judge's final decision, in one of the three structural shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JudgeDecision {
    /// IRAC decision: structured synthesis.
    Irac {
        rationale: String,
        winner: Winner,
        decision: Position,
        synthesis: IracSynthesis,
    },
    /// Free-form decision.
    Vanilla {
        rationale: String,
        winner: Winner,
        decision: Position,
        synthesis: String,
    },
    /// Hybrid decision: the judge is restricted to the two defended
    /// positions, and `decision` must equal the declared winner's position.
    Hybrid {
        winner: Winner,
        decision: Position,
        rationale: String,
        synthesis: String,
    },
}

impl JudgeDecision {
    /// The chosen answer label.
    pub fn decision(&self) -> Position {
        match self {
            Self::Vanilla { decision, .. }
            | Self::Irac { decision, .. }
            | Self::Hybrid { decision, .. } => *decision,
        }
    }

    /// The declared winner.
    pub fn winner(&self) -> Winner {
        match self {
            Self::Vanilla { winner, .. }
            | Self::Irac { winner, .. }
            | Self::Hybrid { winner, .. } => *winner,
        }
    }

    /// The judge's rationale text.
    pub fn rationale(&self) -> &str {
        match self {
            Self::Vanilla { rationale, .. }
            | Self::Irac { rationale, .. }
            | Self::Hybrid { rationale, .. } => rationale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parse() {
        for label in Position::ALL {
            assert_eq!(Position::parse(label.as_str()), Some(label));
        }
        assert_eq!(Position::parse("E"), None);
        assert_eq!(Position::parse(""), None);
        assert_eq!(Position::parse(" B "), Some(Position::B));
    }

    #[test]
    fn test_position_from_index() {
        assert_eq!(Position::from_index(0), Some(Position::A));
        assert_eq!(Position::from_index(3), Some(Position::D));
        assert_eq!(Position::from_index(4), None);
    }

    #[test]
    fn test_position_serde_is_bare_letter() {
        let json = serde_json::to_string(&Position::C).unwrap();
        assert_eq!(json, "\"C\"");
        let parsed: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Position::C);
    }

    #[test]
    fn test_winner_parse() {
        assert_eq!(Winner::parse("debater_x"), Some(Winner::DebaterX));
        assert_eq!(Winner::parse("debater_y"), Some(Winner::DebaterY));
        assert_eq!(Winner::parse("tie"), Some(Winner::Tie));
        assert_eq!(Winner::parse("judge"), None);
    }

    #[test]
    fn test_winner_side() {
        assert_eq!(Winner::DebaterX.side(), Some(DebaterSide::DebaterX));
        assert_eq!(Winner::Tie.side(), None);
    }

    #[test]
    fn test_debater_side_display_and_opponent() {
        assert_eq!(DebaterSide::DebaterX.to_string(), "debater_x");
        assert_eq!(DebaterSide::DebaterY.to_string(), "debater_y");
        assert_eq!(DebaterSide::DebaterX.opponent(), DebaterSide::DebaterY);
    }

    #[test]
    fn test_choices_prompt_block() {
        let choices = Choices::from(["first", "second", "third", "fourth"]);
        let block = choices.as_prompt_block();
        assert_eq!(block, "A) first\nB) second\nC) third\nD) fourth");
    }

    #[test]
    fn test_opening_accessors() {
        let opening = OpeningArgument::Vanilla {
            position: Position::B,
            argument: "because".to_string(),
            citations: vec!["Art. 5, CF/88".to_string()],
        };
        assert_eq!(opening.position(), Position::B);
        assert_eq!(opening.argument_text(), "because");
        assert_eq!(opening.citations().len(), 1);
        assert!(opening.irac().is_none());
    }

    #[test]
    fn test_opening_serializes_to_wire_shape() {
        let opening = OpeningArgument::Irac {
            position: Position::A,
            irac: IracArgument {
                issue: "i".to_string(),
                rule: "r".to_string(),
                application: "a".to_string(),
                conclusion: "c".to_string(),
            },
            citations: vec![],
        };
        let value = serde_json::to_value(&opening).unwrap();
        assert_eq!(value["position"], "A");
        assert_eq!(value["irac"]["rule"], "r");
    }

    #[test]
    fn test_transcript_position_lookup() {
        let transcript = DebateTranscript {
            debater_x: DebaterEntry {
                opening: OpeningArgument::Vanilla {
                    position: Position::A,
                    argument: String::new(),
                    citations: vec![],
                },
                rebuttal: None,
            },
            debater_y: DebaterEntry {
                opening: OpeningArgument::Vanilla {
                    position: Position::B,
                    argument: String::new(),
                    citations: vec![],
                },
                rebuttal: None,
            },
        };
        assert_eq!(transcript.position_of(DebaterSide::DebaterX), Position::A);
        assert_eq!(transcript.position_of(DebaterSide::DebaterY), Position::B);
    }
}
