//! Debate run state machine — phases, transitions, and run tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Phase of a single debate run.
///
/// The protocol is strictly linear: each phase is entered by exactly one
/// operation call and no phase may be skipped or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    /// Run created, no opening produced yet.
    Init,
    /// Debater X has produced its opening argument.
    XOpened,
    /// Debater Y has produced its opening argument.
    YOpened,
    /// Debater X has rebutted Y's opening.
    XRebutted,
    /// Debater Y has rebutted X's opening.
    YRebutted,
    /// Judge has produced a decision — run complete.
    Decided,
}

impl RunPhase {
    /// Whether this is the terminal phase.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Decided)
    }

    /// Valid transitions from this phase.
    pub fn valid_transitions(self) -> &'static [RunPhase] {
        match self {
            Self::Init => &[Self::XOpened],
            Self::XOpened => &[Self::YOpened],
            Self::YOpened => &[Self::XRebutted],
            Self::XRebutted => &[Self::YRebutted],
            Self::YRebutted => &[Self::Decided],
            Self::Decided => &[],
        }
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::XOpened => write!(f, "x_opened"),
            Self::YOpened => write!(f, "y_opened"),
            Self::XRebutted => write!(f, "x_rebutted"),
            Self::YRebutted => write!(f, "y_rebutted"),
            Self::Decided => write!(f, "decided"),
        }
    }
}

/// A phase transition record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// Previous phase.
    pub from: RunPhase,
    /// New phase.
    pub to: RunPhase,
    /// When the transition occurred.
    pub timestamp: DateTime<Utc>,
    /// What triggered the transition.
    pub reason: String,
}

/// Error for invalid state transitions.
///
/// Indicates an orchestration bug rather than a data problem; always fatal
/// to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionError {
    pub from: RunPhase,
    pub to: RunPhase,
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid transition {} → {} (allowed: {:?})",
            self.from,
            self.to,
            self.from.valid_transitions()
        )
    }
}

impl std::error::Error for TransitionError {}

/// A debate run tracking phase state and history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateRun {
    /// Unique run identifier.
    pub id: String,
    /// Identifier of the question being debated.
    pub question_id: String,
    /// Current phase.
    pub phase: RunPhase,
    /// Transition history.
    pub transitions: Vec<PhaseTransition>,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
}

impl DebateRun {
    /// Create a new run in the `Init` phase.
    pub fn new(id: &str, question_id: &str) -> Self {
        Self {
            id: id.to_string(),
            question_id: question_id.to_string(),
            phase: RunPhase::Init,
            transitions: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Transition to a new phase with a reason.
    pub fn transition(&mut self, to: RunPhase, reason: &str) -> Result<(), TransitionError> {
        if !self.phase.valid_transitions().contains(&to) {
            return Err(TransitionError {
                from: self.phase,
                to,
            });
        }

        self.transitions.push(PhaseTransition {
            from: self.phase,
            to,
            timestamp: Utc::now(),
            reason: reason.to_string(),
        });
        self.phase = to;
        Ok(())
    }

    /// Whether the run has produced its decision.
    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Compact status line.
    pub fn status_line(&self) -> String {
        format!(
            "[{}] {} transitions | question={}",
            self.phase,
            self.transitions.len(),
            self.question_id
        )
    }
}
