//! Error taxonomy for a debate run.
//!
//! Every failure aborts the current run and surfaces to the caller; no
//! error is downgraded to a default value inside the core. The variants
//! stay distinct so callers can tell "the model judged incoherently"
//! (`Consistency`) from "the model's output was malformed" (`Schema`).

use thiserror::Error;

use crate::client::GenerationError;
use crate::schema::SchemaError;
use crate::state::TransitionError;
use crate::transcript::{Position, Winner};

/// Any failure that aborts a debate run.
#[derive(Debug, Error)]
pub enum DebateError {
    /// Structured output missing a required field or of invalid shape for
    /// the current phase/variant.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An operation was invoked before its precondition phase — an
    /// orchestration bug, not a data problem.
    #[error("{required} required before {operation}")]
    Sequence {
        operation: &'static str,
        required: &'static str,
    },

    /// Hybrid-variant decision disagrees with the declared winner's
    /// position.
    #[error("decision {decision} does not match winner {winner}'s position {position}")]
    Consistency {
        winner: Winner,
        decision: Position,
        position: Position,
    },

    /// Propagated unchanged from the reasoning collaborator.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Run state machine rejected a phase transition.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl DebateError {
    /// The sequencing failure for a rebuttal issued before any opening.
    pub fn opening_required() -> Self {
        Self::Sequence {
            operation: "rebuttal",
            required: "opening",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_display() {
        let err = DebateError::opening_required();
        assert_eq!(err.to_string(), "opening required before rebuttal");
    }

    #[test]
    fn test_consistency_display() {
        let err = DebateError::Consistency {
            winner: Winner::DebaterX,
            decision: Position::B,
            position: Position::A,
        };
        assert_eq!(
            err.to_string(),
            "decision B does not match winner debater_x's position A"
        );
    }

    #[test]
    fn test_generation_error_passes_through() {
        let err: DebateError = GenerationError::MissingContent.into();
        assert!(matches!(err, DebateError::Generation(_)));
        assert_eq!(err.to_string(), "response contained no content");
    }
}
