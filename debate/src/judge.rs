//! Judge participant — consumes a complete transcript and emits a
//! schema-valid, internally consistent decision.
//!
//! The judge owns no state across calls: every decision is a pure function
//! of its transcript input and the collaborator's response.

use std::sync::Arc;

use tracing::info;

use crate::client::ReasoningClient;
use crate::config::DebateVariant;
use crate::error::DebateError;
use crate::prompts;
use crate::schema;
use crate::transcript::{Choices, DebateTranscript, JudgeDecision};

/// Judge agent synthesizing a debate into a final decision.
pub struct Judge {
    client: Arc<dyn ReasoningClient>,
}

impl Judge {
    pub fn new(client: Arc<dyn ReasoningClient>) -> Self {
        Self { client }
    }

    /// Produce a decision over a completed transcript.
    ///
    /// Schema validation depends on the variant; the hybrid variant
    /// additionally requires that `decision` equal the position defended by
    /// the declared winner — the one place unstructured model output is
    /// reconciled against a hard logical invariant. Vanilla and IRAC
    /// variants validate the decision label against the closed four-label
    /// set and perform no winner cross-check.
    pub async fn decide(
        &self,
        question: &str,
        context: &str,
        choices: &Choices,
        transcript: &DebateTranscript,
        variant: DebateVariant,
        max_output_tokens: u32,
    ) -> Result<JudgeDecision, DebateError> {
        let prompt = prompts::judge_prompt(variant, question, context, choices, transcript);
        let value = self
            .client
            .generate_structured(&prompt, max_output_tokens)
            .await?;
        let decision = schema::validate_decision(variant, &value)?;

        if variant == DebateVariant::Hybrid {
            check_winner_consistency(&decision, transcript)?;
        }

        info!(
            variant = %variant,
            winner = %decision.winner(),
            decision = %decision.decision(),
            "decision validated"
        );

        Ok(decision)
    }
}

/// Hybrid-variant consistency rule: the chosen answer must be the position
/// the winning side defended.
fn check_winner_consistency(
    decision: &JudgeDecision,
    transcript: &DebateTranscript,
) -> Result<(), DebateError> {
    let winner = decision.winner();
    // Hybrid schema validation already rejects ties, so a side is present.
    let Some(side) = winner.side() else {
        return Ok(());
    };
    let position = transcript.position_of(side);
    if decision.decision() != position {
        return Err(DebateError::Consistency {
            winner,
            decision: decision.decision(),
            position,
        });
    }
    Ok(())
}
