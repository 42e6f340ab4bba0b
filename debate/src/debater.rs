//! Debater participant — holds one side's argumentative state and produces
//! schema-valid opening and rebuttal content.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::ReasoningClient;
use crate::config::DebateVariant;
use crate::error::DebateError;
use crate::prompts;
use crate::schema;
use crate::transcript::{Choices, OpeningArgument, Position, Rebuttal};

/// A debater's argumentative state, produced by a validated opening.
///
/// Exists only after `open` succeeds; `rebut` reads it and the judge reads
/// it through the transcript. Nothing else mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebaterState {
    /// The position this side defends.
    pub position: Position,
    /// The validated opening argument.
    pub opening: OpeningArgument,
}

/// Debater agent arguing one side of a question.
pub struct Debater {
    client: Arc<dyn ReasoningClient>,
    name: String,
    state: Option<DebaterState>,
}

impl Debater {
    /// Create a debater with no state yet.
    pub fn new(client: Arc<dyn ReasoningClient>, name: &str) -> Self {
        Self {
            client,
            name: name.to_string(),
            state: None,
        }
    }

    /// The debater's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// This debater's state, once an opening has been produced.
    pub fn state(&self) -> Option<&DebaterState> {
        self.state.as_ref()
    }

    /// The position this debater defends, once chosen or assigned.
    pub fn position(&self) -> Option<Position> {
        self.state.as_ref().map(|s| s.position)
    }

    /// Generate and validate an opening argument, storing the resulting
    /// state.
    ///
    /// With `assigned = Some(label)` the debater defends that label; with
    /// `None` it selects freely.
    pub async fn open(
        &mut self,
        question: &str,
        context: &str,
        choices: &Choices,
        assigned: Option<Position>,
        variant: DebateVariant,
        max_output_tokens: u32,
    ) -> Result<OpeningArgument, DebateError> {
        let prompt = prompts::opening_prompt(variant, question, context, choices, assigned);
        let value = self
            .client
            .generate_structured(&prompt, max_output_tokens)
            .await?;
        let opening = schema::validate_opening(variant, &value)?;

        info!(
            debater = %self.name,
            variant = %variant,
            position = %opening.position(),
            citations = opening.citations().len(),
            "opening validated"
        );

        self.state = Some(DebaterState {
            position: opening.position(),
            opening: opening.clone(),
        });
        Ok(opening)
    }

    /// Generate and validate a rebuttal to the opponent's opening.
    ///
    /// Requires that this debater has already produced an opening; the
    /// opponent's opening is read-only prompt context.
    pub async fn rebut(
        &self,
        question: &str,
        context: &str,
        opponent_opening: &OpeningArgument,
        variant: DebateVariant,
        max_output_tokens: u32,
    ) -> Result<Rebuttal, DebateError> {
        let state = self.state.as_ref().ok_or_else(DebateError::opening_required)?;

        let prompt = prompts::rebuttal_prompt(
            variant,
            question,
            context,
            state.position,
            &state.opening,
            opponent_opening,
        );
        let value = self
            .client
            .generate_structured(&prompt, max_output_tokens)
            .await?;
        let rebuttal = schema::validate_rebuttal(variant, &value)?;

        info!(
            debater = %self.name,
            variant = %variant,
            citations = rebuttal.citations().len(),
            "rebuttal validated"
        );

        Ok(rebuttal)
    }
}
