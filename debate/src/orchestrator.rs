//! Debate orchestrator — drives two debaters and a judge through the fixed
//! phase order and assembles the transcript.
//!
//! # Run flow
//!
//! ```text
//! Init → XOpened → YOpened → XRebutted → YRebutted → Decided
//!   │       │         │          │           │          │
//!   │   X.open     Y.open   X.rebut(Y)   Y.rebut(X)  Judge.decide
//!   └── any validation or generation failure aborts the run
//! ```
//!
//! Phases are strictly sequential: each later phase's prompt consumes the
//! previous phase's validated output. Independent runs share no mutable
//! state and may be scheduled concurrently by the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::client::ReasoningClient;
use crate::config::DebateConfig;
use crate::debater::Debater;
use crate::error::DebateError;
use crate::judge::Judge;
use crate::state::{DebateRun, RunPhase};
use crate::transcript::{Choices, DebateTranscript, DebaterEntry, JudgeDecision};

/// Result of a completed debate run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateOutcome {
    /// The complete recorded exchange.
    pub transcript: DebateTranscript,
    /// The judge's validated decision.
    pub decision: JudgeDecision,
    /// The run snapshot with its transition history.
    pub run: DebateRun,
}

/// Orchestrates one debate run at a time over a shared reasoning client.
///
/// Each `run_debate` call instantiates a fresh debater pair and judge, so
/// no state leaks between runs.
pub struct DebateOrchestrator {
    client: Arc<dyn ReasoningClient>,
    config: DebateConfig,
}

impl DebateOrchestrator {
    /// Create an orchestrator with the default (vanilla) config.
    pub fn new(client: Arc<dyn ReasoningClient>) -> Self {
        Self::with_config(client, DebateConfig::default())
    }

    /// Create an orchestrator with a custom config.
    pub fn with_config(client: Arc<dyn ReasoningClient>, config: DebateConfig) -> Self {
        Self { client, config }
    }

    /// The active configuration.
    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    /// Run one complete debate: both openings, both rebuttals, then the
    /// decision. Raises on any validation failure rather than returning a
    /// partial result.
    pub async fn run_debate(
        &self,
        question_id: &str,
        question: &str,
        context: &str,
        choices: &Choices,
    ) -> Result<DebateOutcome, DebateError> {
        let variant = self.config.variant;
        let limits = self.config.limits;
        let mut run = DebateRun::new(&Uuid::new_v4().to_string(), question_id);

        info!(
            run = %run.id,
            question = question_id,
            variant = %variant,
            "debate starting"
        );

        let mut debater_x = Debater::new(Arc::clone(&self.client), "debater_x");
        let mut debater_y = Debater::new(Arc::clone(&self.client), "debater_y");
        let judge = Judge::new(Arc::clone(&self.client));

        let x_opening = debater_x
            .open(
                question,
                context,
                choices,
                self.config.position_policy.assignment_for_x(),
                variant,
                limits.opening,
            )
            .await?;
        run.transition(RunPhase::XOpened, "debater_x opening validated")?;

        let y_opening = debater_y
            .open(
                question,
                context,
                choices,
                self.config.position_policy.assignment_for_y(),
                variant,
                limits.opening,
            )
            .await?;
        run.transition(RunPhase::YOpened, "debater_y opening validated")?;

        let x_rebuttal = debater_x
            .rebut(question, context, &y_opening, variant, limits.rebuttal)
            .await?;
        run.transition(RunPhase::XRebutted, "debater_x rebuttal validated")?;

        let y_rebuttal = debater_y
            .rebut(question, context, &x_opening, variant, limits.rebuttal)
            .await?;
        run.transition(RunPhase::YRebutted, "debater_y rebuttal validated")?;

        // Immutable once handed to the judge.
        let transcript = DebateTranscript {
            debater_x: DebaterEntry {
                opening: x_opening,
                rebuttal: Some(x_rebuttal),
            },
            debater_y: DebaterEntry {
                opening: y_opening,
                rebuttal: Some(y_rebuttal),
            },
        };

        let decision = judge
            .decide(question, context, choices, &transcript, variant, limits.decision)
            .await?;
        run.transition(RunPhase::Decided, "decision validated")?;

        info!(
            run = %run.id,
            winner = %decision.winner(),
            decision = %decision.decision(),
            "debate complete"
        );

        Ok(DebateOutcome {
            transcript,
            decision,
            run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use crate::client::GenerationError;
    use crate::config::{DebateVariant, PositionPolicy};
    use crate::transcript::{Position, Winner};

    struct ScriptedClient {
        responses: Mutex<VecDeque<Value>>,
    }

    impl ScriptedClient {
        fn new(responses: Vec<Value>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
            })
        }
    }

    #[async_trait]
    impl ReasoningClient for ScriptedClient {
        async fn generate_structured(
            &self,
            _prompt: &str,
            _max_output_tokens: u32,
        ) -> Result<Value, GenerationError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(GenerationError::MissingContent)
        }
    }

    fn choices() -> Choices {
        Choices::from(["X wins", "Y wins", "Z wins", "W wins"])
    }

    fn opening(position: &str) -> Value {
        json!({
            "position": position,
            "argument": format!("{} is correct", position),
            "citations": []
        })
    }

    fn rebuttal() -> Value {
        json!({ "rebuttal": "opponent errs", "counterarguments": [], "citations": [] })
    }

    #[tokio::test]
    async fn test_vanilla_run_end_to_end() {
        let client = ScriptedClient::new(vec![
            opening("A"),
            opening("B"),
            rebuttal(),
            rebuttal(),
            json!({
                "decision": "A",
                "winner": "debater_x",
                "rationale": "...",
                "synthesis": "..."
            }),
        ]);
        let orchestrator = DebateOrchestrator::new(client);
        let outcome = orchestrator
            .run_debate("q-1", "Who wins?", "", &choices())
            .await
            .unwrap();

        assert_eq!(outcome.decision.decision(), Position::A);
        assert_eq!(outcome.decision.winner(), Winner::DebaterX);
        assert_eq!(outcome.transcript.debater_x.opening.position(), Position::A);
        assert_eq!(outcome.transcript.debater_y.opening.position(), Position::B);
        assert!(outcome.transcript.debater_x.rebuttal.is_some());
        assert!(outcome.run.is_complete());
        assert_eq!(outcome.run.transitions.len(), 5);
    }

    #[tokio::test]
    async fn test_run_aborts_on_mid_phase_schema_error() {
        // Y's opening is malformed; the run must surface the error with no
        // partial result.
        let client = ScriptedClient::new(vec![opening("A"), json!({"argument": "no position"})]);
        let orchestrator = DebateOrchestrator::new(client);
        let err = orchestrator
            .run_debate("q-1", "Who wins?", "", &choices())
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::Schema(_)));
    }

    #[tokio::test]
    async fn test_run_aborts_on_generation_failure() {
        let client = ScriptedClient::new(vec![opening("A"), opening("B"), rebuttal()]);
        let orchestrator = DebateOrchestrator::new(client);
        let err = orchestrator
            .run_debate("q-1", "Who wins?", "", &choices())
            .await
            .unwrap_err();
        assert!(matches!(err, DebateError::Generation(_)));
    }

    #[tokio::test]
    async fn test_free_choice_policy_lets_both_sides_pick() {
        let client = ScriptedClient::new(vec![
            opening("C"),
            opening("C"),
            rebuttal(),
            rebuttal(),
            json!({
                "decision": "C",
                "winner": "tie",
                "rationale": "...",
                "synthesis": "..."
            }),
        ]);
        let config =
            DebateConfig::for_variant(DebateVariant::Vanilla).with_positions(PositionPolicy::FreeChoice);
        let orchestrator = DebateOrchestrator::with_config(client, config);
        let outcome = orchestrator
            .run_debate("q-1", "Who wins?", "", &choices())
            .await
            .unwrap();
        assert_eq!(outcome.transcript.debater_x.opening.position(), Position::C);
        assert_eq!(outcome.transcript.debater_y.opening.position(), Position::C);
    }
}
