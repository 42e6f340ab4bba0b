//! Multi-agent debate protocol for multiple-choice legal questions.
//!
//! Two adversarial debaters argue for answer choices, then a judge
//! synthesizes their arguments into a final decision. The crate provides:
//!
//! - the orchestration state machine (`Init → XOpened → YOpened →
//!   XRebutted → YRebutted → Decided`),
//! - the response-schema contract for the three structural variants
//!   (vanilla, IRAC, hybrid), validated once at the reasoning-client
//!   boundary,
//! - the hybrid consistency rule tying the judge's decision to the
//!   declared winner's position.
//!
//! The reasoning collaborator is abstracted behind [`ReasoningClient`];
//! [`GroqClient`] is the production implementation. Independent runs share
//! no mutable state and may be scheduled concurrently by the caller.

#![allow(clippy::uninlined_format_args)]

pub mod client;
pub mod config;
pub mod debater;
pub mod error;
pub mod judge;
pub mod orchestrator;
pub mod prompts;
pub mod schema;
pub mod state;
pub mod transcript;

pub use client::{GenerationError, GroqClient, GroqConfig, ReasoningClient};
pub use config::{DebateConfig, DebateVariant, PositionPolicy, TokenLimits};
pub use debater::{Debater, DebaterState};
pub use error::DebateError;
pub use judge::Judge;
pub use orchestrator::{DebateOrchestrator, DebateOutcome};
pub use schema::{ResponseStage, SchemaError};
pub use state::{DebateRun, PhaseTransition, RunPhase, TransitionError};
pub use transcript::{
    Choices, DebateTranscript, DebaterEntry, DebaterSide, IracArgument, IracCritique,
    IracSynthesis, JudgeDecision, OpeningArgument, Position, Rebuttal, Winner,
};
