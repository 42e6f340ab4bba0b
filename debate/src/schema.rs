//! Response-schema contract — shape validation at the reasoning-client
//! boundary.
//!
//! One validator per stage, dispatching on the run variant. Every payload
//! crosses exactly one of these functions before anything downstream sees
//! it, so the typed entities in `transcript` never hold malformed data.
//!
//! Shape table (stage × variant):
//!
//! ```text
//!            vanilla        irac           hybrid
//! opening    free-form      IRAC block     IRAC block
//! rebuttal   free-form      critique       free-form
//! decision   4-label set    + synthesis    2-position, winner-bound
//! ```
//!
//! The hybrid winner/decision consistency rule is not a shape concern and
//! lives in the judge.

use serde_json::Value;
use thiserror::Error;

use crate::config::DebateVariant;
use crate::transcript::{
    IracArgument, IracCritique, IracSynthesis, JudgeDecision, OpeningArgument, Position, Rebuttal,
    Winner,
};

/// Which phase produced the payload being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStage {
    Opening,
    Rebuttal,
    Decision,
}

impl std::fmt::Display for ResponseStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opening => write!(f, "opening"),
            Self::Rebuttal => write!(f, "rebuttal"),
            Self::Decision => write!(f, "decision"),
        }
    }
}

/// Structured output missing a required field, or a field of invalid shape,
/// for the current stage/variant. Never retried; aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {stage} response ({variant}): {reason}")]
pub struct SchemaError {
    pub stage: ResponseStage,
    pub variant: DebateVariant,
    pub reason: String,
}

impl SchemaError {
    fn new(stage: ResponseStage, variant: DebateVariant, reason: impl Into<String>) -> Self {
        Self {
            stage,
            variant,
            reason: reason.into(),
        }
    }
}

/// Validate an opening payload into its typed form.
pub fn validate_opening(
    variant: DebateVariant,
    value: &Value,
) -> Result<OpeningArgument, SchemaError> {
    let stage = ResponseStage::Opening;
    let position = require_position(value, stage, variant)?;
    let citations = string_seq(value.get("citations"));

    if variant.irac_opening() {
        let block = value
            .get("irac")
            .ok_or_else(|| SchemaError::new(stage, variant, "missing field `irac`"))?;
        let irac = require_irac_block(block, stage, variant)?;
        Ok(OpeningArgument::Irac {
            position,
            irac,
            citations,
        })
    } else {
        let argument = require_text(value, "argument", stage, variant)?;
        Ok(OpeningArgument::Vanilla {
            position,
            argument,
            citations,
        })
    }
}

/// Validate a rebuttal payload into its typed form.
pub fn validate_rebuttal(variant: DebateVariant, value: &Value) -> Result<Rebuttal, SchemaError> {
    let stage = ResponseStage::Rebuttal;
    let citations = string_seq(value.get("citations"));

    if variant.irac_rebuttal() {
        let rebuttal = value
            .get("rebuttal")
            .ok_or_else(|| SchemaError::new(stage, variant, "missing field `rebuttal`"))?;
        let critique = require_critique_block(rebuttal, stage, variant)?;
        Ok(Rebuttal::Irac {
            rebuttal: critique,
            citations,
        })
    } else {
        let rebuttal = require_text(value, "rebuttal", stage, variant)?;
        Ok(Rebuttal::Vanilla {
            rebuttal,
            counterarguments: string_seq(value.get("counterarguments")),
            citations,
        })
    }
}

/// Validate a decision payload into its typed form.
///
/// Shape only — the hybrid winner/decision consistency check happens in the
/// judge, after this succeeds.
pub fn validate_decision(
    variant: DebateVariant,
    value: &Value,
) -> Result<JudgeDecision, SchemaError> {
    let stage = ResponseStage::Decision;
    let decision = require_decision_label(value, stage, variant)?;
    let winner = require_winner(value, stage, variant)?;
    let rationale = optional_text(value, "rationale");

    match variant {
        DebateVariant::Vanilla => Ok(JudgeDecision::Vanilla {
            rationale,
            winner,
            decision,
            synthesis: optional_text(value, "synthesis"),
        }),
        DebateVariant::Irac => {
            let synthesis = value
                .get("synthesis")
                .ok_or_else(|| SchemaError::new(stage, variant, "missing field `synthesis`"))?;
            let block = require_synthesis_block(synthesis, stage, variant)?;
            Ok(JudgeDecision::Irac {
                rationale,
                winner,
                decision,
                synthesis: block,
            })
        }
        DebateVariant::Hybrid => Ok(JudgeDecision::Hybrid {
            winner,
            decision,
            rationale,
            synthesis: optional_text(value, "synthesis"),
        }),
    }
}

fn require_position(
    value: &Value,
    stage: ResponseStage,
    variant: DebateVariant,
) -> Result<Position, SchemaError> {
    let raw = value
        .get("position")
        .ok_or_else(|| SchemaError::new(stage, variant, "missing field `position`"))?;
    let raw = raw
        .as_str()
        .ok_or_else(|| SchemaError::new(stage, variant, "field `position` is not text"))?;
    Position::parse(raw).ok_or_else(|| {
        SchemaError::new(
            stage,
            variant,
            format!("position {:?} is not one of A, B, C, D", raw),
        )
    })
}

fn require_decision_label(
    value: &Value,
    stage: ResponseStage,
    variant: DebateVariant,
) -> Result<Position, SchemaError> {
    let raw = value
        .get("decision")
        .ok_or_else(|| SchemaError::new(stage, variant, "missing field `decision`"))?;
    let raw = raw
        .as_str()
        .ok_or_else(|| SchemaError::new(stage, variant, "field `decision` is not text"))?;
    Position::parse(raw).ok_or_else(|| {
        SchemaError::new(
            stage,
            variant,
            format!("decision {:?} is not one of A, B, C, D", raw),
        )
    })
}

fn require_winner(
    value: &Value,
    stage: ResponseStage,
    variant: DebateVariant,
) -> Result<Winner, SchemaError> {
    let raw = value
        .get("winner")
        .ok_or_else(|| SchemaError::new(stage, variant, "missing field `winner`"))?;
    let raw = raw
        .as_str()
        .ok_or_else(|| SchemaError::new(stage, variant, "field `winner` is not text"))?;
    let winner = Winner::parse(raw).ok_or_else(|| {
        SchemaError::new(stage, variant, format!("unrecognized winner {:?}", raw))
    })?;
    // The hybrid protocol forces the judge to pick a side.
    if variant == DebateVariant::Hybrid && winner == Winner::Tie {
        return Err(SchemaError::new(
            stage,
            variant,
            "hybrid decisions must name debater_x or debater_y as winner",
        ));
    }
    Ok(winner)
}

fn require_text(
    value: &Value,
    field: &str,
    stage: ResponseStage,
    variant: DebateVariant,
) -> Result<String, SchemaError> {
    let raw = value
        .get(field)
        .ok_or_else(|| SchemaError::new(stage, variant, format!("missing field `{}`", field)))?;
    raw.as_str().map(str::to_string).ok_or_else(|| {
        SchemaError::new(stage, variant, format!("field `{}` is not text", field))
    })
}

/// A required sub-component of a nested block. Keys must exist; text may be
/// empty.
fn component(
    block: &Value,
    key: &str,
    label: &str,
    stage: ResponseStage,
    variant: DebateVariant,
) -> Result<String, SchemaError> {
    let raw = block.get(key).ok_or_else(|| {
        SchemaError::new(stage, variant, format!("missing {} component `{}`", label, key))
    })?;
    raw.as_str().map(str::to_string).ok_or_else(|| {
        SchemaError::new(
            stage,
            variant,
            format!("{} component `{}` is not text", label, key),
        )
    })
}

fn require_irac_block(
    value: &Value,
    stage: ResponseStage,
    variant: DebateVariant,
) -> Result<IracArgument, SchemaError> {
    Ok(IracArgument {
        issue: component(value, "issue", "IRAC", stage, variant)?,
        rule: component(value, "rule", "IRAC", stage, variant)?,
        application: component(value, "application", "IRAC", stage, variant)?,
        conclusion: component(value, "conclusion", "IRAC", stage, variant)?,
    })
}

fn require_critique_block(
    value: &Value,
    stage: ResponseStage,
    variant: DebateVariant,
) -> Result<IracCritique, SchemaError> {
    Ok(IracCritique {
        issue_critique: component(value, "issue_critique", "rebuttal", stage, variant)?,
        rule_critique: component(value, "rule_critique", "rebuttal", stage, variant)?,
        application_critique: component(value, "application_critique", "rebuttal", stage, variant)?,
        my_reinforcement: component(value, "my_reinforcement", "rebuttal", stage, variant)?,
    })
}

fn require_synthesis_block(
    value: &Value,
    stage: ResponseStage,
    variant: DebateVariant,
) -> Result<IracSynthesis, SchemaError> {
    Ok(IracSynthesis {
        issue: component(value, "issue", "synthesis", stage, variant)?,
        rule: component(value, "rule", "synthesis", stage, variant)?,
        application: component(value, "application", "synthesis", stage, variant)?,
        conclusion: component(value, "conclusion", "synthesis", stage, variant)?,
    })
}

fn optional_text(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn string_seq(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
