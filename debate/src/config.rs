//! Run configuration — protocol variant, position policy, token limits.

use serde::{Deserialize, Serialize};

use crate::transcript::Position;

/// The structural protocol governing a debate run.
///
/// Hybrid runs use IRAC openings, vanilla rebuttals, and a decision that is
/// restricted to the two defended positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateVariant {
    /// Free-form arguments throughout.
    Vanilla,
    /// IRAC-structured arguments throughout.
    Irac,
    /// IRAC openings, free-form rebuttals, winner-constrained decision.
    Hybrid,
}

impl DebateVariant {
    /// Whether openings under this variant carry an IRAC block.
    pub fn irac_opening(self) -> bool {
        matches!(self, Self::Irac | Self::Hybrid)
    }

    /// Whether rebuttals under this variant carry a structured critique.
    pub fn irac_rebuttal(self) -> bool {
        matches!(self, Self::Irac)
    }
}

impl std::fmt::Display for DebateVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Vanilla => write!(f, "vanilla"),
            Self::Irac => write!(f, "irac"),
            Self::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl std::str::FromStr for DebateVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vanilla" => Ok(Self::Vanilla),
            "irac" => Ok(Self::Irac),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(format!("unknown debate variant: {:?}", other)),
        }
    }
}

/// How debaters receive their positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionPolicy {
    /// Each side defends a fixed label.
    Assigned {
        debater_x: Position,
        debater_y: Position,
    },
    /// Each side selects its own label.
    FreeChoice,
}

impl PositionPolicy {
    /// The label assigned to a side, if any.
    pub fn assignment_for_x(self) -> Option<Position> {
        match self {
            Self::Assigned { debater_x, .. } => Some(debater_x),
            Self::FreeChoice => None,
        }
    }

    /// The label assigned to the other side, if any.
    pub fn assignment_for_y(self) -> Option<Position> {
        match self {
            Self::Assigned { debater_y, .. } => Some(debater_y),
            Self::FreeChoice => None,
        }
    }
}

impl Default for PositionPolicy {
    fn default() -> Self {
        // The adversarial A-vs-B pairing used by the experiments.
        Self::Assigned {
            debater_x: Position::A,
            debater_y: Position::B,
        }
    }
}

/// Per-phase output-token budgets for the reasoning client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLimits {
    pub opening: u32,
    pub rebuttal: u32,
    pub decision: u32,
}

impl TokenLimits {
    /// Budgets matching each variant's response shape.
    pub fn for_variant(variant: DebateVariant) -> Self {
        match variant {
            DebateVariant::Vanilla => Self {
                opening: 750,
                rebuttal: 650,
                decision: 800,
            },
            DebateVariant::Irac => Self {
                opening: 900,
                rebuttal: 700,
                decision: 1000,
            },
            DebateVariant::Hybrid => Self {
                opening: 900,
                rebuttal: 650,
                decision: 1000,
            },
        }
    }
}

/// Configuration for one debate run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebateConfig {
    /// Structural variant for every phase of the run.
    pub variant: DebateVariant,
    /// How debaters receive positions.
    pub position_policy: PositionPolicy,
    /// Per-phase output budgets.
    pub limits: TokenLimits,
}

impl DebateConfig {
    /// Config for a variant with that variant's default budgets.
    pub fn for_variant(variant: DebateVariant) -> Self {
        Self {
            variant,
            position_policy: PositionPolicy::default(),
            limits: TokenLimits::for_variant(variant),
        }
    }

    /// Replace the position policy.
    pub fn with_positions(mut self, policy: PositionPolicy) -> Self {
        self.position_policy = policy;
        self
    }
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self::for_variant(DebateVariant::Vanilla)
    }
}
