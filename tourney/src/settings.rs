//! Engine settings.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How a knockout match that ends level is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnockoutTiePolicy {
    /// The home competitor advances
    #[default]
    Home,
    /// The score is refused; a decisive result must be entered
    Reject,
}

impl fmt::Display for KnockoutTiePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnockoutTiePolicy::Home => write!(f, "home"),
            KnockoutTiePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for KnockoutTiePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(KnockoutTiePolicy::Home),
            "reject" => Ok(KnockoutTiePolicy::Reject),
            other => Err(format!("unknown tie policy '{other}'")),
        }
    }
}

/// Points awarded per league result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsTable {
    /// Points for a win
    pub win: u32,
    /// Points for a draw (each side)
    pub draw: u32,
    /// Points for a loss
    pub loss: u32,
}

impl Default for PointsTable {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Knockout draw resolution
    pub tie_policy: KnockoutTiePolicy,
    /// League points
    pub points: PointsTable,
}

impl EngineSettings {
    /// Settings with the given tie policy and default points
    pub fn with_tie_policy(mut self, tie_policy: KnockoutTiePolicy) -> Self {
        self.tie_policy = tie_policy;
        self
    }

    /// Settings with the given points table
    pub fn with_points(mut self, points: PointsTable) -> Self {
        self.points = points;
        self
    }
}
