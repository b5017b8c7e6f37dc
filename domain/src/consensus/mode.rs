//! Consensus mode selection.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Requested aggregation mode.
///
/// Only [`ConsensusMode::Majority`] changes behavior today. The other modes
/// are accepted so callers can already express intent; they aggregate with
/// the lexical majority rule as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusMode {
    #[default]
    Majority,
    Weighted,
    Hierarchical,
}

impl ConsensusMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusMode::Majority => "majority",
            ConsensusMode::Weighted => "weighted",
            ConsensusMode::Hierarchical => "hierarchical",
        }
    }
}

impl std::fmt::Display for ConsensusMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConsensusMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "majority" => Ok(ConsensusMode::Majority),
            "weighted" => Ok(ConsensusMode::Weighted),
            "hierarchical" => Ok(ConsensusMode::Hierarchical),
            other => Err(format!("unknown consensus mode: {}", other)),
        }
    }
}
