//! Lifecycle events published by the orchestration facade.
//!
//! Events are delivered synchronously, after the state change they
//! describe. They serialize with a `type` tag carrying the event name, which
//! is what the JSONL transcript writes.

use crate::consensus::ConsensusResult;
use crate::debate::{DebateResult, DebateRound};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum OrchestraEvent {
    /// Construction finished and every configured provider is registered
    #[serde(rename = "initialized")]
    Initialized {
        providers: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        default_provider: Option<String>,
    },

    #[serde(rename = "consensus:start")]
    ConsensusStart {
        prompt: String,
        /// Explicit provider selection, if the caller made one
        #[serde(skip_serializing_if = "Option::is_none")]
        providers: Option<Vec<String>>,
    },

    #[serde(rename = "consensus:complete")]
    ConsensusComplete { result: ConsensusResult },

    #[serde(rename = "debate:start")]
    DebateStart {
        prompt: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        providers: Option<Vec<String>>,
        threshold: f64,
        max_rounds: usize,
    },

    /// A round finished and was appended to the debate
    #[serde(rename = "debate:round")]
    DebateRound(DebateRound),

    #[serde(rename = "debate:complete")]
    DebateComplete { result: DebateResult },

    #[serde(rename = "provider:added")]
    ProviderAdded { name: String },

    #[serde(rename = "provider:removed")]
    ProviderRemoved { name: String },
}

impl OrchestraEvent {
    /// The event's wire name (e.g. `"debate:round"`).
    pub fn name(&self) -> &'static str {
        match self {
            OrchestraEvent::Initialized { .. } => "initialized",
            OrchestraEvent::ConsensusStart { .. } => "consensus:start",
            OrchestraEvent::ConsensusComplete { .. } => "consensus:complete",
            OrchestraEvent::DebateStart { .. } => "debate:start",
            OrchestraEvent::DebateRound(_) => "debate:round",
            OrchestraEvent::DebateComplete { .. } => "debate:complete",
            OrchestraEvent::ProviderAdded { .. } => "provider:added",
            OrchestraEvent::ProviderRemoved { .. } => "provider:removed",
        }
    }
}

impl std::fmt::Display for OrchestraEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
