//! Orchestration configuration
//!
//! [`OrchestraConfig`] is the static snapshot the facade holds for its
//! lifetime. Adding or removing providers at runtime mutates the registry,
//! never this snapshot.

pub mod orchestra_config;
pub mod provider_config;

pub use orchestra_config::{
    DEFAULT_CONSENSUS_THRESHOLD, DEFAULT_MAX_DEBATE_ROUNDS, FALLBACK_PROVIDER, OrchestraConfig,
    validate_threshold,
};
pub use provider_config::{ProviderConfig, ProviderKind};
