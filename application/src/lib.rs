//! Application layer for provider-orchestra
//!
//! This crate contains the provider registry, use cases, port definitions,
//! and the [`Orchestra`] facade. It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod orchestra;
pub mod ports;
pub mod registry;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{ConsensusOptions, DebateOptions, QueryOptions};
pub use error::OrchestraError;
pub use orchestra::Orchestra;
pub use ports::{
    event_listener::{EventBus, EventListener, NoEvents},
    provider::{CompletionOptions, Provider, ProviderError, StreamHandle},
    provider_factory::ProviderFactory,
};
pub use registry::{Participant, ProviderRegistry};
pub use use_cases::build_consensus::{BuildConsensusInput, BuildConsensusUseCase};
pub use use_cases::run_debate::{RunDebateInput, RunDebateUseCase};
