//! Domain layer for provider-orchestra
//!
//! This crate contains the core aggregation rules, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consensus
//!
//! One parallel round of provider responses is grouped by lexical similarity.
//! The largest group wins and its first member becomes the answer.
//!
//! ## Debate
//!
//! Several sequential rounds. Every provider sees a digest of the previous
//! round before answering again, until the average pairwise similarity
//! reaches a threshold or the round budget runs out.

pub mod config;
pub mod consensus;
pub mod core;
pub mod debate;
pub mod event;

// Re-export commonly used types
pub use config::{
    DEFAULT_CONSENSUS_THRESHOLD, DEFAULT_MAX_DEBATE_ROUNDS, FALLBACK_PROVIDER, OrchestraConfig,
    ProviderConfig, ProviderKind, validate_threshold,
};
pub use consensus::{
    ConsensusMetadata, ConsensusMode, ConsensusResult, ResponseGroup, SIMILARITY_THRESHOLD,
    TokenSet, aggregate_responses, group_responses, group_responses_by, jaccard_similarity,
    majority_group,
};
pub use core::{
    error::DomainError,
    response::{Response, TokenUsage},
    stream::StreamEvent,
};
pub use debate::{DebateResult, DebateRound, augment_prompt, pairwise_agreement};
pub use event::OrchestraEvent;
