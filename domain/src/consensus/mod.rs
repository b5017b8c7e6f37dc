//! Consensus domain
//!
//! Single-round aggregation of parallel provider responses.
//!
//! # Pipeline
//!
//! ```text
//! responses (provider order)
//!     │
//!     ▼
//! group_responses        greedy single pass, Jaccard > 0.6 against the seed
//!     │
//!     ▼
//! majority_group         largest group, ties go to the first group opened
//!     │
//!     ▼
//! aggregate_responses    agreement, confidence, extractive synthesis, dissent
//! ```
//!
//! The grouping is not a transitive clustering: a response absorbed into a
//! group only had to resemble the group's seed, not its other members.

pub mod aggregate;
pub mod grouping;
pub mod mode;
pub mod similarity;

pub use aggregate::{ConsensusMetadata, ConsensusResult, aggregate_responses};
pub use grouping::{ResponseGroup, group_responses, group_responses_by, majority_group};
pub use mode::ConsensusMode;
pub use similarity::{SIMILARITY_THRESHOLD, TokenSet, are_similar, jaccard_similarity};
