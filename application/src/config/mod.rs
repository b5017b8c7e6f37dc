//! Per-call options for the orchestration operations.

mod options;

pub use options::{ConsensusOptions, DebateOptions, QueryOptions};
