//! Debate domain
//!
//! Multi-round aggregation. The round loop itself lives in the application
//! layer; this module holds the round records, the agreement measure, and
//! the prompt rewrite applied between rounds.

pub mod agreement;
pub mod prompt;
pub mod round;

pub use agreement::pairwise_agreement;
pub use prompt::{PREVIEW_LEN, augment_prompt};
pub use round::{DebateResult, DebateRound};
