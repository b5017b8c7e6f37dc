//! Use cases (application services)

pub mod build_consensus;
pub mod fan_out;
pub mod run_debate;
