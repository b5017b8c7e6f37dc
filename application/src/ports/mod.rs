//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod event_listener;
pub mod provider;
pub mod provider_factory;
