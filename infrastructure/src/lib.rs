//! Infrastructure layer for provider-orchestra
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOrchestraConfig,
};
pub use logging::{JsonlEventLogger, TracingEventListener};
pub use providers::{ApiFlavor, DefaultProviderFactory, HttpProvider, ScriptedProvider};
