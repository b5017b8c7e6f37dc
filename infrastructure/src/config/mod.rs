//! Configuration file loading for provider-orchestra
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ORCHESTRA_*` environment variables (top-level `[orchestra]` keys)
//! 2. `--config <path>` specified file
//! 3. Project root: `./orchestra.toml` or `./.orchestra.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/provider-orchestra/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileConfig, FileLoggingConfig, FileOrchestraConfig};
pub use loader::ConfigLoader;
