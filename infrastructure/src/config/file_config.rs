//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.
//!
//! ```toml
//! [orchestra]
//! default_provider = "openai"
//! consensus_threshold = 0.7
//! max_debate_rounds = 3
//! timeout_ms = 60000
//!
//! [providers.openai]
//! api_key_env = "OPENAI_API_KEY"
//! model = "gpt-4o-mini"
//!
//! [providers.anthropic]
//! api_key_env = "ANTHROPIC_API_KEY"
//! model = "claude-3-5-haiku-latest"
//!
//! [logging]
//! event_log = "~/.local/state/provider-orchestra/events.jsonl"
//! ```

use orchestra_domain::{DomainError, OrchestraConfig, ProviderConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("default_provider '{0}' is not configured under [providers]")]
    UnknownDefaultProvider(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Raw `[orchestra]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestraConfig {
    pub default_provider: Option<String>,
    pub consensus_threshold: Option<f64>,
    pub max_debate_rounds: Option<usize>,
    /// Operation timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Accepted for compatibility; responses are never cached
    pub cache: bool,
}

/// Raw `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path of the JSONL event transcript (disabled when unset)
    pub event_log: Option<String>,
    /// Path of the diagnostic log file (stderr when unset)
    pub log_file: Option<String>,
}

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub orchestra: FileOrchestraConfig,
    pub providers: BTreeMap<String, ProviderConfig>,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the file configuration.
    ///
    /// A `default_provider` must name a configured provider when any
    /// providers are configured.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.to_orchestra_config().validate()?;
        if let Some(default) = &self.orchestra.default_provider
            && !self.providers.is_empty()
            && !self.providers.contains_key(default)
        {
            return Err(ConfigValidationError::UnknownDefaultProvider(
                default.clone(),
            ));
        }
        Ok(())
    }

    /// Convert to the domain configuration held by the facade.
    pub fn to_orchestra_config(&self) -> OrchestraConfig {
        OrchestraConfig {
            providers: self.providers.clone(),
            default_provider: self.orchestra.default_provider.clone(),
            consensus_threshold: self.orchestra.consensus_threshold,
            max_debate_rounds: self.orchestra.max_debate_rounds,
            timeout_ms: self.orchestra.timeout_ms,
            cache: self.orchestra.cache,
        }
    }
}
