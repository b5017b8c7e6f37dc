//! Per-provider configuration.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Concrete provider adapter family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions API
    OpenAi,
    /// Anthropic messages API
    Anthropic,
    /// Offline provider replying from a fixed list
    Scripted,
}

impl ProviderKind {
    /// Infer the adapter family from a provider name.
    ///
    /// ```
    /// use orchestra_domain::ProviderKind;
    ///
    /// assert_eq!(ProviderKind::infer("anthropic"), ProviderKind::Anthropic);
    /// assert_eq!(ProviderKind::infer("claude-work"), ProviderKind::Anthropic);
    /// assert_eq!(ProviderKind::infer("mock-a"), ProviderKind::Scripted);
    /// assert_eq!(ProviderKind::infer("groq"), ProviderKind::OpenAi);
    /// ```
    pub fn infer(name: &str) -> Self {
        let name = name.to_lowercase();
        if name.starts_with("anthropic") || name.starts_with("claude") {
            ProviderKind::Anthropic
        } else if name.starts_with("scripted") || name.starts_with("mock") {
            ProviderKind::Scripted
        } else {
            ProviderKind::OpenAi
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Scripted => "scripted",
        }
    }

    /// Whether adapters of this family need an API key.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderKind::Scripted)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "scripted" => Ok(ProviderKind::Scripted),
            other => Err(format!("unknown provider kind: {}", other)),
        }
    }
}

/// Settings for one provider
///
/// # Example
///
/// ```toml
/// [providers.openai]
/// api_key_env = "OPENAI_API_KEY"
/// model = "gpt-4o-mini"
/// max_tokens = 1024
///
/// [providers.mock]
/// kind = "scripted"
/// replies = ["Use Postgres"]
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Adapter family; inferred from the provider name when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ProviderKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable to read the API key from when `api_key` is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    /// Base URL override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Canned replies for scripted providers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<String>,
}

impl ProviderConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: Some(ProviderKind::Scripted),
            replies: replies.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: ProviderKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// The adapter family for a provider registered under `name`.
    pub fn resolved_kind(&self, name: &str) -> ProviderKind {
        self.kind.unwrap_or_else(|| ProviderKind::infer(name))
    }

    /// Check the fields that can be validated without the environment.
    ///
    /// API key presence is checked by the factory, which can see
    /// `api_key_env`.
    pub fn validate(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::provider_config(name, "name cannot be empty"));
        }
        if let Some(temperature) = self.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(DomainError::provider_config(
                name,
                format!("temperature must be between 0 and 2, got {}", temperature),
            ));
        }
        if self.max_tokens == Some(0) {
            return Err(DomainError::provider_config(name, "max_tokens cannot be 0"));
        }
        if let Some(endpoint) = &self.endpoint
            && endpoint.trim().is_empty()
        {
            return Err(DomainError::provider_config(name, "endpoint cannot be empty"));
        }
        if self.resolved_kind(name) == ProviderKind::Scripted && self.replies.is_empty() {
            return Err(DomainError::provider_config(
                name,
                "scripted providers need at least one reply",
            ));
        }
        Ok(())
    }
}
