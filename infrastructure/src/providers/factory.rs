//! Builds provider adapters from configuration.

use super::http::{ApiFlavor, HttpProvider};
use super::scripted::ScriptedProvider;
use orchestra_application::{Provider, ProviderFactory};
use orchestra_domain::{DomainError, ProviderConfig, ProviderKind};
use std::sync::Arc;
use tracing::debug;

type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Default [`ProviderFactory`] wired into the CLI
///
/// The API key comes from `api_key`, then the variable named by
/// `api_key_env`, then the conventional variable for the adapter family
/// (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`).
pub struct DefaultProviderFactory {
    env: Box<EnvLookup>,
}

impl DefaultProviderFactory {
    pub fn new() -> Self {
        Self::with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Use `lookup` instead of the process environment.
    pub fn with_env_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            env: Box::new(lookup),
        }
    }

    fn api_key(&self, kind: ProviderKind, config: &ProviderConfig) -> Option<String> {
        if let Some(key) = config.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Some(key.clone());
        }
        let variable = match (&config.api_key_env, kind) {
            (Some(variable), _) => variable.as_str(),
            (None, ProviderKind::OpenAi) => "OPENAI_API_KEY",
            (None, ProviderKind::Anthropic) => "ANTHROPIC_API_KEY",
            (None, ProviderKind::Scripted) => return None,
        };
        (self.env)(variable).filter(|k| !k.is_empty())
    }
}

impl Default for DefaultProviderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderFactory for DefaultProviderFactory {
    fn create(&self, name: &str, config: &ProviderConfig) -> Result<Arc<dyn Provider>, DomainError> {
        let kind = config.resolved_kind(name);
        debug!(provider = name, kind = %kind, "Creating provider");

        let flavor = match kind {
            ProviderKind::Scripted => {
                let mut provider = ScriptedProvider::new(name, config.replies.iter().cloned())
                    .map_err(|e| DomainError::provider_config(name, e.to_string()))?;
                if let Some(model) = &config.model {
                    provider = provider.with_model(model.clone());
                }
                return Ok(Arc::new(provider));
            }
            ProviderKind::OpenAi => ApiFlavor::OpenAi,
            ProviderKind::Anthropic => ApiFlavor::Anthropic,
        };

        let api_key = self
            .api_key(kind, config)
            .ok_or_else(|| DomainError::provider_config(name, "api_key is required"))?;

        let mut provider = HttpProvider::new(name, flavor, api_key);
        if let Some(endpoint) = &config.endpoint {
            provider = provider.with_endpoint(endpoint.clone());
        }
        if let Some(model) = &config.model {
            provider = provider.with_model(model.clone());
        }
        if let Some(max_tokens) = config.max_tokens {
            provider = provider.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = config.temperature {
            provider = provider.with_temperature(temperature);
        }
        Ok(Arc::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orchestra_application::CompletionOptions;

    fn isolated() -> DefaultProviderFactory {
        DefaultProviderFactory::with_env_lookup(|_| None)
    }

    #[test]
    fn test_http_provider_requires_key() {
        let err = isolated()
            .create("openai", &ProviderConfig::default())
            .err()
            .unwrap();
        assert!(err.to_string().contains("api_key is required"));
    }

    #[test]
    fn test_inline_key_is_used() {
        let provider = isolated()
            .create("openai", &ProviderConfig::with_api_key("sk-test"))
            .unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_key_read_from_named_variable() {
        let factory = DefaultProviderFactory::with_env_lookup(|key| {
            (key == "WORK_CLAUDE_KEY").then(|| "sk-ant".to_string())
        });
        let config = ProviderConfig {
            api_key_env: Some("WORK_CLAUDE_KEY".into()),
            ..ProviderConfig::default()
        };
        assert!(factory.create("claude-work", &config).is_ok());
        // Named variable replaces the conventional one
        assert!(factory.create("anthropic", &ProviderConfig::default()).is_err());
    }

    #[test]
    fn test_conventional_variable_fallback() {
        let factory = DefaultProviderFactory::with_env_lookup(|key| {
            (key == "ANTHROPIC_API_KEY").then(|| "sk-ant".to_string())
        });
        assert!(factory.create("anthropic", &ProviderConfig::default()).is_ok());
        assert!(factory.create("openai", &ProviderConfig::default()).is_err());
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        assert!(
            isolated()
                .create("openai", &ProviderConfig::with_api_key(""))
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_scripted_provider_needs_no_key() {
        let provider = isolated()
            .create("mock", &ProviderConfig::scripted(["Use Postgres"]))
            .unwrap();
        let response = provider
            .complete("q", &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(response.content, "Use Postgres");
    }

    #[test]
    fn test_scripted_provider_without_replies_rejected() {
        let config = ProviderConfig::default().with_kind(ProviderKind::Scripted);
        assert!(isolated().create("mock", &config).is_err());
    }
}
