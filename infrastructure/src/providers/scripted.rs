//! Offline provider answering from a fixed list of replies.

use async_trait::async_trait;
use orchestra_application::{CompletionOptions, Provider, ProviderError};
use orchestra_domain::Response;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Replies with the configured strings in order, wrapping around at the end.
pub struct ScriptedProvider {
    name: String,
    model: Option<String>,
    replies: Vec<String>,
    cursor: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new<I, S>(name: impl Into<String>, replies: I) -> Result<Self, ProviderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies: Vec<String> = replies.into_iter().map(Into::into).collect();
        if replies.is_empty() {
            return Err(ProviderError::Other(
                "scripted provider needs at least one reply".into(),
            ));
        }
        Ok(Self {
            name: name.into(),
            model: None,
            replies,
            cursor: AtomicUsize::new(0),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    fn next_reply(&self) -> &str {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.replies.len();
        &self.replies[index]
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        _prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<Response, ProviderError> {
        let mut response = Response::new(self.name.clone(), self.next_reply()).with_latency_ms(0);
        if let Some(model) = &self.model {
            response = response.with_model(model.clone());
        }
        Ok(response)
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_cycle() {
        let provider = ScriptedProvider::new("mock", ["first", "second"]).unwrap();
        let options = CompletionOptions::default();

        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(provider.complete("q", &options).await.unwrap().content);
        }
        assert_eq!(seen, vec!["first", "second", "first"]);
    }

    #[tokio::test]
    async fn test_response_carries_name_and_model() {
        let provider = ScriptedProvider::new("mock", ["ok"])
            .unwrap()
            .with_model("canned-1");
        let response = provider
            .complete("q", &CompletionOptions::default())
            .await
            .unwrap();

        assert_eq!(response.provider, "mock");
        assert_eq!(response.model.as_deref(), Some("canned-1"));
        assert_eq!(response.latency_ms, Some(0));
    }

    #[test]
    fn test_empty_replies_rejected() {
        assert!(ScriptedProvider::new("mock", Vec::<String>::new()).is_err());
    }

    #[tokio::test]
    async fn test_health_check_does_not_consume_replies() {
        let provider = ScriptedProvider::new("mock", ["first", "second"]).unwrap();
        assert!(provider.health_check().await.unwrap());
        let response = provider
            .complete("q", &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(response.content, "first");
    }
}
