//! Provider port
//!
//! Defines the capability contract every text-generation provider satisfies.
//! Adapters live in the infrastructure layer.

use async_trait::async_trait;
use orchestra_domain::{Response, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors a provider call can fail with
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Per-call generation options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    /// Provider the caller asked for (used by `query`)
    pub provider: Option<String>,
}

impl CompletionOptions {
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }
}

/// Handle for receiving streaming events from a provider.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// A stream that yields `response` as its only event.
    pub fn completed(response: Response) -> Self {
        let (tx, rx) = mpsc::channel(1);
        // Capacity 1 with a single send cannot fail while `rx` is alive
        let _ = tx.try_send(StreamEvent::Completed(response));
        Self::new(rx)
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> Result<String, ProviderError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(response) => {
                    if full_text.is_empty() {
                        return Ok(response.content);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(ProviderError::Request(e));
                }
            }
        }
        // Channel closed without Completed, return what we have
        Ok(full_text)
    }
}

/// A text-generation provider
///
/// Only [`complete`](Provider::complete) is required. Streaming and health
/// probing have defaults built on top of it. Implementations enforce their
/// own per-call timeouts and report them as [`ProviderError::Timeout`].
#[async_trait]
pub trait Provider: Send + Sync {
    /// Unique provider name
    fn name(&self) -> &str;

    /// Produce a response for `prompt`.
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<Response, ProviderError>;

    /// Stream a response for `prompt`.
    ///
    /// Default implementation calls `complete()` and yields its content as a
    /// single `Completed` event.
    async fn stream(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<StreamHandle, ProviderError> {
        let response = self.complete(prompt, options).await?;
        Ok(StreamHandle::completed(response))
    }

    /// Report whether the provider is reachable.
    ///
    /// Default implementation issues a minimal `complete()` call and maps a
    /// rejection to `false`.
    async fn health_check(&self) -> Result<bool, ProviderError> {
        let probe = CompletionOptions::default().with_max_tokens(1);
        Ok(self.complete("ping", &probe).await.is_ok())
    }
}
