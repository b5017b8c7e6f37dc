//! Test doubles shared by the unit tests of this crate.

use crate::ports::event_listener::EventListener;
use crate::ports::provider::{CompletionOptions, Provider, ProviderError};
use crate::ports::provider_factory::ProviderFactory;
use async_trait::async_trait;
use orchestra_domain::{DomainError, OrchestraEvent, ProviderConfig, Response};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Provider that always replies with the same text.
pub struct Canned {
    pub name: String,
    pub reply: String,
}

impl Canned {
    pub fn new(name: &str, reply: &str) -> Arc<dyn Provider> {
        Arc::new(Self {
            name: name.to_string(),
            reply: reply.to_string(),
        })
    }
}

#[async_trait]
impl Provider for Canned {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        _prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<Response, ProviderError> {
        Ok(Response::new(&self.name, &self.reply))
    }
}

/// Provider whose `complete` always fails.
pub struct Failing {
    pub name: String,
}

impl Failing {
    pub fn new(name: &str) -> Arc<dyn Provider> {
        Arc::new(Self {
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl Provider for Failing {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        _prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<Response, ProviderError> {
        Err(ProviderError::Request("service unavailable".into()))
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        Err(ProviderError::Request("probe failed".into()))
    }
}

/// Provider replying from a script, one entry per call (the last entry
/// repeats), recording every prompt it receives.
pub struct Scripted {
    pub name: String,
    replies: Vec<String>,
    calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl Scripted {
    pub fn new(name: &str, replies: &[&str]) -> Arc<Self> {
        Arc::new(Self::build(name, replies, None))
    }

    pub fn delayed(name: &str, replies: &[&str], delay: Duration) -> Arc<Self> {
        Arc::new(Self::build(name, replies, Some(delay)))
    }

    fn build(name: &str, replies: &[&str], delay: Option<Duration>) -> Self {
        Self {
            name: name.to_string(),
            replies: replies.iter().map(|r| r.to_string()).collect(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            delay,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Provider for Scripted {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<Response, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self
            .replies
            .get(call)
            .or_else(|| self.replies.last())
            .cloned()
            .unwrap_or_default();
        Ok(Response::new(&self.name, reply))
    }
}

/// Provider whose health probe panics.
pub struct PanickingProbe;

#[async_trait]
impl Provider for PanickingProbe {
    fn name(&self) -> &str {
        "panicky"
    }

    async fn complete(
        &self,
        _prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<Response, ProviderError> {
        Ok(Response::new("panicky", "ok"))
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        panic!("probe exploded")
    }
}

/// Factory building `Canned` providers from the first configured reply.
///
/// Requires either an API key or at least one reply.
pub struct CannedFactory;

impl ProviderFactory for CannedFactory {
    fn create(
        &self,
        name: &str,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn Provider>, DomainError> {
        if config.api_key.is_none() && config.replies.is_empty() {
            return Err(DomainError::provider_config(name, "api_key is required"));
        }
        Ok(Canned::new(
            name,
            config.replies.first().map(String::as_str).unwrap_or_default(),
        ))
    }
}

/// Listener that records every event it receives.
#[derive(Default)]
pub struct RecordingListener {
    pub events: Mutex<Vec<OrchestraEvent>>,
}

impl RecordingListener {
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|e| e.name()).collect()
    }

    pub fn events(&self) -> Vec<OrchestraEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventListener for RecordingListener {
    fn on_event(&self, event: &OrchestraEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
