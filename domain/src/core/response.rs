//! Provider response value object

use serde::{Deserialize, Serialize};

/// Token accounting reported by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input: u64,
    pub output: u64,
    pub total: u64,
}

impl TokenUsage {
    /// Creates usage where `total` is the sum of input and output.
    pub fn new(input: u64, output: u64) -> Self {
        Self {
            input,
            output,
            total: input + output,
        }
    }
}

/// The answer produced by exactly one provider call.
///
/// Immutable once returned; whichever round or group collected it owns it.
///
/// # Example
///
/// ```
/// use orchestra_domain::{Response, TokenUsage};
///
/// let response = Response::new("openai", "Use Postgres")
///     .with_model("gpt-4o")
///     .with_token_usage(TokenUsage::new(12, 3))
///     .with_cost(0.002);
///
/// assert_eq!(response.provider, "openai");
/// assert_eq!(response.token_usage.unwrap().total, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Generated text
    pub content: String,
    /// Name of the provider that produced this response
    pub provider: String,
    /// Model identifier, when the provider reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
    /// Monetary cost of the call, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Wall-clock latency of the call in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl Response {
    pub fn new(provider: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            provider: provider.into(),
            model: None,
            token_usage: None,
            cost: None,
            latency_ms: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_token_usage(mut self, usage: TokenUsage) -> Self {
        self.token_usage = Some(usage);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    /// Reported cost, or 0 when the provider did not report one.
    pub fn cost_or_zero(&self) -> f64 {
        self.cost.unwrap_or(0.0)
    }
}
