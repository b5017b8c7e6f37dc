//! HTTP adapters for hosted chat APIs
//!
//! One adapter covers both the OpenAI-compatible chat completions API and the
//! Anthropic messages API; [`ApiFlavor`] selects the wire format.

use async_trait::async_trait;
use orchestra_application::{CompletionOptions, Provider, ProviderError};
use orchestra_domain::{Response, TokenUsage};
use serde_json::{Value, json};
use std::time::{Duration, Instant};
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Wire format spoken by an [`HttpProvider`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFlavor {
    OpenAi,
    Anthropic,
}

impl ApiFlavor {
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            ApiFlavor::OpenAi => "https://api.openai.com",
            ApiFlavor::Anthropic => "https://api.anthropic.com",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ApiFlavor::OpenAi => "gpt-4o-mini",
            ApiFlavor::Anthropic => "claude-3-5-haiku-latest",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            ApiFlavor::OpenAi => "/v1/chat/completions",
            ApiFlavor::Anthropic => "/v1/messages",
        }
    }
}

/// Provider backed by a hosted chat API
pub struct HttpProvider {
    name: String,
    flavor: ApiFlavor,
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    request_timeout: Duration,
}

impl HttpProvider {
    pub fn new(name: impl Into<String>, flavor: ApiFlavor, api_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            flavor,
            client: reqwest::Client::new(),
            endpoint: flavor.default_endpoint().to_string(),
            api_key: api_key.into(),
            model: flavor.default_model().to_string(),
            max_tokens: None,
            temperature: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn flavor(&self) -> ApiFlavor {
        self.flavor
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}{}", self.endpoint, self.flavor.path())
    }

    /// Per-call options override the configured defaults.
    fn request_body(&self, prompt: &str, options: &CompletionOptions) -> Value {
        let max_tokens = options.max_tokens.or(self.max_tokens);
        let temperature = options.temperature.or(self.temperature);

        let mut body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        match self.flavor {
            ApiFlavor::OpenAi => {
                if let Some(max_tokens) = max_tokens {
                    body["max_tokens"] = json!(max_tokens);
                }
            }
            // The messages API requires max_tokens
            ApiFlavor::Anthropic => {
                body["max_tokens"] = json!(max_tokens.unwrap_or(DEFAULT_MAX_TOKENS));
            }
        }
        if let Some(temperature) = temperature {
            body["temperature"] = json!(temperature);
        }
        body
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.flavor {
            ApiFlavor::OpenAi => request.bearer_auth(&self.api_key),
            ApiFlavor::Anthropic => request
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION),
        }
    }
}

/// Parsed completion payload
#[derive(Debug, PartialEq)]
struct Completion {
    content: String,
    model: Option<String>,
    usage: Option<TokenUsage>,
}

fn parse_completion(flavor: ApiFlavor, body: &Value) -> Result<Completion, ProviderError> {
    let model = body["model"].as_str().map(str::to_string);

    let (content, usage) = match flavor {
        ApiFlavor::OpenAi => {
            let content = body["choices"][0]["message"]["content"]
                .as_str()
                .ok_or_else(|| {
                    ProviderError::InvalidResponse("missing choices[0].message.content".into())
                })?
                .to_string();
            let usage = body["usage"]["prompt_tokens"]
                .as_u64()
                .zip(body["usage"]["completion_tokens"].as_u64())
                .map(|(input, output)| TokenUsage::new(input, output));
            (content, usage)
        }
        ApiFlavor::Anthropic => {
            let blocks = body["content"]
                .as_array()
                .ok_or_else(|| ProviderError::InvalidResponse("missing content blocks".into()))?;
            let content = blocks
                .iter()
                .filter(|block| block["type"] == "text")
                .filter_map(|block| block["text"].as_str())
                .collect::<Vec<_>>()
                .join("");
            let usage = body["usage"]["input_tokens"]
                .as_u64()
                .zip(body["usage"]["output_tokens"].as_u64())
                .map(|(input, output)| TokenUsage::new(input, output));
            (content, usage)
        }
    };

    Ok(Completion {
        content,
        model,
        usage,
    })
}

fn map_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Request(error.to_string())
    }
}

#[async_trait]
impl Provider for HttpProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<Response, ProviderError> {
        let started = Instant::now();
        let url = self.url();
        debug!(provider = %self.name, model = %self.model, %url, "Sending completion request");

        let request = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .json(&self.request_body(prompt, options));
        let reply = self
            .authorize(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = reply.status();
        if !status.is_success() {
            let detail = reply.text().await.unwrap_or_default();
            return Err(ProviderError::Request(format!("HTTP {}: {}", status, detail)));
        }

        let body: Value = reply
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        let completion = parse_completion(self.flavor, &body)?;
        let latency_ms = started.elapsed().as_millis() as u64;
        debug!(provider = %self.name, latency_ms, "Completion received");

        let mut response = Response::new(self.name.clone(), completion.content)
            .with_model(completion.model.unwrap_or_else(|| self.model.clone()))
            .with_latency_ms(latency_ms);
        if let Some(usage) = completion.usage {
            response = response.with_token_usage(usage);
        }
        Ok(response)
    }
}
