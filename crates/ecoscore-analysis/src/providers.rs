//! External LLM provider clients.
//!
//! Non-streaming completions; OpenAI and Groq share a wire format.
//! Anthropic uses a different one.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use ecoscore_core::{Error, Result};

/// Maximum completion length for analysis requests.
pub const MAX_TOKENS: usize = 1500;
/// Sampling temperature for analysis completions.
pub const TEMPERATURE: f64 = 0.7;

/// LLM provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
    Groq,
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::OpenAI => write!(f, "openai"),
            LlmProvider::Anthropic => write!(f, "anthropic"),
            LlmProvider::Groq => write!(f, "groq"),
        }
    }
}

/// Anything that can turn a prompt into completion text.
///
/// The analyzer takes this as an injected capability so tests can substitute
/// stub generators without touching process state.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String>;
}

/// reqwest-backed client for a configured provider.
///
/// The inner HTTP client is created once and shared read-only across
/// concurrent requests.
pub struct LlmClient {
    http: Client,
    provider: LlmProvider,
    model: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(provider: LlmProvider, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            provider,
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete_openai_compat(&self, url: &str, system: &str, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http(format!("API error {}: {}", status, body)));
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Invalid response body: {}", e)))?;

        parsed["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Http("Completion missing message content".into()))
    }

    async fn complete_anthropic(&self, system: &str, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "system": system,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .http
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http(format!("API error {}: {}", status, body)));
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("Invalid response body: {}", e)))?;

        parsed["content"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Http("Completion missing message content".into()))
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String> {
        debug!(
            "Requesting completion from {} with model {}",
            self.provider, self.model
        );
        match self.provider {
            LlmProvider::OpenAI => {
                self.complete_openai_compat(
                    "https://api.openai.com/v1/chat/completions",
                    system,
                    prompt,
                )
                .await
            }
            LlmProvider::Groq => {
                self.complete_openai_compat(
                    "https://api.groq.com/openai/v1/chat/completions",
                    system,
                    prompt,
                )
                .await
            }
            LlmProvider::Anthropic => self.complete_anthropic(system, prompt).await,
        }
    }
}
