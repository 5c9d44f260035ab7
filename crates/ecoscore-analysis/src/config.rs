//! LLM provider selection from the environment.

use crate::providers::{LlmClient, LlmProvider};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";

/// API keys and model overrides read from the environment.
///
/// Absence of every key is a valid configuration: analyses then take the
/// heuristic path.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub openai_model: String,
    pub anthropic_model: String,
    pub groq_model: String,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
            anthropic_model: std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| DEFAULT_ANTHROPIC_MODEL.to_string()),
            groq_model: std::env::var("GROQ_MODEL")
                .unwrap_or_else(|_| DEFAULT_GROQ_MODEL.to_string()),
        }
    }

    /// Build a client for the first configured provider: Anthropic > Groq >
    /// OpenAI. `None` when no key is present.
    pub fn resolve_client(&self) -> Option<LlmClient> {
        if let Some(key) = &self.anthropic_api_key {
            return Some(LlmClient::new(
                LlmProvider::Anthropic,
                &self.anthropic_model,
                key,
            ));
        }
        if let Some(key) = &self.groq_api_key {
            return Some(LlmClient::new(LlmProvider::Groq, &self.groq_model, key));
        }
        if let Some(key) = &self.openai_api_key {
            return Some(LlmClient::new(LlmProvider::OpenAI, &self.openai_model, key));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_keys(
        openai: Option<&str>,
        anthropic: Option<&str>,
        groq: Option<&str>,
    ) -> LlmConfig {
        LlmConfig {
            openai_api_key: openai.map(String::from),
            anthropic_api_key: anthropic.map(String::from),
            groq_api_key: groq.map(String::from),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
        }
    }

    #[test]
    fn test_no_keys_resolves_to_none() {
        assert!(config_with_keys(None, None, None).resolve_client().is_none());
    }

    #[test]
    fn test_provider_priority() {
        let client = config_with_keys(Some("sk-o"), Some("sk-a"), Some("gsk"))
            .resolve_client()
            .unwrap();
        assert_eq!(client.provider(), LlmProvider::Anthropic);

        let client = config_with_keys(Some("sk-o"), None, Some("gsk"))
            .resolve_client()
            .unwrap();
        assert_eq!(client.provider(), LlmProvider::Groq);

        let client = config_with_keys(Some("sk-o"), None, None)
            .resolve_client()
            .unwrap();
        assert_eq!(client.provider(), LlmProvider::OpenAI);
        assert_eq!(client.model(), DEFAULT_OPENAI_MODEL);
    }
}
