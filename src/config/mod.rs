use std::fmt;
use std::time::Duration;

use crate::cli::{Args, ProviderKind};
use crate::provider::retry::RetryPolicy;

/// An API credential. Never printed, not even through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Blank values count as "not configured".
    pub fn from_option(v: Option<String>) -> Option<Self> {
        v.map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(Secret)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Process-wide configuration, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub provider: ProviderKind,
    pub model: String,
    pub nasa_api_key: Option<Secret>,
    pub openai_api_key: Option<Secret>,
    pub anthropic_api_key: Option<Secret>,
    pub openai_base: String,
    pub anthropic_base: String,
    pub ollama_url: String,
    pub neo_base_url: String,
    pub neo_timeout_secs: u64,
    pub ai_timeout_secs: u64,
    pub ai_max_attempts: u32,
    pub ai_retry_base_ms: u64,
    pub narrative_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            provider: ProviderKind::OpenAI,
            model: ProviderKind::OpenAI.default_model().into(),
            nasa_api_key: None,
            openai_api_key: None,
            anthropic_api_key: None,
            openai_base: "https://api.openai.com/v1".into(),
            anthropic_base: "https://api.anthropic.com".into(),
            ollama_url: "http://localhost:11434".into(),
            neo_base_url: "https://api.nasa.gov/neo/rest/v1".into(),
            neo_timeout_secs: 10,
            ai_timeout_secs: 30,
            ai_max_attempts: 3,
            ai_retry_base_ms: 500,
            narrative_fallback: true,
        }
    }
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            provider: args.provider,
            model: args
                .model
                .clone()
                .unwrap_or_else(|| args.provider.default_model().to_string()),
            nasa_api_key: Secret::from_option(args.nasa_api_key.clone()),
            openai_api_key: Secret::from_option(args.openai_api_key.clone()),
            anthropic_api_key: Secret::from_option(args.anthropic_api_key.clone()),
            ollama_url: args.ollama_url.clone(),
            neo_base_url: args.neo_base_url.clone(),
            neo_timeout_secs: args.neo_timeout_secs,
            ai_timeout_secs: args.ai_timeout_secs,
            ai_max_attempts: args.ai_max_attempts,
            ai_retry_base_ms: args.ai_retry_base_ms,
            narrative_fallback: args.narrative_fallback,
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether the selected generative backend has what it needs to be called.
    pub fn ai_available(&self) -> bool {
        !self.provider.needs_api_key() || self.ai_api_key().is_some()
    }

    /// Credential for the selected backend, if it takes one.
    pub fn ai_api_key(&self) -> Option<&Secret> {
        match self.provider {
            ProviderKind::OpenAI => self.openai_api_key.as_ref(),
            ProviderKind::Anthropic => self.anthropic_api_key.as_ref(),
            ProviderKind::Ollama => None,
        }
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }

    pub fn neo_timeout(&self) -> Duration {
        Duration::from_secs(self.neo_timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let base = Duration::from_millis(self.ai_retry_base_ms);
        RetryPolicy {
            max_attempts: self.ai_max_attempts.max(1),
            base_delay: base,
            max_delay: base.saturating_mul(8),
        }
    }
}
