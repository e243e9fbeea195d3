use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;

use crate::cli::ProviderKind;
use crate::config::Config;
use crate::errors::GenerationFailed;
use crate::wire::{Decoding, Instruction};

pub mod anthropic;
pub mod ollama;
pub mod openai;
pub mod retry;

/// A generative text backend. Implementations are stateless per call and
/// safe to share across requests.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send the instruction and return the raw completion text.
    async fn complete(&self, ins: &Instruction, decoding: Decoding) -> Result<String, GenerationFailed>;
}

pub type DynProvider = Arc<dyn Provider>;

/// Build the configured backend around the shared HTTP client, wrapped in
/// bounded retry.
pub fn make_provider(cfg: &Config, client: Client) -> DynProvider {
    let inner: DynProvider = match cfg.provider {
        ProviderKind::OpenAI => Arc::new(openai::OpenAIProvider {
            model: cfg.model.clone(),
            api_key: cfg.openai_api_key.clone(),
            api_base: cfg.openai_base.clone(),
            timeout: cfg.ai_timeout(),
            client,
        }),
        ProviderKind::Anthropic => Arc::new(anthropic::Anthropic {
            model: cfg.model.clone(),
            api_key: cfg.anthropic_api_key.clone(),
            api_base: cfg.anthropic_base.clone(),
            api_version: anthropic::API_VERSION.to_string(),
            timeout: cfg.ai_timeout(),
            client,
        }),
        ProviderKind::Ollama => Arc::new(ollama::Ollama {
            model: cfg.model.clone(),
            url: cfg.ollama_url.clone(),
            timeout: cfg.ai_timeout(),
            client,
        }),
    };
    Arc::new(retry::Retrying::new(inner, cfg.retry_policy()))
}
