use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use crate::config::Secret;
use crate::errors::{FailureKind, GenerationFailed};
use crate::log::preview;
use crate::wire::{Decoding, Instruction};

const NAME: &str = "OpenAI";

/// Chat-completions backend: system + user message, plain text out.
pub struct OpenAIProvider {
    pub model: String,
    pub api_key: Option<Secret>,
    pub api_base: String,
    pub timeout: Duration,
    pub client: Client,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// Pull the first choice's text out of a chat-completions body.
pub(crate) fn extract_content(body: &str) -> Result<String, GenerationFailed> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| {
        GenerationFailed::new(
            FailureKind::Backend { status: 200 },
            format!("Failed to parse {NAME} response: {e}"),
        )
    })?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| GenerationFailed::new(FailureKind::EmptyCompletion, format!("{NAME}: empty completion")))
}

#[async_trait]
impl super::Provider for OpenAIProvider {
    async fn complete(&self, ins: &Instruction, decoding: Decoding) -> Result<String, GenerationFailed> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            GenerationFailed::new(FailureKind::MissingCredentials, "OPENAI_API_KEY is not set")
        })?;

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": ins.system },
                { "role": "user", "content": ins.user }
            ],
            "temperature": decoding.temperature,
            "max_tokens": decoding.max_tokens
        });

        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        debug!(%url, model = %self.model, "openai: POST");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose())
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationFailed::network(NAME, e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| GenerationFailed::network(NAME, e))?;
        debug!(%status, body = %preview(&text, 2000), "openai: raw response");

        if !status.is_success() {
            return Err(GenerationFailed::from_status(NAME, status.as_u16(), &text));
        }
        extract_content(&text)
    }
}
