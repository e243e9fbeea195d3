use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::Provider;
use crate::errors::{FailureKind, GenerationFailed};
use crate::log::preview;
use crate::wire::{Decoding, Instruction};

const NAME: &str = "Ollama";

/// Local Ollama server; needs no credentials.
pub struct Ollama {
    pub model: String,
    pub url: String,
    pub timeout: Duration,
    pub client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Msg<'a>; 2],
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: MsgOut,
}

#[derive(Deserialize)]
struct MsgOut {
    content: String,
}

pub(crate) fn extract_content(body: &str) -> Result<String, GenerationFailed> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(|e| {
        GenerationFailed::new(
            FailureKind::Backend { status: 200 },
            format!("{NAME} response parse error: {e}"),
        )
    })?;
    if parsed.message.content.trim().is_empty() {
        return Err(GenerationFailed::new(FailureKind::EmptyCompletion, format!("{NAME}: empty message")));
    }
    Ok(parsed.message.content)
}

#[async_trait]
impl Provider for Ollama {
    async fn complete(&self, ins: &Instruction, decoding: Decoding) -> Result<String, GenerationFailed> {
        let url = format!("{}/api/chat", self.url.trim_end_matches('/'));
        let body = ChatRequest {
            model: &self.model,
            messages: [
                Msg { role: "system", content: &ins.system },
                Msg { role: "user", content: &ins.user },
            ],
            stream: false,
            options: OllamaOptions {
                temperature: decoding.temperature,
                num_predict: decoding.max_tokens,
            },
        };
        debug!(%url, model = %self.model, "ollama: POST");

        let resp = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationFailed::network(NAME, e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| GenerationFailed::network(NAME, e))?;
        debug!(%status, body = %preview(&text, 2000), "ollama: raw response");

        if !status.is_success() {
            return Err(GenerationFailed::from_status(NAME, status.as_u16(), &text));
        }
        extract_content(&text)
    }
}
