use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::Provider;
use crate::config::Secret;
use crate::errors::{FailureKind, GenerationFailed};
use crate::log::preview;
use crate::wire::{Decoding, Instruction};

pub const API_VERSION: &str = "2023-06-01";
const NAME: &str = "Anthropic";

pub struct Anthropic {
    pub model: String,
    pub api_key: Option<Secret>,
    pub api_base: String,
    pub api_version: String,
    pub timeout: Duration,
    pub client: Client,
}

#[derive(Serialize)]
struct MsgRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Msg<'a>>,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MsgResponse {
    content: Vec<Block>,
}

#[derive(Deserialize)]
struct Block {
    #[serde(default)]
    text: String,
    #[serde(default)]
    r#type: String,
}

/// Concatenate the text blocks of a messages response.
pub(crate) fn extract_content(body: &str) -> Result<String, GenerationFailed> {
    let parsed: MsgResponse = serde_json::from_str(body).map_err(|e| {
        GenerationFailed::new(
            FailureKind::Backend { status: 200 },
            format!("{NAME} response parse error: {e}"),
        )
    })?;

    let text: String = parsed
        .content
        .into_iter()
        .filter(|b| b.r#type == "text")
        .map(|b| b.text)
        .collect();

    if text.trim().is_empty() {
        return Err(GenerationFailed::new(FailureKind::EmptyCompletion, format!("{NAME}: empty content")));
    }
    Ok(text)
}

#[async_trait]
impl Provider for Anthropic {
    async fn complete(&self, ins: &Instruction, decoding: Decoding) -> Result<String, GenerationFailed> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            GenerationFailed::new(FailureKind::MissingCredentials, "ANTHROPIC_API_KEY is not set")
        })?;

        let url = format!("{}/v1/messages", self.api_base.trim_end_matches('/'));
        let body = MsgRequest {
            model: &self.model,
            max_tokens: decoding.max_tokens,
            temperature: decoding.temperature,
            system: &ins.system,
            messages: vec![Msg { role: "user", content: &ins.user }],
        };
        debug!(%url, model = %self.model, "anthropic: POST");

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", api_key.expose())
            .header("anthropic-version", &self.api_version)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationFailed::network(NAME, e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| GenerationFailed::network(NAME, e))?;
        debug!(%status, body = %preview(&text, 2000), "anthropic: raw response");

        if !status.is_success() {
            return Err(GenerationFailed::from_status(NAME, status.as_u16(), &text));
        }
        extract_content(&text)
    }
}
