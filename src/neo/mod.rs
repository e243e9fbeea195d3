//! Pass-through client for the near-earth-object data provider.
//!
//! Responses are forwarded verbatim with the upstream status code; the only
//! thing added is the API key query parameter.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::{Config, Secret};
use crate::errors::UpstreamError;

/// Upstream status plus its JSON body, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct NeoResponse {
    pub status: u16,
    pub body: Value,
}

pub struct NeoClient {
    client: Client,
    base_url: String,
    api_key: Option<Secret>,
    timeout: Duration,
}

impl NeoClient {
    pub fn new(client: Client, cfg: &Config) -> Self {
        Self {
            client,
            base_url: cfg.neo_base_url.clone(),
            api_key: cfg.nasa_api_key.clone(),
            timeout: cfg.neo_timeout(),
        }
    }

    pub async fn stats(&self) -> Result<NeoResponse, UpstreamError> {
        self.get(&["stats"], &[]).await
    }

    pub async fn today_feed(&self) -> Result<NeoResponse, UpstreamError> {
        self.get(&["feed", "today"], &[("detailed", "false")]).await
    }

    pub async fn lookup(&self, id: &str) -> Result<NeoResponse, UpstreamError> {
        self.get(&["neo", id], &[]).await
    }

    pub async fn browse(&self) -> Result<NeoResponse, UpstreamError> {
        self.get(&["neo", "browse"], &[]).await
    }

    /// Build the upstream URL. Segments are percent-encoded, so a client id
    /// cannot escape the provider's path.
    pub fn endpoint(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Url, UpstreamError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| UpstreamError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        if !params.is_empty() || self.api_key.is_some() {
            let mut q = url.query_pairs_mut();
            q.extend_pairs(params);
            if let Some(key) = &self.api_key {
                q.append_pair("api_key", key.expose());
            }
        }
        Ok(url)
    }

    async fn get(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<NeoResponse, UpstreamError> {
        let url = self.endpoint(segments, params)?;
        debug!(path = %url.path(), "neo: GET");

        let resp = self.client.get(url).timeout(self.timeout).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        let body = serde_json::from_str(&text).map_err(|e| UpstreamError::NotJson {
            status,
            message: e.to_string(),
        })?;
        Ok(NeoResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(key: Option<&str>) -> NeoClient {
        let cfg = Config {
            nasa_api_key: Secret::from_option(key.map(str::to_string)),
            ..Config::default()
        };
        NeoClient::new(Client::new(), &cfg)
    }

    #[test]
    fn endpoint_appends_segments_and_key() {
        let url = client(Some("DEMO")).endpoint(&["feed", "today"], &[("detailed", "false")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.nasa.gov/neo/rest/v1/feed/today?detailed=false&api_key=DEMO"
        );
    }

    #[test]
    fn missing_key_is_omitted() {
        let url = client(None).endpoint(&["stats"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.nasa.gov/neo/rest/v1/stats");
    }

    #[test]
    fn ids_cannot_escape_the_path() {
        let url = client(None).endpoint(&["neo", "../../planetary/apod"], &[]).unwrap();
        assert!(url.path().starts_with("/neo/rest/v1/neo/"));
        assert!(!url.path().contains("/planetary/"));
    }
}
