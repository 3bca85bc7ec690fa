mod cf_curl;

pub use cf_curl::CfCurl;

use anyhow::{Context, Result};
use metadata_core::Transport;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// Direct HTTP access to the platform API
pub struct ApiClient {
    base_url: String,
    client: Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, skip_ssl_validation: bool) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .danger_accept_invalid_certs(skip_ssl_validation)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        })
    }

    /// Set the Authorization header value. The host CLI stores it with
    /// its `bearer` prefix, so it is sent as is.
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, mut request: RequestBuilder) -> Result<String> {
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request.send().context("Request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            anyhow::bail!("API error ({}): {}", status, body);
        }

        response.text().context("Failed to read response")
    }
}

impl Transport for ApiClient {
    fn get(&self, path: &str) -> Result<String> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        self.send(self.client.get(&url))
    }

    fn patch(&self, path: &str, body: &str) -> Result<String> {
        let url = self.url(path);
        tracing::debug!(%url, "PATCH");
        self.send(
            self.client
                .patch(&url)
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string()),
        )
    }
}
