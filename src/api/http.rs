//! Blocking HTTP implementation of [`CommerceApi`] using reqwest.

use crate::api::{AuthToken, CommerceApi};
use crate::config::ApiConfig;
use crate::error::{ExtractError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client-credentials login plus authenticated GETs against one project.
///
/// Requests time out after 30 seconds (10 seconds to connect); nothing is retried.
#[derive(Debug)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
}

impl HttpApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(HttpApi { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn project_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.host.trim_end_matches('/'),
            self.config.project_key,
            endpoint.trim_start_matches('/')
        )
    }
}

impl CommerceApi for HttpApi {
    fn login(&self) -> Result<AuthToken> {
        let url = format!("{}/oauth/token", self.config.auth_host.trim_end_matches('/'));
        let scope = self.config.scope();
        debug!(%url, %scope, "requesting access token");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .query(&[("grant_type", "client_credentials"), ("scope", scope.as_str())])
            .send()
            .map_err(|e| ExtractError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExtractError::Auth(format!("status {}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = response
            .json()
            .map_err(|e| ExtractError::Auth(format!("unreadable token response: {}", e)))?;

        Ok(AuthToken::new(token.access_token))
    }

    fn query(&self, token: &AuthToken, endpoint: &str) -> Result<Value> {
        let url = self.project_url(endpoint);
        debug!(%url, "GET");

        let response = self.client.get(&url).bearer_auth(token.as_str()).send()?;

        let status = response.status();
        let body = response.bytes()?;
        if !status.is_success() {
            return Err(ExtractError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        parse_body(&body)
    }
}

/// Parses a response body, trying SIMD-accelerated parsing first.
///
/// simd-json parses in place, so it works on a scratch copy; `bytes` stays
/// intact for the serde_json fallback.
fn parse_body(bytes: &[u8]) -> Result<Value> {
    let mut scratch = bytes.to_vec();
    match simd_json::serde::from_slice::<Value>(&mut scratch) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_slice(bytes)
            .map_err(|e| ExtractError::MalformedResponse(format!("body is not JSON: {}", e))),
    }
}
