use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::config::Config;
use crate::domain::ports::Transport;
use crate::error::{PaymentError, Result};

/// JSON transport to the merchant server with HTTP Basic auth.
///
/// Single attempt per call; every failure surfaces to the caller untouched.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    user: String,
    token: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Self {
        Self::with_credentials(&config.server_url, &config.auth_user, &config.auth_token)
    }

    /// Builds a transport against an explicit endpoint, bypassing `Config`.
    pub fn with_credentials(base_url: &str, user: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, %body, "POST to merchant server");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user, Some(&self.token))
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .body(body.to_string())
            .send()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaymentError::Http {
                status: status.as_u16(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| PaymentError::Network(e.to_string()))?;
        let parsed: Value =
            serde_json::from_str(&text).map_err(|e| PaymentError::Parse(e.to_string()))?;
        tracing::debug!(body = %parsed, "response from merchant server");
        Ok(parsed)
    }
}
