//! HTTP transport for CloudStack API calls

use super::auth::Credentials;
use super::client::Transport;
use super::query::QueryParams;
use crate::config::Config;
use crate::error::{ApiError, CloudStackError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP transport that signs and sends commands to a management server
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
}

impl HttpTransport {
    /// Create a transport for the given API endpoint
    /// (e.g. `https://cloud.example.com/client/api`)
    pub fn new(
        endpoint: &str,
        credentials: Credentials,
        timeout: Duration,
        verify_ssl: bool,
    ) -> Result<Self> {
        let endpoint =
            Url::parse(endpoint).with_context(|| format!("Invalid API URL: {}", endpoint))?;

        let client = Client::builder()
            .user_agent(concat!("cloudstack-rs/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .danger_accept_invalid_certs(!verify_ssl)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    /// Create a transport from the effective configuration
    pub fn from_config(config: &Config) -> crate::error::Result<Self> {
        let endpoint = config
            .effective_api_url()
            .ok_or_else(|| CloudStackError::Config("API URL is not set".to_string()))?;
        let credentials = config.credentials()?;

        Self::new(
            &endpoint,
            credentials,
            Duration::from_secs(config.effective_timeout()),
            config.effective_verify_ssl(),
        )
        .map_err(|e| CloudStackError::Config(format!("{:#}", e)))
    }

    /// Build the signed request URL for a command
    fn signed_url(&self, command: &str, query: &QueryParams) -> Result<Url> {
        let mut params = query.clone();
        params.set("apiKey", self.credentials.api_key());
        params.set("command", command);
        params.set("response", "json");

        let signature = self.credentials.sign(&params)?;
        params.set("signature", signature);

        let mut url = self.endpoint.clone();
        url.set_query(Some(&params.encode()));
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, command: &str, query: &QueryParams) -> Result<Vec<u8>> {
        // Security: log the command, never the signed URL
        tracing::debug!("GET {} command={}", self.endpoint.path(), command);

        let url = self.signed_url(command, query)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&body));
        }

        unwrap_response(&body, status.as_u16())
    }
}

/// Strip the `<command>response` envelope and surface API errors
fn unwrap_response(body: &str, status: u16) -> Result<Vec<u8>> {
    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if status >= 400 => {
            return Err(anyhow::anyhow!("API request failed: {}", status));
        },
        Err(e) => return Err(e).context("Failed to parse response JSON"),
    };

    let inner = match &parsed {
        Value::Object(map) => map
            .iter()
            .find(|(key, _)| key.ends_with("response"))
            .map(|(_, value)| value.clone())
            .unwrap_or(parsed.clone()),
        _ => parsed.clone(),
    };

    if let Some(text) = inner.get("errortext").and_then(|v| v.as_str()) {
        let code = inner
            .get("errorcode")
            .and_then(|v| v.as_u64())
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(status);
        let cs_code = inner
            .get("cserrorcode")
            .and_then(|v| v.as_u64())
            .and_then(|c| u32::try_from(c).ok())
            .unwrap_or_default();
        return Err(ApiError {
            code,
            cs_code,
            text: text.to_string(),
        }
        .into());
    }

    if status >= 400 {
        return Err(anyhow::anyhow!("API request failed: {}", status));
    }

    serde_json::to_vec(&single_object(inner)).context("Failed to re-encode response body")
}

/// Unwrap `{"imagestore": {...}}` down to the record itself
///
/// Create and update commands nest their record under one key; listings
/// carry arrays and are left alone.
fn single_object(value: Value) -> Value {
    match value {
        Value::Object(map) if map.len() == 1 && map.values().all(Value::is_object) => {
            map.into_iter().next().map(|(_, v)| v).unwrap_or_default()
        },
        other => other,
    }
}
