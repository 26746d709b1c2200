//! CloudStack Authentication
//!
//! Requests are authenticated with an API key pair. The canonical query
//! string (sorted, percent-encoded, lowercased) is signed with HMAC-SHA1
//! using the secret key and sent base64-encoded as `signature`.

use super::query::QueryParams;
use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::fmt;

type HmacSha1 = Hmac<Sha1>;

/// API key pair for a CloudStack account
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Compute the request signature for the given query
    ///
    /// The query must already contain `apiKey`, `command` and `response`.
    pub fn sign(&self, query: &QueryParams) -> Result<String> {
        let canonical = query.encode().to_lowercase();

        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes())
            .context("Failed to initialize request signer")?;
        mac.update(canonical.as_bytes());

        Ok(general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
    }
}

// Security: never print the secret key
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Check whether a value looks like a CloudStack id: a UUID or a
/// numeric database id
pub fn is_id(value: &str) -> bool {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }
    uuid::Uuid::parse_str(value).is_ok()
}
