//! Tolerant response decoding
//!
//! The API is inconsistent about a few field types: `success` sometimes
//! arrives as the string `"true"`, and id fields sometimes arrive as JSON
//! numbers. Records opt into the tolerant forms per field with
//! `deserialize_with`, so a response is decoded in a single serde pass.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// A boolean that may have been sent as a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrBool {
    Bool(bool),
    String(String),
}

impl From<StringOrBool> for bool {
    fn from(value: StringOrBool) -> Self {
        match value {
            StringOrBool::Bool(b) => b,
            StringOrBool::String(s) => s == "true",
        }
    }
}

/// An identifier that may have been sent as a number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => {
                if let Some(i) = n.as_i64() {
                    i.to_string()
                } else if let Some(u) = n.as_u64() {
                    u.to_string()
                } else {
                    // Fractional ids are truncated, as the server would
                    (n.as_f64().unwrap_or_default() as i64).to_string()
                }
            },
        }
    }
}

/// Deserialize a bool from `true`, `"true"` or null
pub fn bool_or_string<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrBool>::deserialize(deserializer)?;
    Ok(value.map(bool::from).unwrap_or_default())
}

/// Deserialize an id from `"123"`, `123` or null
pub fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNumber>::deserialize(deserializer)?;
    Ok(value.map(String::from).unwrap_or_default())
}

/// Decode a response body into its record type
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}
