//! Query parameters for CloudStack commands
//!
//! Every command's parameter struct renders itself into a [`QueryParams`]
//! just before the request is sent. Keys are kept sorted so that encoding
//! the same parameters always produces the same bytes, which the request
//! signature depends on.

use std::collections::{BTreeMap, HashMap};

/// Ordered query parameters for a single request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a string parameter, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn set_int(&mut self, key: &str, value: i64) {
        self.set(key, value.to_string());
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }

    /// Join a list with commas. Embedded commas are not escaped; the API
    /// splits on every comma.
    pub fn set_list(&mut self, key: &str, values: &[String]) {
        self.set(key, values.join(","));
    }

    /// Expand a map into `prefix[i].key` / `prefix[i].value` pairs, with `i`
    /// following the sorted order of the map's keys.
    ///
    /// Encoding sorts the generated keys as text, so with eleven or more
    /// entries `prefix[10].*` is emitted between `prefix[0].*` and
    /// `prefix[1].*`. The indices themselves are unaffected.
    pub fn set_map(&mut self, prefix: &str, map: &HashMap<String, String>) {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();

        for (i, key) in keys.into_iter().enumerate() {
            self.set(format!("{}[{}].key", prefix, i), key.as_str());
            self.set(format!("{}[{}].value", prefix, i), map[key].as_str());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate parameters in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `key=value&...`, percent-encoding keys and values
    pub fn encode(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
