use crate::constants::header;
use http::{HeaderMap, HeaderName, HeaderValue};
use tracing::trace;

/// Mutable view over a response's header map while CORS headers are being added.
///
/// Every header is stored in the underlying [`HeaderMap`]. Reads combine repeated
/// occurrences with `,`, and [`ResponseHeaders::vary`] appends new entries as
/// separate `Vary` occurrences, so both sides agree on one representation.
#[derive(Debug)]
pub struct ResponseHeaders<'a> {
    headers: &'a mut HeaderMap,
}

impl<'a> ResponseHeaders<'a> {
    pub fn new(headers: &'a mut HeaderMap) -> Self {
        Self { headers }
    }

    /// Replaces every occurrence of `name` with `value`.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some((name, value)) = encode(name, value) {
            self.headers.insert(name, value);
        }
    }

    /// Sets `name` only when the response does not carry it yet. Returns whether it was set.
    pub fn set_if_absent(&mut self, name: &str, value: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.set(name, value);
        self.contains(name)
    }

    /// Adds another occurrence of `name`, keeping existing ones.
    pub fn add(&mut self, name: &str, value: &str) {
        if let Some((name, value)) = encode(name, value) {
            self.headers.append(name, value);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Every occurrence of `name` joined with `,`.
    pub fn get(&self, name: &str) -> Option<String> {
        let values = self
            .headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect::<Vec<_>>();

        if values.is_empty() {
            None
        } else {
            Some(values.join(","))
        }
    }

    /// Adds `name` to `Vary` unless it is already listed.
    ///
    /// Entries are compared exactly as they appear between commas.
    pub fn vary(&mut self, name: &str) {
        if self.set_if_absent(header::VARY, name) {
            return;
        }

        let listed = self
            .get(header::VARY)
            .is_some_and(|existing| existing.split(',').any(|entry| entry == name));
        if !listed {
            self.add(header::VARY, name);
        }
    }
}

fn encode(name: &str, value: &str) -> Option<(HeaderName, HeaderValue)> {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(name), Ok(value)) => Some((name, value)),
        _ => {
            trace!(header = name, "skipping header that cannot be encoded");
            None
        }
    }
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
