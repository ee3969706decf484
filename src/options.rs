use regex_automata::meta::BuildError;
use serde::Deserialize;
use thiserror::Error;

/// Raw CORS configuration, normalized into a [`crate::Cors`] by [`crate::Cors::new`].
///
/// `"*"` in `allowed_origins`, `allowed_headers` or `allowed_methods` allows everything
/// for that field. `max_age` defaults to `Some(0)`, which is emitted as `0`; use `None`
/// to omit `Access-Control-Max-Age` entirely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsOptions {
    pub allowed_origins: Vec<String>,
    pub allowed_origin_patterns: Vec<String>,
    pub supports_credentials: bool,
    pub allowed_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub max_age: Option<u64>,
}

impl Default for CorsOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_origin_patterns: Vec::new(),
            supports_credentials: false,
            allowed_headers: Vec::new(),
            exposed_headers: Vec::new(),
            allowed_methods: Vec::new(),
            max_age: Some(0),
        }
    }
}

impl CorsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn allowed_origin_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_origin_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn supports_credentials(mut self, enabled: bool) -> Self {
        self.supports_credentials = enabled;
        self
    }

    pub fn allowed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exposed_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn allowed_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_age(mut self, seconds: impl Into<Option<u64>>) -> Self {
        self.max_age = seconds.into();
        self
    }
}

/// Configuration rejected while building a [`crate::Cors`].
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("failed to compile origin pattern `{pattern}`")]
    InvalidOriginPattern {
        pattern: String,
        #[source]
        source: Box<BuildError>,
    },
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    OriginPatternTooLong { length: usize, max: usize },
    #[error("allowed origin `{0}` is not a valid header value")]
    InvalidOrigin(String),
    #[error("header name `{0}` is not a valid HTTP token")]
    InvalidHeaderName(String),
    #[error("method `{0}` is not a valid HTTP token")]
    InvalidMethod(String),
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
