use crate::constants::WILDCARD;
use crate::options::ValidationError;
use crate::util::{is_http_token, normalize_lower};
use indexmap::IndexSet;

/// Configuration for the `Access-Control-Allow-Headers` response value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllowedHeaders {
    /// Any request header. Emits `*`, or mirrors the request when credentials are enabled.
    Any,
    /// Lower-cased header names in insertion order.
    List(IndexSet<String>),
}

impl Default for AllowedHeaders {
    fn default() -> Self {
        Self::List(IndexSet::new())
    }
}

impl AllowedHeaders {
    /// Lower-cases and de-duplicates `values`; a `"*"` entry collapses to [`Self::Any`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut headers = IndexSet::new();
        for value in values {
            let value = value.into();
            if value == WILDCARD {
                return Self::Any;
            }
            headers.insert(normalize_lower(&value));
        }

        Self::List(headers)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Static header value, if this configuration has one.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::Any => Some(WILDCARD.to_string()),
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(
                values
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if let Self::List(values) = self {
            if let Some(invalid) = values.iter().find(|value| !is_http_token(value)) {
                return Err(ValidationError::InvalidHeaderName(invalid.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
