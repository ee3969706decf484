use crate::constants::WILDCARD;
use crate::options::ValidationError;
use crate::util::{is_http_token, normalize_upper};
use indexmap::IndexSet;

/// Configuration for the `Access-Control-Allow-Methods` response header.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AllowedMethods {
    /// Any method. Emits `*`, or mirrors the requested method when credentials are enabled.
    Any,
    /// Upper-cased methods in insertion order.
    List(IndexSet<String>),
}

impl AllowedMethods {
    /// Upper-cases and de-duplicates `values`; a `"*"` entry collapses to [`Self::Any`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut methods = IndexSet::new();
        for value in values {
            let value = value.into();
            if value == WILDCARD {
                return Self::Any;
            }
            methods.insert(normalize_upper(&value));
        }

        Self::List(methods)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Return the header value representation, if any.
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
                return Err(ValidationError::InvalidMethod(invalid.clone()));
            }
        }
        Ok(())
    }
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::List(IndexSet::new())
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
