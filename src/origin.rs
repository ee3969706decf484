use crate::constants::WILDCARD;
use crate::options::ValidationError;
use http::HeaderValue;
use indexmap::IndexSet;
use regex_automata::meta::Regex;

const MAX_PATTERN_LENGTH: usize = 50_000;

/// Exact-match origin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    /// Every origin is allowed, including requests without an `Origin` header.
    Any,
    /// Insertion-ordered set of literal origins, compared byte for byte.
    List(IndexSet<String>),
}

impl Default for AllowedOrigins {
    fn default() -> Self {
        Self::List(IndexSet::new())
    }
}

impl AllowedOrigins {
    /// Builds the origin set. A `"*"` entry anywhere collapses the whole list to [`Self::Any`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut origins = IndexSet::new();
        for value in values {
            let value = value.into();
            if value == WILDCARD {
                return Self::Any;
            }
            origins.insert(value);
        }

        Self::List(origins)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn contains(&self, origin: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(origins) => origins.contains(origin),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if let Self::List(origins) = self {
            for origin in origins {
                if origin.is_empty() || HeaderValue::from_str(origin).is_err() {
                    return Err(ValidationError::InvalidOrigin(origin.clone()));
                }
            }
        }
        Ok(())
    }
}

/// A compiled origin regular expression.
///
/// Matching is unanchored and case-sensitive; write `^...$` and `(?i)` into the
/// pattern when the whole origin must match or case should be ignored.
#[derive(Debug, Clone)]
pub struct OriginPattern {
    source: String,
    regex: Regex,
}

impl OriginPattern {
    pub fn new(pattern: &str) -> Result<Self, ValidationError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(ValidationError::OriginPatternTooLong {
                length: pattern.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let regex = Regex::new(pattern).map_err(|err| ValidationError::InvalidOriginPattern {
            pattern: pattern.to_owned(),
            source: Box::new(err),
        })?;

        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, origin: &str) -> bool {
        self.regex.is_match(origin.as_bytes())
    }
}

/// How `Access-Control-Allow-Origin` is produced, decided once per configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OriginMode {
    /// Any origin without credentials: a literal `*`, identical for every request.
    Wildcard,
    /// Exactly one literal origin and no patterns: always that origin.
    Static(String),
    /// The request origin is checked and reflected, so responses vary on `Origin`.
    Dynamic,
}

impl OriginMode {
    pub(crate) fn resolve(
        origins: &AllowedOrigins,
        patterns: &[OriginPattern],
        supports_credentials: bool,
    ) -> Self {
        match origins {
            AllowedOrigins::Any if !supports_credentials => Self::Wildcard,
            AllowedOrigins::List(values) if values.len() == 1 && patterns.is_empty() => values
                .first()
                .map_or(Self::Dynamic, |origin| Self::Static(origin.clone())),
            _ => Self::Dynamic,
        }
    }

    /// Whether the emitted origin depends on the request.
    pub fn varies_on_origin(&self) -> bool {
        matches!(self, Self::Dynamic)
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
