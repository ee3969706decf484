use crate::options::ValidationError;
use crate::util::is_http_token;
use std::ops::Deref;

/// Header names listed in `Access-Control-Expose-Headers`, kept verbatim and in order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExposedHeaders {
    values: Vec<String>,
}

impl ExposedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Serializes the list with a comma and a space between names.
    pub fn header_value(&self) -> Option<String> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.join(", "))
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        match self.values.iter().find(|value| !is_http_token(value)) {
            Some(invalid) => Err(ValidationError::InvalidHeaderName(invalid.clone())),
            None => Ok(()),
        }
    }
}

impl Deref for ExposedHeaders {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
