use crate::constants::header;
use http::uri::Authority;
use http::{HeaderMap, Request};

const DEFAULT_SCHEME: &str = "http";

/// Read-only view of the request fields the policy engine looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
    /// Scheme the request was received on, used by the same-origin check.
    pub scheme: &'a str,
    /// Host without port, from the request URI or the `Host` header.
    pub host: Option<&'a str>,
}

/// Owned copy of a request's CORS inputs, kept while the request body moves on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedRequestContext {
    pub method: String,
    pub origin: Option<String>,
    pub access_control_request_method: Option<String>,
    pub access_control_request_headers: Option<String>,
    pub scheme: String,
    pub host: Option<String>,
}

impl OwnedRequestContext {
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let headers = request.headers();
        let uri = request.uri();

        Self {
            method: request.method().as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
            scheme: uri.scheme_str().unwrap_or(DEFAULT_SCHEME).to_string(),
            host: uri
                .host()
                .map(str::to_string)
                .or_else(|| host_header(headers)),
        }
    }

    pub fn as_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: self.access_control_request_method.as_deref(),
            access_control_request_headers: self.access_control_request_headers.as_deref(),
            scheme: &self.scheme,
            host: self.host.as_deref(),
        }
    }
}

impl<B> From<&Request<B>> for OwnedRequestContext {
    fn from(request: &Request<B>) -> Self {
        Self::from_request(request)
    }
}

/// All occurrences of `name` joined with `", "`; `None` when the header is missing.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let mut occurrences = headers
        .get_all(name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
        .peekable();
    occurrences.peek()?;

    Some(occurrences.collect::<Vec<_>>().join(", "))
}

fn host_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<Authority>().ok())
        .map(|authority| authority.host().to_string())
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
