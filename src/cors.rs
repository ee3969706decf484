use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::{header, method};
use crate::context::RequestContext;
use crate::exposed_headers::ExposedHeaders;
use crate::headers::ResponseHeaders;
use crate::options::{CorsOptions, ValidationError};
use crate::origin::{AllowedOrigins, OriginMode, OriginPattern};
use crate::util::normalize_upper;
use http::{HeaderMap, Response, StatusCode};
use tracing::debug;

/// Core CORS policy engine.
///
/// Built once from [`CorsOptions`] and immutable afterwards; every method is a pure
/// function of the configuration and the request, apart from the headers it writes.
#[derive(Debug, Clone)]
pub struct Cors {
    allowed_origins: AllowedOrigins,
    allowed_origin_patterns: Vec<OriginPattern>,
    supports_credentials: bool,
    allowed_headers: AllowedHeaders,
    exposed_headers: ExposedHeaders,
    allowed_methods: AllowedMethods,
    max_age: Option<String>,
    origin_mode: OriginMode,
}

impl Cors {
    pub fn new(options: CorsOptions) -> Result<Self, ValidationError> {
        let CorsOptions {
            allowed_origins,
            allowed_origin_patterns,
            supports_credentials,
            allowed_headers,
            exposed_headers,
            allowed_methods,
            max_age,
        } = options;

        let allowed_origins = AllowedOrigins::list(allowed_origins);
        allowed_origins.validate()?;
        let allowed_origin_patterns = allowed_origin_patterns
            .iter()
            .map(|pattern| OriginPattern::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        let allowed_headers = AllowedHeaders::list(allowed_headers);
        allowed_headers.validate()?;
        let exposed_headers = ExposedHeaders::list(exposed_headers);
        exposed_headers.validate()?;
        let allowed_methods = AllowedMethods::list(allowed_methods);
        allowed_methods.validate()?;

        let origin_mode = OriginMode::resolve(
            &allowed_origins,
            &allowed_origin_patterns,
            supports_credentials,
        );
        debug!(
            origin_mode = ?origin_mode,
            patterns = allowed_origin_patterns.len(),
            supports_credentials,
            "CORS policy configured"
        );

        Ok(Self {
            allowed_origins,
            allowed_origin_patterns,
            supports_credentials,
            allowed_headers,
            exposed_headers,
            allowed_methods,
            max_age: max_age.map(|seconds| seconds.to_string()),
            origin_mode,
        })
    }

    pub fn origin_mode(&self) -> &OriginMode {
        &self.origin_mode
    }

    pub fn supports_credentials(&self) -> bool {
        self.supports_credentials
    }

    /// True when the request carries an `Origin` that is not the request's own
    /// `scheme://host`.
    pub fn is_cors_request(&self, request: &RequestContext<'_>) -> bool {
        request
            .origin
            .is_some_and(|origin| !is_same_host(origin, request))
    }

    /// True for `OPTIONS` requests carrying `Access-Control-Request-Method`, even an empty one.
    pub fn is_preflight_request(&self, request: &RequestContext<'_>) -> bool {
        request.method == method::OPTIONS && request.access_control_request_method.is_some()
    }

    pub fn is_origin_allowed(&self, request: &RequestContext<'_>) -> bool {
        if self.allowed_origins.is_any() {
            return true;
        }

        let origin = match request.origin {
            Some(origin) if !origin.is_empty() => origin,
            _ => return false,
        };

        self.allowed_origins.contains(origin)
            || self
                .allowed_origin_patterns
                .iter()
                .any(|pattern| pattern.is_match(origin))
    }

    /// Terminal `204 No Content` answer to a preflight request.
    pub fn handle_preflight_request<B: Default>(
        &self,
        request: &RequestContext<'_>,
    ) -> Response<B> {
        let mut response = Response::new(B::default());
        *response.status_mut() = StatusCode::NO_CONTENT;
        self.add_preflight_request_headers(response.headers_mut(), request);
        response
    }

    pub fn add_preflight_request_headers(
        &self,
        headers: &mut HeaderMap,
        request: &RequestContext<'_>,
    ) {
        let mut headers = ResponseHeaders::new(headers);
        self.configure_allowed_origin(&mut headers, request);

        if headers.contains(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
            self.configure_allow_credentials(&mut headers);
            self.configure_allowed_methods(&mut headers, request);
            self.configure_allowed_headers(&mut headers, request);
            self.configure_max_age(&mut headers);
        }
    }

    pub fn add_actual_request_headers(
        &self,
        headers: &mut HeaderMap,
        request: &RequestContext<'_>,
    ) {
        let mut headers = ResponseHeaders::new(headers);
        self.configure_allowed_origin(&mut headers, request);

        if headers.contains(header::ACCESS_CONTROL_ALLOW_ORIGIN) {
            self.configure_allow_credentials(&mut headers);
            self.configure_exposed_headers(&mut headers);
        }
    }

    /// Adds `name` to the response's `Vary` header unless already listed.
    pub fn vary_header(&self, headers: &mut HeaderMap, name: &str) {
        ResponseHeaders::new(headers).vary(name);
    }

    fn configure_allowed_origin(
        &self,
        headers: &mut ResponseHeaders<'_>,
        request: &RequestContext<'_>,
    ) {
        match &self.origin_mode {
            OriginMode::Wildcard => headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            OriginMode::Static(origin) => headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin),
            OriginMode::Dynamic => {
                if self.is_origin_allowed(request) {
                    if let Some(origin) = request.origin.filter(|origin| !origin.is_empty()) {
                        headers.set(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                    }
                }
                headers.vary(header::ORIGIN);
            }
        }
    }

    fn configure_allow_credentials(&self, headers: &mut ResponseHeaders<'_>) {
        if self.supports_credentials {
            headers.set(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
    }

    fn configure_allowed_methods(
        &self,
        headers: &mut ResponseHeaders<'_>,
        request: &RequestContext<'_>,
    ) {
        let allow_methods = if self.allowed_methods.is_any() && self.supports_credentials {
            headers.vary(header::ACCESS_CONTROL_REQUEST_METHOD);
            request.access_control_request_method.map(normalize_upper)
        } else {
            self.allowed_methods.header_value()
        };

        if let Some(value) = allow_methods.filter(|value| !value.is_empty()) {
            headers.set(header::ACCESS_CONTROL_ALLOW_METHODS, &value);
        }
    }

    fn configure_allowed_headers(
        &self,
        headers: &mut ResponseHeaders<'_>,
        request: &RequestContext<'_>,
    ) {
        let allow_headers = if self.allowed_headers.is_any() && self.supports_credentials {
            headers.vary(header::ACCESS_CONTROL_REQUEST_HEADERS);
            request.access_control_request_headers.map(str::to_string)
        } else {
            self.allowed_headers.header_value()
        };

        if let Some(value) = allow_headers.filter(|value| !value.is_empty()) {
            headers.set(header::ACCESS_CONTROL_ALLOW_HEADERS, &value);
        }
    }

    fn configure_exposed_headers(&self, headers: &mut ResponseHeaders<'_>) {
        if let Some(value) = self.exposed_headers.header_value() {
            headers.set(header::ACCESS_CONTROL_EXPOSE_HEADERS, &value);
        }
    }

    fn configure_max_age(&self, headers: &mut ResponseHeaders<'_>) {
        if let Some(value) = &self.max_age {
            headers.set(header::ACCESS_CONTROL_MAX_AGE, value);
        }
    }
}

fn is_same_host(origin: &str, request: &RequestContext<'_>) -> bool {
    origin
        .strip_prefix(request.scheme)
        .and_then(|rest| rest.strip_prefix("://"))
        .is_some_and(|host| host == request.host.unwrap_or_default())
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
