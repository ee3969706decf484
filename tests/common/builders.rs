use http::{HeaderMap, Request};
use stack_cors::constants::{header, method};
use stack_cors::{Cors, CorsLayer, CorsOptions, OwnedRequestContext};

/// Policy builder seeded with a typical single-origin application configuration.
pub struct CorsBuilder {
    options: CorsOptions,
}

impl CorsBuilder {
    pub fn new() -> Self {
        Self {
            options: CorsOptions::new()
                .allowed_origins(["http://localhost"])
                .allowed_methods(["delete", "get", "post", "put"])
                .allowed_headers(["x-allowed-header", "x-other-allowed-header"])
                .max_age(None),
        }
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.allowed_origins(origins);
        self
    }

    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.allowed_origin_patterns(patterns);
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.allowed_methods(methods);
        self
    }

    pub fn allowed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.allowed_headers(headers);
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.exposed_headers(headers);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.options = self.options.supports_credentials(enabled);
        self
    }

    pub fn max_age(mut self, value: impl Into<Option<u64>>) -> Self {
        self.options = self.options.max_age(value);
        self
    }

    pub fn options(self) -> CorsOptions {
        self.options
    }

    pub fn build(self) -> Cors {
        Cors::new(self.options).expect("valid CORS configuration")
    }

    pub fn layer(self) -> CorsLayer {
        CorsLayer::new(self.build())
    }
}

/// Builds an `http::Request` the way a browser would send it.
pub struct RequestBuilder {
    method: &'static str,
    uri: String,
    headers: Vec<(&'static str, String)>,
}

impl RequestBuilder {
    fn new(method: &'static str) -> Self {
        Self {
            method,
            uri: "/".into(),
            headers: Vec::new(),
        }
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn origin(self, origin: impl Into<String>) -> Self {
        self.header(header::ORIGIN, origin)
    }

    pub fn request_method(self, method: impl Into<String>) -> Self {
        self.header(header::ACCESS_CONTROL_REQUEST_METHOD, method)
    }

    pub fn request_headers(self, headers: impl Into<String>) -> Self {
        self.header(header::ACCESS_CONTROL_REQUEST_HEADERS, headers)
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn build(self) -> Request<String> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        builder.body(String::new()).expect("valid request")
    }

    pub fn context(self) -> OwnedRequestContext {
        OwnedRequestContext::from_request(&self.build())
    }

    /// Headers `cors` adds to an empty actual-request response.
    pub fn actual_headers(self, cors: &Cors) -> HeaderMap {
        let context = self.context();
        let mut headers = HeaderMap::new();
        cors.add_actual_request_headers(&mut headers, &context.as_context());
        headers
    }

    /// Headers `cors` adds to an empty preflight response.
    pub fn preflight_headers(self, cors: &Cors) -> HeaderMap {
        let context = self.context();
        let mut headers = HeaderMap::new();
        cors.add_preflight_request_headers(&mut headers, &context.as_context());
        headers
    }
}

pub fn cors() -> CorsBuilder {
    CorsBuilder::new()
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::new(method::GET)
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::new(method::OPTIONS)
}

pub fn request(method: &'static str) -> RequestBuilder {
    RequestBuilder::new(method)
}
