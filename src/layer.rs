use crate::constants::{header, method};
use crate::context::OwnedRequestContext;
use crate::cors::Cors;
use crate::options::{CorsOptions, ValidationError};
use http::{Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, trace};

/// Applies a [`Cors`] policy to every request of the wrapped service.
#[derive(Debug, Clone)]
pub struct CorsLayer {
    cors: Arc<Cors>,
}

impl CorsLayer {
    pub fn new(cors: Cors) -> Self {
        Self::from_shared(Arc::new(cors))
    }

    pub fn from_shared(cors: Arc<Cors>) -> Self {
        Self { cors }
    }

    pub fn from_options(options: CorsOptions) -> Result<Self, ValidationError> {
        Cors::new(options).map(Self::new)
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsService {
            inner,
            cors: Arc::clone(&self.cors),
        }
    }
}

/// Middleware answering preflight requests itself and annotating every other response.
///
/// It never rejects a request: a disallowed origin only means no
/// `Access-Control-Allow-Origin` is emitted, and the browser enforces the rest.
#[derive(Debug, Clone)]
pub struct CorsService<S> {
    inner: S,
    cors: Arc<Cors>,
}

impl<S> CorsService<S> {
    pub fn new(inner: S, cors: Arc<Cors>) -> Self {
        Self { inner, cors }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CorsService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let owned_ctx = OwnedRequestContext::from_request(&request);
        let cors = Arc::clone(&self.cors);

        if cors.is_preflight_request(&owned_ctx.as_context()) {
            debug!(
                origin = owned_ctx.origin.as_deref(),
                request_method = owned_ctx.access_control_request_method.as_deref(),
                "answering CORS preflight request"
            );
            let mut response: Response<ResBody> =
                cors.handle_preflight_request(&owned_ctx.as_context());
            cors.vary_header(response.headers_mut(), header::ACCESS_CONTROL_REQUEST_METHOD);
            return Box::pin(async move { Ok(response) });
        }

        let future = self.inner.call(request);
        Box::pin(async move {
            let mut response = future.await?;
            let context = owned_ctx.as_context();

            if context.method == method::OPTIONS {
                cors.vary_header(response.headers_mut(), header::ACCESS_CONTROL_REQUEST_METHOD);
            }
            cors.add_actual_request_headers(response.headers_mut(), &context);
            trace!(
                origin = context.origin,
                status = response.status().as_u16(),
                "annotated response with CORS headers"
            );

            Ok(response)
        })
    }
}

#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;
