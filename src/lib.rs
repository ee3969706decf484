//! CORS policy evaluation for HTTP services.
//!
//! [`Cors`] turns a [`CorsOptions`] configuration into an immutable policy that decides,
//! per request, which `Access-Control-*` and `Vary` headers a response carries.
//! [`CorsLayer`] wraps a `tower` service with that policy: preflight requests are
//! answered directly with `204 No Content`, every other response is annotated.

mod allowed_headers;
mod allowed_methods;
pub mod config;
pub mod constants;
mod context;
mod cors;
mod exposed_headers;
mod headers;
mod layer;
mod options;
mod origin;
mod util;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use config::ConfigError;
pub use context::{OwnedRequestContext, RequestContext};
pub use cors::Cors;
pub use exposed_headers::ExposedHeaders;
pub use headers::ResponseHeaders;
pub use layer::{CorsLayer, CorsService};
pub use options::{CorsOptions, ValidationError};
pub use origin::{AllowedOrigins, OriginMode, OriginPattern};
