//! CORS decision engine for gateway and proxy data planes.
//!
//! A route's [`CorsPolicy`] is validated once into a [`Cors`] engine. Each
//! request is then evaluated into a [`CorsDecision`]: a terminal preflight
//! response, a 403 for a forbidden preflight origin, or headers to merge into
//! the proxied backend response.

mod allowed_headers;
mod allowed_methods;
pub mod constants;
mod context;
mod cors;
mod exposed_headers;
mod header_builder;
pub mod header_list;
mod headers;
mod inject;
mod origin;
mod parsed_request;
mod policy;
mod preflight;
mod result;
mod util;

pub use allowed_headers::AllowedHeaders;
pub use allowed_methods::AllowedMethods;
pub use context::RequestContext;
pub use cors::Cors;
pub use exposed_headers::ExposedHeaders;
pub use headers::{Headers, header_value};
pub use inject::merge;
pub use origin::{AllowOrigin, OriginMatch, OriginPattern, PatternError, match_any};
pub use parsed_request::ParsedRequest;
pub use policy::{CorsPolicy, ValidationError};
pub use result::{CorsDecision, PreflightResponse};
pub use util::equals_ignore_case;
