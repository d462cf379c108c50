use crate::header_builder::HeaderBuilder;
use crate::headers::{HeaderCollection, Headers};
use crate::policy::CompiledPolicy;
use tracing::trace;

/// Headers for a non-preflight cross-origin request. Empty when the origin is
/// not allowed, so the backend response goes out unmodified.
pub(crate) fn actual_request_headers(policy: &CompiledPolicy, origin: &str) -> Headers {
    let builder = HeaderBuilder::new(policy);
    let Some(matched) = builder.match_origin(origin) else {
        trace!(origin, "actual request origin not allowed; no CORS headers added");
        return Headers::new();
    };

    let mut headers = builder.build_origin_headers(&matched);
    headers.extend(builder.build_exposed_headers());
    headers.into_headers()
}

/// Merges CORS headers into backend headers. CORS values replace backend
/// values with the same name (compared case-insensitively); `Vary` is joined.
pub fn merge(cors: Headers, backend: Headers) -> Headers {
    let mut merged = HeaderCollection::from(backend);
    merged.extend(HeaderCollection::from(cors));
    merged.into_headers()
}

#[cfg(test)]
#[path = "inject_test.rs"]
mod inject_test;
