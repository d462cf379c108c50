use crate::constants::FORBIDDEN_STATUS;
use crate::headers::Headers;
use crate::inject::merge;

/// Terminal response for an accepted preflight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreflightResponse {
    pub headers: Headers,
    pub status: u16,
    /// Whether `Access-Control-Request-Method` is in the allow-list. The response
    /// is still sent when this is false; the browser enforces the list.
    pub method_allowed: bool,
    pub headers_allowed: bool,
}

/// Overall decision returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// Send the preflight response to the client; never proxy the request.
    Allow(PreflightResponse),
    /// Answer 403 with no CORS headers; never proxy the request.
    Forbid,
    /// Proxy the request and merge these headers (possibly none) into the
    /// backend response.
    PassThrough(Headers),
}

impl CorsDecision {
    /// Status the gateway must answer with, or `None` to keep the backend's.
    pub fn status(&self) -> Option<u16> {
        match self {
            CorsDecision::Allow(response) => Some(response.status),
            CorsDecision::Forbid => Some(FORBIDDEN_STATUS),
            CorsDecision::PassThrough(_) => None,
        }
    }

    pub fn headers(&self) -> Option<&Headers> {
        match self {
            CorsDecision::Allow(response) => Some(&response.headers),
            CorsDecision::Forbid => None,
            CorsDecision::PassThrough(headers) => Some(headers),
        }
    }

    /// True when the exchange ends at the gateway.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, CorsDecision::PassThrough(_))
    }

    /// Merges pass-through headers into a backend response. Terminal decisions
    /// leave `backend` untouched.
    pub fn merge_into(self, backend: Headers) -> Headers {
        match self {
            CorsDecision::PassThrough(headers) => merge(headers, backend),
            CorsDecision::Allow(_) | CorsDecision::Forbid => backend,
        }
    }
}
