use crate::context::RequestContext;
use crate::headers::Headers;
use crate::inject::actual_request_headers;
use crate::parsed_request::ParsedRequest;
use crate::policy::{CompiledPolicy, CorsPolicy, ValidationError};
use crate::preflight::evaluate_preflight;
use crate::result::CorsDecision;
use tracing::{debug, trace};

/// Core CORS engine that evaluates requests against one route's [`CorsPolicy`].
///
/// Construction validates the policy; evaluation is then infallible, holds no
/// mutable state and may run concurrently from any number of threads. To change
/// the policy, build a new `Cors` and swap it in.
#[derive(Debug, Clone)]
pub struct Cors {
    policy: CompiledPolicy,
}

impl Cors {
    pub fn new(policy: CorsPolicy) -> Result<Self, ValidationError> {
        let policy = policy.compile()?;
        debug!(
            origins = policy.origins.len(),
            credentials = policy.credentials,
            max_age = policy.max_age,
            "cors policy accepted"
        );
        Ok(Self { policy })
    }

    pub fn evaluate(&self, request: &RequestContext<'_>) -> CorsDecision {
        self.evaluate_parsed(&ParsedRequest::new(request))
    }

    pub fn evaluate_parsed(&self, request: &ParsedRequest<'_>) -> CorsDecision {
        let Some(origin) = request.origin else {
            trace!(method = request.method, "no Origin header; not a CORS request");
            return CorsDecision::PassThrough(Headers::new());
        };

        if request.is_preflight {
            evaluate_preflight(&self.policy, request, origin)
        } else {
            CorsDecision::PassThrough(actual_request_headers(&self.policy, origin))
        }
    }

    /// Evaluates a proxied request and merges the result into the backend's
    /// response headers. Preflights are never proxied, so they leave `backend`
    /// as it is.
    pub fn inject(&self, request: &RequestContext<'_>, backend: Headers) -> Headers {
        self.evaluate(request).merge_into(backend)
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
