use crate::header_builder::HeaderBuilder;
use crate::headers::HeaderCollection;
use crate::parsed_request::ParsedRequest;
use crate::policy::CompiledPolicy;
use crate::result::{CorsDecision, PreflightResponse};
use tracing::debug;

/// Decides a preflight. Only an origin mismatch forbids; method and header
/// misses still produce an allow response listing what the route accepts.
pub(crate) fn evaluate_preflight(
    policy: &CompiledPolicy,
    request: &ParsedRequest<'_>,
    origin: &str,
) -> CorsDecision {
    debug_assert!(request.is_preflight);

    let builder = HeaderBuilder::new(policy);
    let Some(matched) = builder.match_origin(origin) else {
        debug!(origin, "preflight rejected: origin not allowed");
        return CorsDecision::Forbid;
    };

    let method_allowed = request
        .requested_method
        .is_some_and(|method| !method.is_empty() && policy.methods.allows_method(method));
    let headers_allowed = policy
        .allowed_headers
        .allows_headers(&request.requested_headers);
    if !method_allowed || !headers_allowed {
        debug!(
            origin,
            requested_method = request.requested_method,
            method_allowed,
            headers_allowed,
            "preflight allowed with restricted lists"
        );
    }

    let mut headers = HeaderCollection::new();
    headers.extend(builder.build_origin_headers(&matched));
    headers.extend(builder.build_methods_header());
    headers.extend(builder.build_allowed_headers());
    headers.extend(builder.build_private_network_header(request));
    headers.extend(builder.build_max_age_header());
    headers.extend(builder.build_content_length_header());

    CorsDecision::Allow(PreflightResponse {
        headers: headers.into_headers(),
        status: policy.preflight_status,
        method_allowed,
        headers_allowed,
    })
}

#[cfg(test)]
#[path = "preflight_test.rs"]
mod preflight_test;
