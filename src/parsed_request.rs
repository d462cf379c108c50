use crate::constants::method;
use crate::context::RequestContext;
use crate::header_list::split_list;

/// Normalized, read-only view of one request, built once before evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest<'a> {
    pub origin: Option<&'a str>,
    pub method: &'a str,
    /// `OPTIONS` carrying an `Access-Control-Request-Method` header, even an
    /// empty one. A bare `OPTIONS` is routed like any other request.
    pub is_preflight: bool,
    pub requested_method: Option<&'a str>,
    pub requested_headers: Vec<&'a str>,
    pub requests_private_network: bool,
}

impl<'a> ParsedRequest<'a> {
    pub fn new(request: &RequestContext<'a>) -> Self {
        let origin = request
            .origin
            .map(str::trim)
            .filter(|origin| !origin.is_empty());
        let requested_method = request.access_control_request_method.map(str::trim);
        let is_preflight = request.method == method::OPTIONS && requested_method.is_some();

        if !is_preflight {
            return Self {
                origin,
                method: request.method,
                is_preflight,
                requested_method: None,
                requested_headers: Vec::new(),
                requests_private_network: false,
            };
        }

        Self {
            origin,
            method: request.method,
            is_preflight,
            requested_method,
            requested_headers: request
                .access_control_request_headers
                .map(split_list)
                .unwrap_or_default(),
            requests_private_network: request.access_control_request_private_network,
        }
    }
}

impl<'a> From<&RequestContext<'a>> for ParsedRequest<'a> {
    fn from(request: &RequestContext<'a>) -> Self {
        Self::new(request)
    }
}

#[cfg(test)]
#[path = "parsed_request_test.rs"]
mod parsed_request_test;
