#![allow(dead_code)]

use super::headers::header_value;
use route_cors_rs::{CorsDecision, Headers, PreflightResponse};

pub fn assert_pass_through(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::PassThrough(headers) => headers,
        other => panic!("expected pass-through decision, got {:?}", other),
    }
}

pub fn assert_allow(decision: CorsDecision) -> PreflightResponse {
    match decision {
        CorsDecision::Allow(response) => response,
        other => panic!("expected allow decision, got {:?}", other),
    }
}

pub fn assert_forbid(decision: CorsDecision) {
    match decision {
        CorsDecision::Forbid => {}
        other => panic!("expected forbid decision, got {:?}", other),
    }
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "unexpected value for header {name}"
    );
}

pub fn assert_no_access_control_headers(headers: &Headers) {
    let leaked: Vec<&String> = headers
        .keys()
        .filter(|name| name.to_ascii_lowercase().starts_with("access-control-"))
        .collect();
    assert!(leaked.is_empty(), "unexpected CORS headers: {:?}", leaked);
}
