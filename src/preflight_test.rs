use super::*;
use crate::constants::header;
use crate::context::RequestContext;
use crate::headers::header_value;
use crate::policy::CorsPolicy;

fn compiled(policy: CorsPolicy) -> CompiledPolicy {
    policy.compile().expect("valid policy")
}

fn preflight<'a>(origin: &'a str, method: &'a str, headers: Option<&'a str>) -> RequestContext<'a> {
    RequestContext {
        method: "OPTIONS",
        origin: Some(origin),
        access_control_request_method: Some(method),
        access_control_request_headers: headers,
        access_control_request_private_network: false,
    }
}

fn expect_allow(decision: CorsDecision) -> PreflightResponse {
    match decision {
        CorsDecision::Allow(response) => response,
        other => panic!("expected allow decision, got {:?}", other),
    }
}

mod evaluate_preflight {
    use super::*;

    #[test]
    fn matched_origin_should_allow_with_full_header_set() {
        // Arrange
        let policy = compiled(
            CorsPolicy::new()
                .allow_origins(["https://foo.example"])
                .allow_methods(["GET", "PUT"])
                .allow_headers(["X-Trace"]),
        );
        let ctx = preflight("https://foo.example", "PUT", Some("x-trace"));

        // Act
        let response = expect_allow(evaluate_preflight(
            &policy,
            &ParsedRequest::new(&ctx),
            "https://foo.example",
        ));

        // Assert
        assert_eq!(response.status, 204);
        assert!(response.method_allowed);
        assert!(response.headers_allowed);
        let names: Vec<&str> = response.headers.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec![
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                header::VARY,
                header::ACCESS_CONTROL_ALLOW_METHODS,
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                header::ACCESS_CONTROL_MAX_AGE,
                header::CONTENT_LENGTH,
            ]
        );
    }

    #[test]
    fn unmatched_origin_should_forbid() {
        // Arrange
        let policy = compiled(CorsPolicy::new().allow_origins(["https://foo.example"]));
        let ctx = preflight("https://bar.example", "GET", None);

        // Act
        let decision = evaluate_preflight(&policy, &ParsedRequest::new(&ctx), "https://bar.example");

        // Assert
        assert_eq!(decision, CorsDecision::Forbid);
    }

    #[test]
    fn method_miss_should_still_allow_and_flag() {
        // Arrange
        let policy = compiled(
            CorsPolicy::new()
                .allow_origins(["https://foo.example"])
                .allow_methods(["GET"]),
        );
        let ctx = preflight("https://foo.example", "DELETE", None);

        // Act
        let response = expect_allow(evaluate_preflight(
            &policy,
            &ParsedRequest::new(&ctx),
            "https://foo.example",
        ));

        // Assert
        assert!(!response.method_allowed);
        assert!(response.headers_allowed);
        assert_eq!(
            header_value(&response.headers, header::ACCESS_CONTROL_ALLOW_METHODS),
            Some("GET")
        );
    }

    #[test]
    fn header_miss_should_still_allow_and_flag() {
        // Arrange
        let policy = compiled(
            CorsPolicy::new()
                .allow_origins(["https://foo.example"])
                .allow_methods(["GET"])
                .allow_headers(["X-Trace"]),
        );
        let ctx = preflight("https://foo.example", "GET", Some("X-Trace, X-Debug"));

        // Act
        let response = expect_allow(evaluate_preflight(
            &policy,
            &ParsedRequest::new(&ctx),
            "https://foo.example",
        ));

        // Assert
        assert!(response.method_allowed);
        assert!(!response.headers_allowed);
    }

    #[test]
    fn configured_status_should_be_used() {
        // Arrange
        let policy = compiled(
            CorsPolicy::new()
                .allow_origins(["*"])
                .preflight_status(200),
        );
        let ctx = preflight("https://foo.example", "GET", None);

        // Act
        let response = expect_allow(evaluate_preflight(
            &policy,
            &ParsedRequest::new(&ctx),
            "https://foo.example",
        ));

        // Assert
        assert_eq!(response.status, 200);
        assert_eq!(
            header_value(&response.headers, header::CONTENT_LENGTH),
            Some("0")
        );
    }

    #[test]
    fn wildcard_lists_should_be_echoed_without_credentials() {
        // Arrange
        let policy = compiled(
            CorsPolicy::new()
                .allow_origins(["*"])
                .allow_methods(["*"])
                .allow_headers(["*"]),
        );
        let ctx = preflight("https://foo.example", "PURGE", Some("X-Anything"));

        // Act
        let response = expect_allow(evaluate_preflight(
            &policy,
            &ParsedRequest::new(&ctx),
            "https://foo.example",
        ));

        // Assert
        assert!(response.method_allowed && response.headers_allowed);
        assert_eq!(
            header_value(&response.headers, header::ACCESS_CONTROL_ALLOW_METHODS),
            Some("*")
        );
        assert_eq!(
            header_value(&response.headers, header::ACCESS_CONTROL_ALLOW_HEADERS),
            Some("*")
        );
    }

    #[test]
    fn empty_request_method_should_never_be_allowed() {
        // Arrange
        let policy = compiled(
            CorsPolicy::new()
                .allow_origins(["https://foo.example"])
                .allow_methods(["*"]),
        );
        let ctx = preflight("https://foo.example", "", None);

        // Act
        let response = expect_allow(evaluate_preflight(
            &policy,
            &ParsedRequest::new(&ctx),
            "https://foo.example",
        ));

        // Assert
        assert!(!response.method_allowed);
        assert!(response.headers_allowed);
    }
}
