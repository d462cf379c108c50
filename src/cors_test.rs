use super::*;
use crate::constants::{header, method};
use crate::headers::header_value;
use crate::result::PreflightResponse;

fn request<'a>(
    method: &'a str,
    origin: Option<&'a str>,
    acrm: Option<&'a str>,
    acrh: Option<&'a str>,
) -> RequestContext<'a> {
    RequestContext {
        method,
        origin,
        access_control_request_method: acrm,
        access_control_request_headers: acrh,
        access_control_request_private_network: false,
    }
}

fn cors_with(policy: CorsPolicy) -> Cors {
    Cors::new(policy).expect("valid CORS configuration")
}

mod new {
    use super::*;

    #[test]
    fn should_reject_invalid_policy() {
        // Arrange
        let policy = CorsPolicy::new()
            .allow_origins(["*"])
            .allow_credentials(true);

        // Act
        let result = Cors::new(policy);

        // Assert
        assert!(matches!(
            result,
            Err(ValidationError::CredentialsWithWildcard { .. })
        ));
    }
}

mod evaluate {
    use super::*;

    #[test]
    fn missing_origin_should_pass_through_without_headers() {
        // Arrange
        let cors = cors_with(CorsPolicy::new().allow_origins(["*"]));

        // Act
        let decision = cors.evaluate(&request(method::GET, None, None, None));

        // Assert
        assert_eq!(decision, CorsDecision::PassThrough(Headers::new()));
        assert_eq!(decision.status(), None);
        assert!(!decision.is_terminal());
    }

    #[test]
    fn preflight_without_origin_should_pass_through() {
        // Arrange
        let cors = cors_with(CorsPolicy::new().allow_origins(["https://foo.example"]));

        // Act
        let decision = cors.evaluate(&request(method::OPTIONS, None, Some(method::GET), None));

        // Assert
        assert_eq!(decision, CorsDecision::PassThrough(Headers::new()));
    }

    #[test]
    fn preflight_with_matching_origin_should_allow() {
        // Arrange
        let cors = cors_with(
            CorsPolicy::new()
                .allow_origins(["https://foo.example"])
                .allow_methods([method::GET]),
        );

        // Act
        let decision = cors.evaluate(&request(
            method::OPTIONS,
            Some("https://foo.example"),
            Some(method::GET),
            None,
        ));

        // Assert
        assert!(matches!(
            decision,
            CorsDecision::Allow(PreflightResponse { status: 204, .. })
        ));
        assert!(decision.is_terminal());
    }

    #[test]
    fn preflight_with_foreign_origin_should_forbid() {
        // Arrange
        let cors = cors_with(CorsPolicy::new().allow_origins(["https://foo.example"]));

        // Act
        let decision = cors.evaluate(&request(
            method::OPTIONS,
            Some("https://bar.example"),
            Some(method::GET),
            None,
        ));

        // Assert
        assert_eq!(decision, CorsDecision::Forbid);
        assert_eq!(decision.status(), Some(403));
        assert_eq!(decision.headers(), None);
        assert!(decision.is_terminal());
    }

    #[test]
    fn bare_options_should_be_handled_as_actual_request() {
        // Arrange
        let cors = cors_with(
            CorsPolicy::new()
                .allow_origins(["https://foo.example"])
                .allow_methods([method::GET]),
        );

        // Act
        let decision = cors.evaluate(&request(
            method::OPTIONS,
            Some("https://foo.example"),
            None,
            None,
        ));

        // Assert
        let CorsDecision::PassThrough(headers) = decision else {
            panic!("expected pass-through decision");
        };
        assert_eq!(
            header_value(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some("https://foo.example")
        );
        assert_eq!(header_value(&headers, header::ACCESS_CONTROL_ALLOW_METHODS), None);
    }

    #[test]
    fn bare_options_with_foreign_origin_should_not_forbid() {
        // Arrange
        let cors = cors_with(CorsPolicy::new().allow_origins(["https://foo.example"]));

        // Act
        let decision = cors.evaluate(&request(
            method::OPTIONS,
            Some("https://bar.example"),
            None,
            None,
        ));

        // Assert
        assert_eq!(decision, CorsDecision::PassThrough(Headers::new()));
    }

    #[test]
    fn lowercase_options_method_should_reach_the_backend() {
        // Arrange
        let cors = cors_with(CorsPolicy::new().allow_origins(["https://foo.example"]));

        // Act
        let decision = cors.evaluate(&request(
            "options",
            Some("https://bar.example"),
            Some(method::GET),
            None,
        ));

        // Assert
        assert_eq!(decision, CorsDecision::PassThrough(Headers::new()));
    }

    #[test]
    fn empty_request_method_from_foreign_origin_should_forbid() {
        // Arrange
        let cors = cors_with(CorsPolicy::new().allow_origins(["https://foo.example"]));

        // Act
        let decision = cors.evaluate(&request(
            method::OPTIONS,
            Some("https://bar.example"),
            Some(""),
            None,
        ));

        // Assert
        assert_eq!(decision, CorsDecision::Forbid);
    }

    #[test]
    fn actual_request_should_pass_through_with_cors_headers() {
        // Arrange
        let cors = cors_with(CorsPolicy::new().allow_origins(["*"]));

        // Act
        let decision = cors.evaluate(&request(
            method::GET,
            Some("https://foo.example"),
            None,
            None,
        ));

        // Assert
        let headers = decision.headers().expect("pass-through carries headers");
        assert_eq!(
            header_value(headers, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some("*")
        );
        assert_eq!(
            header_value(headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            None
        );
    }
}

mod inject {
    use super::*;

    #[test]
    fn should_merge_into_backend_headers() {
        // Arrange
        let cors = cors_with(
            CorsPolicy::new()
                .allow_origins(["https://foo.example"])
                .expose_headers(["X-Total-Count"]),
        );
        let mut backend = Headers::new();
        backend.insert("Content-Type".into(), "application/json".into());
        backend.insert("Vary".into(), "Accept-Encoding".into());

        // Act
        let merged = cors.inject(
            &request(method::GET, Some("https://foo.example"), None, None),
            backend,
        );

        // Assert
        assert_eq!(header_value(&merged, "Content-Type"), Some("application/json"));
        assert_eq!(header_value(&merged, header::VARY), Some("Accept-Encoding, Origin"));
        assert_eq!(
            header_value(&merged, header::ACCESS_CONTROL_EXPOSE_HEADERS),
            Some("X-Total-Count")
        );
    }

    #[test]
    fn should_not_touch_backend_headers_for_preflight() {
        // Arrange
        let cors = cors_with(CorsPolicy::new().allow_origins(["*"]));
        let mut backend = Headers::new();
        backend.insert("X-Backend".into(), "1".into());

        // Act
        let merged = cors.inject(
            &request(
                method::OPTIONS,
                Some("https://foo.example"),
                Some(method::GET),
                None,
            ),
            backend.clone(),
        );

        // Assert
        assert_eq!(merged, backend);
    }
}
