use std::future::Future;
use std::pin::Pin;

use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::http::StatusCode;
use hyper::http::header::{HeaderMap, HeaderName, HeaderValue};
use hyper::service::Service;
use hyper::{Request, Response};
use route_cors_rs::constants::header;
use route_cors_rs::{CorsDecision, Headers, PreflightResponse, RequestContext, merge};
use tracing::{debug, warn};

use super::SharedCors;

type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

pub type CorsBody = Full<Bytes>;

/// Hyper middleware following the "Getting Started with a Server Middleware"
/// guide: https://hyper.rs/guides/1/server/middleware/
#[derive(Clone)]
pub struct RouteCors<S> {
    inner: S,
    cors: SharedCors,
}

impl<S> RouteCors<S> {
    pub fn new(cors: SharedCors, inner: S) -> Self {
        Self { inner, cors }
    }
}

impl<S> Service<Request<Incoming>> for RouteCors<S>
where
    S: Service<Request<Incoming>, Response = Response<CorsBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
{
    type Response = Response<CorsBody>;
    type Error = S::Error;
    type Future = BoxFuture<Result<Self::Response, Self::Error>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let owned_ctx = OwnedRequestContext::from_request(&req);
        let decision = self.cors.evaluate(&owned_ctx.as_request_context());

        match decision {
            CorsDecision::Allow(response) => {
                if !response.method_allowed || !response.headers_allowed {
                    debug!(
                        method_allowed = response.method_allowed,
                        headers_allowed = response.headers_allowed,
                        "preflight answered with restricted lists"
                    );
                }
                Box::pin(async move { Ok(preflight_response(response)) })
            }
            CorsDecision::Forbid => Box::pin(async move { Ok(forbidden()) }),
            CorsDecision::PassThrough(headers) => {
                let inner = self.inner.clone();
                Box::pin(async move {
                    let mut response = inner.call(req).await?;
                    if !headers.is_empty() {
                        apply_headers(response.headers_mut(), headers);
                    }
                    Ok(response)
                })
            }
        }
    }
}

fn preflight_response(preflight: PreflightResponse) -> Response<CorsBody> {
    let status = StatusCode::from_u16(preflight.status).unwrap_or(StatusCode::NO_CONTENT);
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    insert_headers(response.headers_mut(), &preflight.headers);
    response
}

fn forbidden() -> Response<CorsBody> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = StatusCode::FORBIDDEN;
    response
}

/// Adds CORS headers to a backend response, joining any `Vary` it already set.
fn apply_headers(map: &mut HeaderMap, cors: Headers) {
    let mut backend = Headers::new();
    if let Some(vary) = header_value(map, header::VARY) {
        backend.insert(header::VARY.to_string(), vary);
    }
    insert_headers(map, &merge(cors, backend));
}

fn insert_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers {
        match (
            HeaderName::try_from(name.as_str()),
            HeaderValue::from_str(value),
        ) {
            (Ok(header_name), Ok(header_value)) => {
                map.insert(header_name, header_value);
            }
            _ => warn!(name = name.as_str(), "skipping header that is not valid HTTP"),
        }
    }
}

struct OwnedRequestContext {
    method: String,
    origin: Option<String>,
    access_control_request_method: Option<String>,
    access_control_request_headers: Option<String>,
    access_control_request_private_network: bool,
}

impl OwnedRequestContext {
    fn from_request(request: &Request<Incoming>) -> Self {
        let headers = request.headers();

        Self {
            method: request.method().as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
            access_control_request_private_network: headers
                .get(header::ACCESS_CONTROL_REQUEST_PRIVATE_NETWORK)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|value| value.eq_ignore_ascii_case("true")),
        }
    }

    fn as_request_context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: self.access_control_request_method.as_deref(),
            access_control_request_headers: self.access_control_request_headers.as_deref(),
            access_control_request_private_network: self.access_control_request_private_network,
        }
    }
}

/// Joins repeated header lines the way a single comma-separated line reads.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();
    (!values.is_empty()).then(|| values.join(", "))
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;
