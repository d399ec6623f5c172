//! Request ID middleware.
//!
//! Every request runs inside a span tagged with its request ID, so the
//! trip and invite events logged by handlers can be correlated.

use axum::{
    body::Body,
    http::{header::HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Request ID stored in request extensions.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Uses the caller's `X-Request-ID` when it is a sane value, else a new UUID.
fn request_id_from(req: &Request<Body>) -> String {
    req.headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Middleware that extracts or generates a request ID, runs the request in
/// a span carrying it, and echoes it in the response.
pub async fn trace_id(mut req: Request<Body>, next: Next) -> Response {
    let request_id = request_id_from(&req);
    req.extensions_mut().insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        path = %req.uri().path(),
    );

    let start = Instant::now();
    let mut response = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );
    });

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static("x-request-id"), header_value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_id(id: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/v1/trips");
        if let Some(id) = id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_request_id_from_header() {
        let req = request_with_id(Some("req-123_abc.xyz"));
        assert_eq!(request_id_from(&req), "req-123_abc.xyz");
    }

    #[test]
    fn test_request_id_generated_when_missing() {
        let id = request_id_from(&request_with_id(None));
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_request_id_generated_when_oversized() {
        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        let id = request_id_from(&request_with_id(Some(&long)));
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
