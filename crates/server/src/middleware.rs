use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::warn;

use common::rate_limit::{Decision, RateLimiter};
use common::types::ErrorBody;

pub const TOO_MANY_REQUESTS: &str = "Too many requests, please try again later.";

fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Per-address fixed-window limit for `/api` routes.
pub async fn enforce_rate_limit(State(limiter): State<RateLimiter>, req: Request, next: Next) -> Response {
    let key = client_key(&req);
    match limiter.check(&key) {
        Decision::Allowed { .. } => next.run(req).await,
        Decision::Limited { retry_after } => {
            warn!(client = %key, path = %req.uri().path(), "rate_limited");
            let secs = retry_after.as_secs().max(1);
            let mut res = (StatusCode::TOO_MANY_REQUESTS, Json(ErrorBody { error: TOO_MANY_REQUESTS.into() })).into_response();
            if let Ok(v) = HeaderValue::from_str(&secs.to_string()) {
                res.headers_mut().insert(header::RETRY_AFTER, v);
            }
            res
        }
    }
}

pub fn security_headers() -> [SetResponseHeaderLayer<HeaderValue>; 4] {
    let h = |name: HeaderName, value: &'static str| {
        SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value))
    };
    [
        h(header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        h(header::X_FRAME_OPTIONS, "SAMEORIGIN"),
        h(header::REFERRER_POLICY, "no-referrer"),
        h(header::X_DNS_PREFETCH_CONTROL, "off"),
    ]
}
