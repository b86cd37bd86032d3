use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::core::state::AppState;

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Redirects plain-HTTP requests, as reported by the fronting proxy, to HTTPS.
pub(crate) async fn redirect_to_https(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.https_redirect {
        return next.run(request).await;
    }

    let forwarded_http = request
        .headers()
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("http"));

    if !forwarded_http {
        return next.run(request).await;
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());

    let Some(host) = host else {
        return (StatusCode::BAD_REQUEST, "Missing host header").into_response();
    };

    let path = request
        .uri()
        .path_and_query()
        .map(|path| path.as_str())
        .unwrap_or("/");

    match HeaderValue::try_from(format!("https://{host}{path}")) {
        Ok(location) => {
            tracing::debug!(?location, "redirecting to https");
            (StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, location)]).into_response()
        }
        Err(_) => (StatusCode::BAD_REQUEST, "Invalid host header").into_response(),
    }
}
