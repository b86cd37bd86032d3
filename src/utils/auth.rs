use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{Response, header};
use axum::middleware::Next;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::token::UserIdentity;

/// Roles allowed through an [`authorize`] stage.
pub(crate) type Roles = &'static [&'static str];

/// Verifies the bearer credential and stores the caller's identity in the
/// request extensions.
pub(crate) async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(Error::NoCredentials)?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or(Error::Unauthorized)?;

    let claims = state.verifier.verify(token)?;

    tracing::debug!(name = %claims.name, role = %claims.role, "authenticated request");

    request.extensions_mut().insert(UserIdentity::from(claims));

    Ok(next.run(request).await)
}

/// Rejects callers whose role claim is not in `roles`. Must run after
/// [`authenticate`].
pub(crate) async fn authorize(
    State(roles): State<Roles>,
    request: Request,
    next: Next,
) -> Result<Response<Body>, Error> {
    let identity = request
        .extensions()
        .get::<UserIdentity>()
        .ok_or(Error::Unauthorized)?;

    if !roles.contains(&identity.role()) {
        tracing::warn!(
            username = identity.username(),
            role = identity.role(),
            "role not permitted"
        );
        return Err(Error::Forbidden);
    }

    Ok(next.run(request).await)
}

fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Some(token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::bearer_token;

    #[test]
    fn parses_bearer_header() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer   abc"), Some("abc"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer a b"), None);
    }
}
