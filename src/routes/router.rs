use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
    routing::{MethodRouter, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info_span;

use crate::core::state::AppState;
use crate::routes::{docs, user};
use crate::types::MANAGER;
use crate::utils::auth::{self, Roles};
use crate::utils::https;

const MANAGERS: Roles = &[MANAGER];

/// Builds the application with its fixed request pipeline, outermost first:
///
/// 1. tracing
/// 2. HTTPS redirection (when enabled)
/// 3. response compression
/// 4. routing
/// 5. CORS
/// 6. authentication
/// 7. authorization
/// 8. the endpoint itself
///
/// Stages 6 and 7 only wrap the routes that need them.
pub fn app(state: AppState) -> Router {
    // /v1/users/...
    let user_router = Router::new()
        .route(
            "/",
            post(user::register).merge(restricted(&state, MANAGERS, get(user::list))),
        )
        .route("/login", post(user::login))
        .route("/me", authenticated(&state, get(user::me)))
        .route("/{id}/role", restricted(&state, MANAGERS, put(user::set_role)));

    Router::new()
        .route("/", get(|| async { "Shop API" }))
        .nest("/v1/users", user_router)
        .merge(docs::swagger_ui())
        .route_layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                        let matched_path = request
                            .extensions()
                            .get::<MatchedPath>()
                            .map(MatchedPath::as_str);

                        info_span!(
                            "request",
                            method = ?request.method(),
                            uri = %request.uri(),
                            matched_path,
                        )
                    }),
                )
                .layer(middleware::from_fn_with_state(
                    state,
                    https::redirect_to_https,
                ))
                .layer(CompressionLayer::new()),
        )
}

fn authenticated(
    state: &AppState,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    route.route_layer(middleware::from_fn_with_state(
        state.clone(),
        auth::authenticate,
    ))
}

fn restricted(
    state: &AppState,
    roles: Roles,
    route: MethodRouter<AppState>,
) -> MethodRouter<AppState> {
    route.route_layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(
                state.clone(),
                auth::authenticate,
            ))
            .layer(middleware::from_fn_with_state(roles, auth::authorize)),
    )
}
