use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::core::error::Error;
use crate::core::state::AppState;
use crate::token::UserIdentity;
use crate::types::{EMPLOYEE, request, response};

/// Registers a new account with the `employee` role.
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "users",
    request_body = request::LoginData,
    responses(
        (status = 201, description = "User created", body = response::User),
        (status = 400, description = "Invalid username or password"),
        (status = 409, description = "User already exists"),
    ),
    security(())
)]
#[instrument(skip_all)]
pub(crate) async fn register(
    State(state): State<AppState>,
    Json(params): Json<request::LoginData>,
) -> Result<impl IntoResponse, Error> {
    let user = state
        .user_controller
        .register(&params.username, &params.password, EMPLOYEE)
        .await?;

    Ok((StatusCode::CREATED, Json(response::User::from(&user))))
}

/// Exchanges a username and password for a bearer credential.
#[utoipa::path(
    post,
    path = "/v1/users/login",
    tag = "users",
    request_body = request::LoginData,
    responses(
        (status = 200, description = "Authenticated", body = response::Login),
        (status = 401, description = "Unknown user or wrong password"),
    ),
    security(())
)]
#[instrument(skip_all)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(params): Json<request::LoginData>,
) -> Result<Json<response::Login>, Error> {
    let (user, token) = state
        .user_controller
        .login(&params.username, &params.password)
        .await?;

    Ok(Json(response::Login {
        user: response::User::from(&user),
        token,
    }))
}

#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Caller identity", body = response::Me),
        (status = 401, description = "Missing, invalid or expired credential"),
    )
)]
pub(crate) async fn me(Extension(identity): Extension<UserIdentity>) -> Json<response::Me> {
    Json(response::Me {
        username: identity.username().to_owned(),
        role: identity.role().to_owned(),
    })
}

#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "All registered users", body = [response::User]),
        (status = 401, description = "Missing, invalid or expired credential"),
        (status = 403, description = "Caller is not a manager"),
    )
)]
pub(crate) async fn list(State(state): State<AppState>) -> Json<Vec<response::User>> {
    let users = state.user_controller.list().await;

    Json(users.iter().map(response::User::from).collect())
}

#[utoipa::path(
    put,
    path = "/v1/users/{id}/role",
    tag = "users",
    params(("id" = u32, Path, description = "User id")),
    request_body = request::UpdateRoleData,
    responses(
        (status = 200, description = "Role updated", body = response::User),
        (status = 400, description = "Invalid role"),
        (status = 401, description = "Missing, invalid or expired credential"),
        (status = 403, description = "Caller is not a manager"),
        (status = 404, description = "User not found"),
    )
)]
#[instrument(skip(state, params))]
pub(crate) async fn set_role(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(params): Json<request::UpdateRoleData>,
) -> Result<Json<response::User>, Error> {
    let user = state.user_controller.set_role(id, &params.role).await?;

    Ok(Json(response::User::from(&user)))
}
