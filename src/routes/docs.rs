//! OpenAPI document for the HTTP surface, served at
//! `/swagger/v1/swagger.json` together with Swagger UI under `/swagger/`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::types::{request, response};

/// Adds the bearer credential security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Credential returned by POST /v1/users/login."))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Shop API", version = "v1"),
    security(("bearer_auth" = [])),
    paths(
        crate::routes::user::register,
        crate::routes::user::login,
        crate::routes::user::me,
        crate::routes::user::list,
        crate::routes::user::set_role,
    ),
    components(schemas(
        request::LoginData,
        request::UpdateRoleData,
        response::User,
        response::Login,
        response::Me,
    )),
    modifiers(&SecurityAddon),
    tags((name = "users", description = "Registration, login and user administration"))
)]
pub(crate) struct ApiDoc;

pub(crate) fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger").url("/swagger/v1/swagger.json", ApiDoc::openapi())
}
