//! OpenAPI documentation for the JSON endpoints.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::health_handler::{HealthResponse, ServiceHealth};
use domain::{UserResponse, SESSION_COOKIE_NAME};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portal API",
        description = "JSON endpoints of the session-authenticated portal."
    ),
    paths(
        crate::handlers::user_handler::list_users,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            UserResponse,
            HealthResponse,
            ServiceHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registered accounts"),
        (name = "Health", description = "Dependency health"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "session_cookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Signed session cookie issued by POST /auth.",
            ))),
        );
    }
}
