use utoipa::OpenApi;

use crate::errors::{ErrorKind, ErrorPayload, ErrorResponse, UnauthenticatedBody};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Apiato Core",
        version = "0.1.0",
        description = "Centralized error rendering for JSON APIs. Every unhandled error is returned to JSON clients as an ErrorResponse whose status_code matches the HTTP status.",
        contact(
            name = "Apiato Core API",
        )
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::health_live,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorPayload,
            ErrorKind,
            UnauthenticatedBody,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_schemas_published() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        assert!(schemas["ErrorResponse"].is_object());
        assert!(schemas["UnauthenticatedBody"].is_object());
        assert!(doc["paths"]["/health"].is_object());
    }
}
