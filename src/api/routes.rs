use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health, health_live, login, not_found, AppState};
use super::middleware::{exceptions_middleware, logging_middleware};
use super::openapi::ApiDoc;

pub fn create_router(state: AppState) -> Router {
    create_router_with(state, Router::new())
}

/// Build the service router around application routes.
///
/// Every route in `routes` gets the same error rendering as the built-in
/// ones.
pub fn create_router_with(state: AppState, routes: Router<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let login_path = state.exceptions.login_path().to_string();

    Router::new()
        // Health check
        .route("/health", get(health))
        .route("/health/live", get(health_live))
        // Redirect target for unauthenticated browser requests
        .route(&login_path, get(login))
        .merge(routes)
        // OpenAPI documentation
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        // Errors are rendered inside the logging layer so the logged status is the final one
        .layer(middleware::from_fn_with_state(
            state.clone(),
            exceptions_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
