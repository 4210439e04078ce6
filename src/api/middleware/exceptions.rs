use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::handlers::AppState;
use crate::errors::{expects_json, translate, CaughtError, DebugFlags, TracingSink};

/// Handlers return `Err(CaughtError)`; the error rides along in the response
/// extensions until [`exceptions_middleware`] renders it for the client.
///
/// Without the middleware the client still gets the translated JSON body
/// with both debug flags off.
impl IntoResponse for CaughtError {
    fn into_response(self) -> Response {
        let mut response = translate(&self, DebugFlags::default(), &TracingSink).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Renders errors raised by handlers (and the router's own 405s) through the
/// shared [`ExceptionsHandler`](crate::errors::ExceptionsHandler)
pub async fn exceptions_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let wants_json = expects_json(request.headers());
    let method = request.method().clone();

    let mut response = next.run(request).await;

    if let Some(caught) = response.extensions_mut().remove::<CaughtError>() {
        return state.exceptions.handle(wants_json, &caught);
    }

    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        debug!(method = %method, "Router rejected request method");
        let caught = CaughtError::method_not_allowed(format!(
            "The {} method is not supported for this route.",
            method
        ))
        .with_status(StatusCode::METHOD_NOT_ALLOWED.as_u16());
        return state.exceptions.handle(wants_json, &caught);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caught_error_response_carries_error() {
        let response = CaughtError::authorization("no").into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.extensions().get::<CaughtError>(),
            Some(&CaughtError::authorization("no"))
        );
    }
}
