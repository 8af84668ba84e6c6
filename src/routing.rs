//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::json;

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    transaction::{
        delete_transaction_endpoint, list_transactions_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::ACCOUNT_TRANSACTIONS,
            get(list_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .layer(middleware::from_fn(logging_middleware))
        .fallback(get_unknown_route)
        .with_state(state)
}

/// The JSON body returned for routes that do not exist.
async fn get_unknown_route() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response()
}

#[cfg(test)]
mod unknown_route_tests {
    use axum::http::StatusCode;

    use super::get_unknown_route;

    #[tokio::test]
    async fn unknown_route_is_a_json_404() {
        let response = get_unknown_route().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let content_type = response
            .headers()
            .get("content-type")
            .expect("content-type header missing");
        assert_eq!(content_type, "application/json");
    }
}
