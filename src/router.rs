use axum::{routing::get, Router};

use crate::{
    handlers::{
        diagnostics::test_database,
        health_check, hello,
        languages::{get_language, list_languages},
        not_found, root,
    },
    middleware::create_middleware_stack,
    state::AppState,
};

/// Create the Axum router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/hello", get(hello))
        // Language catalog endpoints
        .route("/api/languages", get(list_languages))
        .route("/api/languages/:lang_id", get(get_language))
        // Database diagnostics
        .route("/test", get(test_database))
        .fallback(not_found)
        .with_state(state)
        .layer(create_middleware_stack())
}
