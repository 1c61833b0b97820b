use axum::{
    http::Method,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route(
            "/health",
            get(handlers::health_check).fallback(handlers::method_not_allowed),
        )
        // Form data (read only)
        .route(
            "/form-data",
            get(handlers::list_form_data::<S>).fallback(handlers::method_not_allowed),
        )
        // Query lifecycle
        .route(
            "/query",
            post(handlers::create_query::<S>).fallback(handlers::method_not_allowed),
        )
        .route(
            "/query/:id",
            patch(handlers::update_query::<S>)
                .delete(handlers::delete_query::<S>)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::route_not_found)
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
}

/// Router with state and middleware attached, ready to serve.
pub fn build_app<S: Store + 'static>(store: Arc<S>) -> Router {
    create_router()
        .with_state(store)
        .layer(ServiceBuilder::new().layer(cors_layer()))
}
