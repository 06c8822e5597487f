//! JSON view-model endpoints.
//!
//! Every handler is stateless: the page posts the snapshot it fetched from the
//! backend and gets back the derived view. Nothing is cached between calls.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod request_id;

use std::sync::Arc;

use axum::{body::Body, http::Request, middleware, routing::{get, post}, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState { pub config: Arc<AppConfig> }

impl AppState {
    pub fn new(config: AppConfig) -> Self { Self { config: Arc::new(config) } }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/orders/progress", post(handlers::order_progress))
        .route("/api/v1/products/resolve", post(handlers::resolve_variant))
        .route("/api/v1/variants/availability", post(handlers::variant_availability))
        .route("/api/v1/cart/totals", post(handlers::cart_totals))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
