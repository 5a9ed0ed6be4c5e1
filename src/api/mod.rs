//! API module
//!
//! Contains HTTP request handlers for the product catalog and the router
//! that wires them together.

pub mod legacy;
pub mod products;

use crate::catalog::ProductDb;
use crate::error::AppError;
use crate::middleware::request_id_middleware;
use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared state handed to every handler: the product store
pub type RouterState = Arc<ProductDb>;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status ("healthy")
    pub status: String,
    /// Package version
    pub version: String,
    /// Human-readable message
    pub message: String,
    /// Number of products currently stored
    pub products: i64,
}

/// Build the application router with all routes and middleware
pub fn router(db: RouterState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health_check))
        // ID-based product API
        .route(
            "/api/produtos",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/produtos/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        // Legacy name-based product API
        .route("/api/produto/listar", get(legacy::listar))
        .route("/api/produto/cadastrar", post(legacy::cadastrar))
        .route("/api/produto/remove", delete(legacy::remove))
        .route("/api/produto/buscar", post(legacy::buscar))
        .route("/api/produto/alterar", put(legacy::alterar))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(db)
}

async fn index() -> &'static str {
    "Api de Produtos"
}

async fn health_check(State(db): State<RouterState>) -> Result<Json<HealthResponse>, AppError> {
    let products = db.count().await?;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Catalog backend is healthy".to_string(),
        products,
    }))
}
