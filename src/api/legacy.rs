//! Legacy product API handlers
//!
//! The first-generation `/api/produto/*` routes. Every selector travels in the JSON
//! body and products are located by `nome`, not by ID. Names are not unique,
//! so when several products share a name the oldest one is used.
//! New clients should use the ID-based routes in [`crate::api::products`].

use crate::api::RouterState;
use crate::catalog::{NewProduct, Product, ProductUpdate};
use crate::error::AppError;
use axum::{extract::State, http::StatusCode, response::Json};

/// Request body shared by all legacy routes: a product, possibly partial
pub type LegacyProductRequest = NewProduct;

/// The `nome` selector of a request
///
/// A missing name never matches, not even a nameless product.
fn selector(request: &LegacyProductRequest) -> Result<&str, AppError> {
    request
        .name
        .as_deref()
        .ok_or_else(|| AppError::ProductNotFound("<sem nome>".to_string()))
}

/// GET /api/produto/listar - List all products, 404 when the catalog is empty
pub async fn listar(State(db): State<RouterState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = db.list().await?;
    if products.is_empty() {
        return Err(AppError::CatalogEmpty);
    }
    Ok(Json(products))
}

/// POST /api/produto/cadastrar - Create a product
pub async fn cadastrar(
    State(db): State<RouterState>,
    Json(request): Json<LegacyProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = db.create(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// DELETE /api/produto/remove - Delete the product with the given name
pub async fn remove(
    State(db): State<RouterState>,
    Json(request): Json<LegacyProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let name = selector(&request)?;
    let product = db
        .delete_by_name(name)
        .await?
        .ok_or_else(|| AppError::ProductNotFound(name.to_string()))?;

    Ok((StatusCode::ACCEPTED, Json(product)))
}

/// POST /api/produto/buscar - Find the product with the given name
pub async fn buscar(
    State(db): State<RouterState>,
    Json(request): Json<LegacyProductRequest>,
) -> Result<Json<Product>, AppError> {
    let name = selector(&request)?;
    let product = db
        .find_by_name(name)
        .await?
        .ok_or_else(|| AppError::ProductNotFound(name.to_string()))?;

    Ok(Json(product))
}

/// PUT /api/produto/alterar - Update price/quantity of the named product
///
/// A `valor` or `quantidade` of zero means "keep the current value".
pub async fn alterar(
    State(db): State<RouterState>,
    Json(request): Json<LegacyProductRequest>,
) -> Result<Json<Product>, AppError> {
    let name = selector(&request)?;
    let update = ProductUpdate::from_zero_as_unset(request.price, request.quantity);
    let product = db
        .update_by_name(name, update)
        .await?
        .ok_or_else(|| AppError::ProductNotFound(name.to_string()))?;

    Ok(Json(product))
}
