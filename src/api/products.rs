//! Product API handlers
//!
//! REST endpoints that select a product by its ID in the path.

use crate::api::RouterState;
use crate::catalog::{NewProduct, Product, ProductId, ProductUpdate};
use crate::error::AppError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

/// GET /api/produtos - List all products
pub async fn list_products(
    State(db): State<RouterState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = db.list().await?;
    Ok(Json(products))
}

/// POST /api/produtos - Create a new product
pub async fn create_product(
    State(db): State<RouterState>,
    Json(request): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = db.create(request).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/produtos/:id - Get a specific product
pub async fn get_product(
    State(db): State<RouterState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = db
        .find_by_id(&id)
        .await?
        .ok_or(AppError::ProductNotFound(id))?;

    Ok(Json(product))
}

/// PUT /api/produtos/:id - Update price and/or quantity
pub async fn update_product(
    State(db): State<RouterState>,
    Path(id): Path<ProductId>,
    Json(request): Json<ProductUpdate>,
) -> Result<Json<Product>, AppError> {
    let product = db
        .update(&id, request)
        .await?
        .ok_or(AppError::ProductNotFound(id))?;

    Ok(Json(product))
}

/// DELETE /api/produtos/:id - Delete a product
pub async fn delete_product(
    State(db): State<RouterState>,
    Path(id): Path<ProductId>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = db
        .delete(&id)
        .await?
        .ok_or(AppError::ProductNotFound(id))?;

    Ok((StatusCode::ACCEPTED, Json(product)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductDb;
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn create_test_state() -> (RouterState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let db = ProductDb::new(db_path.to_str().unwrap(), 5)
            .await
            .expect("Failed to create test database");
        (Arc::new(db), temp_dir)
    }

    fn mouse() -> NewProduct {
        NewProduct {
            name: Some("Mouse".to_string()),
            price: 100.0,
            quantity: 50,
        }
    }

    #[tokio::test]
    async fn test_list_products_empty() {
        let (state, _temp_dir) = create_test_state().await;
        let result = list_products(State(state)).await;
        assert!(result.is_ok());
        assert!(result.unwrap().0.is_empty());
    }

    #[tokio::test]
    async fn test_create_product() {
        let (state, _temp_dir) = create_test_state().await;
        let (status, product) = create_product(State(state.clone()), Json(mouse()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(product.name.as_deref(), Some("Mouse"));
        assert!(!product.id.is_empty());

        let list = list_products(State(state)).await.unwrap().0;
        assert_eq!(list.len(), 1);
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let (state, _temp_dir) = create_test_state().await;
        let result = get_product(State(state), Path("nonexistent".to_string())).await;
        match result.unwrap_err() {
            AppError::ProductNotFound(id) => assert_eq!(id, "nonexistent"),
            other => panic!("Expected ProductNotFound error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_product_zero_is_a_real_value() {
        let (state, _temp_dir) = create_test_state().await;
        let (_, Json(created)) = create_product(State(state.clone()), Json(mouse()))
            .await
            .unwrap();

        let request = ProductUpdate {
            price: Some(0.0),
            quantity: None,
        };
        let updated = update_product(State(state), Path(created.id.clone()), Json(request))
            .await
            .unwrap()
            .0;
        assert_eq!(updated.price, 0.0);
        assert_eq!(updated.quantity, 50);
    }

    #[tokio::test]
    async fn test_update_product_not_found() {
        let (state, _temp_dir) = create_test_state().await;
        let result = update_product(
            State(state),
            Path("nonexistent".to_string()),
            Json(ProductUpdate::default()),
        )
        .await;
        assert!(matches!(result, Err(AppError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_product() {
        let (state, _temp_dir) = create_test_state().await;
        let (_, Json(created)) = create_product(State(state.clone()), Json(mouse()))
            .await
            .unwrap();

        let (status, Json(deleted)) =
            delete_product(State(state.clone()), Path(created.id.clone()))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(deleted, created);

        let result = get_product(State(state.clone()), Path(created.id.clone())).await;
        assert!(result.is_err());
        let result = delete_product(State(state), Path(created.id)).await;
        assert!(result.is_err());
    }
}
