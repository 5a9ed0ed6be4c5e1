//! Product database operations
//!
//! Handles all database interactions for the product catalog.

use crate::catalog::models::{NewProduct, Product, ProductUpdate};
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const PRODUCT_COLUMNS: &str = "id, name, price, quantity, created_at";

/// Database connection pool for catalog operations
pub struct ProductDb {
    pool: SqlitePool,
}

impl ProductDb {
    /// Initialize database connection pool
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file, or a `sqlite:` URL
    /// * `max_connections` - Upper bound on pooled connections
    ///
    /// # Returns
    /// * `Ok(ProductDb)` if successful
    /// * `Err(AppError)` if connection or migration failed
    pub async fn new(db_path: &str, max_connections: u32) -> Result<Self, AppError> {
        let in_memory = db_path.contains(":memory:");
        let file_path = db_path
            .strip_prefix("sqlite://")
            .or_else(|| db_path.strip_prefix("sqlite:"))
            .unwrap_or(db_path);

        // Ensure parent directory exists
        if !in_memory {
            if let Some(parent) = Path::new(file_path).parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    AppError::Internal(anyhow::anyhow!("Failed to create db directory: {}", e))
                })?;
            }
        }

        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid database path: {}", e)))?
            .create_if_missing(true);

        let pool = pool_options(in_memory, max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to connect to database: {}", e))
            })?;

        info!("Connected to SQLite database at: {}", db_path);

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_products.sql");

        for statement in split_statements(migration_sql) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::Internal(anyhow::anyhow!(
                        "Migration failed: {} - Statement: {}",
                        e,
                        statement.chars().take(100).collect::<String>()
                    ))
                })?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get all products in insertion order
    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rowid ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Number of stored products
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Persist a new product
    ///
    /// The store always assigns the `id` and `created_at`.
    pub async fn create(&self, new: NewProduct) -> Result<Product, AppError> {
        let product = Product::new(new);

        sqlx::query(
            "INSERT INTO products (id, name, price, quantity, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.created_at)
        .execute(&self.pool)
        .await?;

        debug!("Created product: {}", product.id);
        Ok(product)
    }

    /// Get a product by ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Get the first product (in insertion order) with the given name
    ///
    /// Names are not unique; this exists for the name-selected legacy routes.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE name = ? ORDER BY rowid ASC LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Apply a sparse update and return the stored result
    ///
    /// Fields left as `None` keep their current value. Returns `None` when no
    /// product has the given ID.
    pub async fn update(
        &self,
        id: &str,
        update: ProductUpdate,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET price = COALESCE(?, price), quantity = COALESCE(?, quantity) \
             WHERE id = ? RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(update.price)
        .bind(update.quantity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if product.is_some() {
            debug!("Updated product: {}", id);
        }
        Ok(product)
    }

    /// Sparse update of the oldest product with the given name
    ///
    /// Lookup and update run as one statement, so a concurrent delete
    /// yields `None` rather than touching another row.
    pub async fn update_by_name(
        &self,
        name: &str,
        update: ProductUpdate,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET price = COALESCE(?, price), quantity = COALESCE(?, quantity) \
             WHERE id = (SELECT id FROM products WHERE name = ? ORDER BY rowid ASC LIMIT 1) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(update.price)
        .bind(update.quantity)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(product) = &product {
            debug!("Updated product: {}", product.id);
        }
        Ok(product)
    }

    /// Delete the oldest product with the given name and return it
    pub async fn delete_by_name(&self, name: &str) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "DELETE FROM products \
             WHERE id = (SELECT id FROM products WHERE name = ? ORDER BY rowid ASC LIMIT 1) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(product) = &product {
            debug!("Deleted product: {}", product.id);
        }
        Ok(product)
    }

    /// Delete a product and return the removed record
    pub async fn delete(&self, id: &str) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "DELETE FROM products WHERE id = ? RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if product.is_some() {
            debug!("Deleted product: {}", id);
        }
        Ok(product)
    }

}

/// Pool settings for the given database kind
///
/// Every connection to `:memory:` opens its own empty database, so the
/// in-memory pool holds exactly one connection that is never reaped.
fn pool_options(in_memory: bool, max_connections: u32) -> SqlitePoolOptions {
    if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(max_connections.max(1))
    }
}

/// Strip `--` comments from a migration script and split it into statements
fn split_statements(sql: &str) -> Vec<String> {
    let mut cleaned_sql = String::new();
    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        let without_comments = match trimmed.find("--") {
            Some(comment_pos) => &trimmed[..comment_pos],
            None => trimmed,
        };
        cleaned_sql.push_str(without_comments.trim());
        cleaned_sql.push(' ');
    }

    cleaned_sql
        .split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
