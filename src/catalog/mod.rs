//! Catalog module
//!
//! Handles product storage using a SQLite database.

pub mod db;
pub mod models;

pub use db::ProductDb;
pub use models::{NewProduct, Product, ProductId, ProductUpdate};
