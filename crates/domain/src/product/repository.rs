//! Product persistence contract.

use async_trait::async_trait;
use common::ProductId;

use super::{CategoryId, Product};
use crate::error::RepositoryResult;
use crate::money::Money;

/// Persistence operations for products.
///
/// Collection queries return products ordered by creation time, then ID.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Loads a product by ID.
    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;

    /// Returns every product.
    async fn find_all(&self) -> RepositoryResult<Vec<Product>>;

    /// Returns the products in a category.
    async fn find_by_category(&self, category_id: &CategoryId) -> RepositoryResult<Vec<Product>>;

    /// Inserts a product, replacing any product with the same ID.
    async fn save(&self, product: &Product) -> RepositoryResult<()>;

    /// Replaces an existing product.
    ///
    /// Fails with `RepositoryError::NotFound` when the ID is unknown.
    async fn update(&self, product: &Product) -> RepositoryResult<()>;

    /// Removes a product. Returns whether anything was removed.
    async fn delete(&self, id: ProductId) -> RepositoryResult<bool>;

    /// Loads a product by SKU.
    async fn find_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>>;

    /// Returns products priced within `[min, max]`.
    async fn find_by_price_range(&self, min: Money, max: Money) -> RepositoryResult<Vec<Product>>;

    /// Returns products with no stock.
    async fn find_out_of_stock(&self) -> RepositoryResult<Vec<Product>>;

    /// Returns products with stock in `1..=threshold`.
    async fn find_low_stock(&self, threshold: u32) -> RepositoryResult<Vec<Product>>;
}
