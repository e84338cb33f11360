use std::sync::Arc;

use domain::{Product, ProductId, ProductRepository};

use crate::error::{ApplicationError, Result};

/// Loads a single product.
pub struct GetProduct<R: ?Sized> {
    products: Arc<R>,
}

impl<R: ProductRepository + ?Sized> GetProduct<R> {
    pub fn new(products: Arc<R>) -> Self {
        Self { products }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: ProductId) -> Result<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::ProductNotFound)
    }
}
