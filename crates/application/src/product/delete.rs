use std::sync::Arc;

use domain::{ProductId, ProductRepository};

use crate::error::{ApplicationError, Result};

/// Removes a product.
pub struct DeleteProduct<R: ?Sized> {
    products: Arc<R>,
}

impl<R: ProductRepository + ?Sized> DeleteProduct<R> {
    pub fn new(products: Arc<R>) -> Self {
        Self { products }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: ProductId) -> Result<()> {
        if !self.products.delete(id).await? {
            return Err(ApplicationError::ProductNotFound);
        }
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}
