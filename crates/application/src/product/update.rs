use std::sync::Arc;

use domain::{Money, Product, ProductCategory, ProductId, ProductRepository};

use crate::error::{ApplicationError, Result};

/// Fields to change on a product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<ProductCategory>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}

/// Applies a partial update to a product.
pub struct UpdateProduct<R: ?Sized> {
    products: Arc<R>,
}

impl<R: ProductRepository + ?Sized> UpdateProduct<R> {
    pub fn new(products: Arc<R>) -> Self {
        Self { products }
    }

    #[tracing::instrument(skip(self, patch))]
    pub async fn execute(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::ProductNotFound)?;

        if patch.is_empty() {
            return Ok(product);
        }

        if let Some(name) = patch.name {
            product.update_name(name)?;
        }
        if let Some(description) = patch.description {
            product.update_description(description);
        }
        if let Some(price) = patch.price {
            product.update_price(price)?;
        }
        if let Some(category) = patch.category {
            product.update_category(category);
        }

        self.products.update(&product).await?;
        tracing::info!(product_id = %product.id(), "product updated");

        Ok(product)
    }
}
