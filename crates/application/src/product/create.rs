use std::sync::Arc;

use domain::{NewProduct, Product, ProductRepository};

use crate::error::{ApplicationError, Result};

/// Creates a product with a unique SKU.
///
/// The SKU lookup runs before the insert. Against two concurrent creates only
/// the Postgres `UNIQUE` constraint holds.
pub struct CreateProduct<R: ?Sized> {
    products: Arc<R>,
}

impl<R: ProductRepository + ?Sized> CreateProduct<R> {
    pub fn new(products: Arc<R>) -> Self {
        Self { products }
    }

    #[tracing::instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn execute(&self, input: NewProduct) -> Result<Product> {
        let product = Product::new(input)?;

        if self.products.find_by_sku(product.sku()).await?.is_some() {
            return Err(ApplicationError::DuplicateSku {
                sku: product.sku().to_string(),
            });
        }

        self.products.save(&product).await?;

        metrics::counter!("products_created_total").increment(1);
        tracing::info!(
            product_id = %product.id(),
            sku = product.sku(),
            category = %product.category().id(),
            "product created"
        );

        Ok(product)
    }
}
