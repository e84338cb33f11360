use std::sync::Arc;

use domain::{Money, Product, ProductRepository};

use crate::error::{ApplicationError, Result};

/// Product lookups beyond listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductQuery {
    BySku(String),
    /// Inclusive on both ends.
    ByPriceRange { min: Money, max: Money },
    OutOfStock,
    /// Products with `0 < stock <= threshold`.
    LowStock { threshold: u32 },
}

/// Runs a [`ProductQuery`].
pub struct SearchProducts<R: ?Sized> {
    products: Arc<R>,
}

impl<R: ProductRepository + ?Sized> SearchProducts<R> {
    pub fn new(products: Arc<R>) -> Self {
        Self { products }
    }

    /// A `BySku` query with no match fails with `ProductNotFound`.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, query: ProductQuery) -> Result<Vec<Product>> {
        match query {
            ProductQuery::BySku(sku) => {
                let product = self
                    .products
                    .find_by_sku(&sku)
                    .await?
                    .ok_or(ApplicationError::ProductNotFound)?;
                Ok(vec![product])
            }
            ProductQuery::ByPriceRange { min, max } => {
                if min > max {
                    return Err(ApplicationError::InvalidPriceRange {
                        min: min.cents(),
                        max: max.cents(),
                    });
                }
                Ok(self.products.find_by_price_range(min, max).await?)
            }
            ProductQuery::OutOfStock => Ok(self.products.find_out_of_stock().await?),
            ProductQuery::LowStock { threshold } => {
                Ok(self.products.find_low_stock(threshold).await?)
            }
        }
    }
}
