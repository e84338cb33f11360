use std::sync::Arc;

use domain::{CategoryId, Product, ProductRepository};

use crate::error::Result;

/// Lists products, optionally restricted to one category.
pub struct ListProducts<R: ?Sized> {
    products: Arc<R>,
}

impl<R: ProductRepository + ?Sized> ListProducts<R> {
    pub fn new(products: Arc<R>) -> Self {
        Self { products }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, category: Option<&CategoryId>) -> Result<Vec<Product>> {
        let products = match category {
            Some(category) => self.products.find_by_category(category).await?,
            None => self.products.find_all().await?,
        };
        Ok(products)
    }
}
