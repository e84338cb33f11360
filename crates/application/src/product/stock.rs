use std::sync::Arc;

use domain::{Product, ProductId, ProductRepository};

use crate::error::{ApplicationError, Result};

/// Direction of a stock change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    Increase,
    Decrease,
}

impl StockAdjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockAdjustment::Increase => "increase",
            StockAdjustment::Decrease => "decrease",
        }
    }
}

/// Adds or removes units of stock.
///
/// The read and the write are separate repository calls. Concurrent
/// decreases of one product can both pass the stock check.
pub struct AdjustStock<R: ?Sized> {
    products: Arc<R>,
}

impl<R: ProductRepository + ?Sized> AdjustStock<R> {
    pub fn new(products: Arc<R>) -> Self {
        Self { products }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        id: ProductId,
        adjustment: StockAdjustment,
        quantity: u32,
    ) -> Result<Product> {
        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::ProductNotFound)?;

        match adjustment {
            StockAdjustment::Increase => product.increase_stock(quantity)?,
            StockAdjustment::Decrease => product.decrease_stock(quantity)?,
        }
        self.products.update(&product).await?;

        metrics::counter!("stock_adjustments_total", "direction" => adjustment.as_str())
            .increment(1);
        tracing::info!(
            product_id = %id,
            direction = adjustment.as_str(),
            quantity,
            stock = product.stock_quantity(),
            "stock adjusted"
        );

        Ok(product)
    }
}
