//! Product entity, its category value object, and the repository contract.

mod category;
mod entity;
mod repository;

pub use category::{CategoryId, ProductCategory};
pub use entity::{NewProduct, Product};
pub use repository::ProductRepository;

use thiserror::Error;

/// Errors raised when a product invariant would be violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// Product name is empty or whitespace.
    #[error("Product name cannot be empty")]
    EmptyName,

    /// Product SKU is empty or whitespace.
    #[error("Product SKU cannot be empty")]
    EmptySku,

    /// Price below zero.
    #[error("Product price cannot be negative")]
    NegativePrice { cents: i64 },

    /// Stock below zero.
    #[error("Product stock quantity cannot be negative")]
    NegativeStock { quantity: i64 },

    /// Stock input larger than the counter can hold.
    #[error("Stock quantity overflow")]
    StockOverflow,

    /// A stock adjustment of zero units.
    #[error("Quantity must be positive")]
    NonPositiveQuantity,

    /// Decrease larger than the available stock.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// Category without an identifier.
    #[error("Category ID is required")]
    MissingCategoryId,

    /// Category name is empty or whitespace.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,
}
