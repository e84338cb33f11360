use domain::{CustomerError, ProductError, RepositoryError};
use thiserror::Error;

/// Errors returned by use cases.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Product not found")]
    ProductNotFound,

    #[error("Customer not found")]
    CustomerNotFound,

    #[error("Product with SKU {sku} already exists")]
    DuplicateSku { sku: String },

    #[error("Customer with this email already exists")]
    DuplicateEmail,

    /// Price range whose lower bound is above its upper bound.
    #[error("Minimum price cannot be greater than maximum price")]
    InvalidPriceRange { min: i64, max: i64 },

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Customer(#[from] CustomerError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, ApplicationError>;
