//! Domain layer for the e-commerce backend.
//!
//! This crate provides the core business types:
//! - `Product` entity with its `ProductCategory` value object and stock rules
//! - `Customer` entity with validated `Email` and hashed password
//! - Repository traits the infrastructure layer implements
//!
//! Nothing in here knows about HTTP or storage technology.

pub mod customer;
pub mod error;
pub mod money;
pub mod product;

pub use common::{CustomerId, ProductId};
pub use customer::{Customer, CustomerError, CustomerRepository, Email, NewCustomer, PasswordHash};
pub use error::{RepositoryError, RepositoryResult};
pub use money::Money;
pub use product::{
    CategoryId, NewProduct, Product, ProductCategory, ProductError, ProductRepository,
};
