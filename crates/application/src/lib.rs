//! Application layer: one use case per operation.
//!
//! Use cases hold their repositories behind `Arc<R>` with `R: ?Sized`, so
//! they accept concrete repositories in tests and `dyn` repositories from
//! the container.

pub mod customer;
mod error;
pub mod product;

pub use customer::{CreateCustomer, DeleteCustomer, GetCustomer, UpdateCustomerProfile};
pub use error::{ApplicationError, Result};
pub use product::{
    AdjustStock, CreateProduct, DeleteProduct, GetProduct, ListProducts, ProductPatch,
    ProductQuery, SearchProducts, StockAdjustment, UpdateProduct,
};
