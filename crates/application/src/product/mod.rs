//! Product use cases.

mod create;
mod delete;
mod get;
mod list;
mod search;
mod stock;
mod update;

pub use create::CreateProduct;
pub use delete::DeleteProduct;
pub use get::GetProduct;
pub use list::ListProducts;
pub use search::{ProductQuery, SearchProducts};
pub use stock::{AdjustStock, StockAdjustment};
pub use update::{ProductPatch, UpdateProduct};
