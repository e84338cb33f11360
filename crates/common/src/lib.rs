//! Identifier types shared by every layer of the e-commerce backend.

mod types;

pub use types::{CustomerId, ProductId};
