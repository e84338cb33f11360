//! HTTP handlers, one module per resource.

pub mod customers;
pub mod health;
pub mod logs;
pub mod metrics;
pub mod products;
