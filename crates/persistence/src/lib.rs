//! Storage layer: repository implementations behind the domain traits.
//!
//! - `memory` keeps everything in process (default engine)
//! - `postgres` persists through a `sqlx` connection pool
//! - `engine` picks one at startup from a configuration key

pub mod engine;
pub mod error;
pub mod memory;
pub mod postgres;

pub use engine::{Repositories, StorageEngine};
pub use error::{PersistenceError, Result};
pub use memory::{InMemoryCustomerRepository, InMemoryProductRepository};
pub use postgres::{PostgresCustomerRepository, PostgresProductRepository, run_migrations};
