//! Customer entity and its repository contract.

mod email;
mod entity;
mod password;
mod repository;

pub use email::Email;
pub use entity::{Customer, NewCustomer};
pub use password::PasswordHash;
pub use repository::CustomerRepository;

use thiserror::Error;

/// Errors raised when a customer invariant would be violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerError {
    /// Customer name is empty or whitespace.
    #[error("Customer name cannot be empty")]
    EmptyName,

    /// Email is not of the form `local@domain`.
    #[error("Invalid email address")]
    InvalidEmail { email: String },

    /// Password shorter than [`PasswordHash::MIN_LENGTH`].
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    /// The password hasher failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}
