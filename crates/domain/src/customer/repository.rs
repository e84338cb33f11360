//! Customer persistence contract.

use async_trait::async_trait;
use common::CustomerId;

use super::{Customer, Email};
use crate::error::RepositoryResult;

/// Persistence operations for customers.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Inserts a customer, replacing any customer with the same ID.
    async fn save(&self, customer: &Customer) -> RepositoryResult<()>;

    /// Loads a customer by ID.
    async fn find_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;

    /// Loads a customer by normalized email.
    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<Customer>>;

    /// Replaces an existing customer.
    ///
    /// Fails with `RepositoryError::NotFound` when the ID is unknown.
    async fn update(&self, customer: &Customer) -> RepositoryResult<()>;

    /// Removes a customer. Returns whether anything was removed.
    async fn delete(&self, id: CustomerId) -> RepositoryResult<bool>;
}
