use std::sync::Arc;

use domain::{Customer, CustomerId, CustomerRepository};

use crate::error::{ApplicationError, Result};

/// Loads a single customer.
pub struct GetCustomer<R: ?Sized> {
    customers: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> GetCustomer<R> {
    pub fn new(customers: Arc<R>) -> Self {
        Self { customers }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: CustomerId) -> Result<Customer> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::CustomerNotFound)
    }
}
