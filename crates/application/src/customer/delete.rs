use std::sync::Arc;

use domain::{CustomerId, CustomerRepository};

use crate::error::{ApplicationError, Result};

/// Removes a customer.
pub struct DeleteCustomer<R: ?Sized> {
    customers: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> DeleteCustomer<R> {
    pub fn new(customers: Arc<R>) -> Self {
        Self { customers }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: CustomerId) -> Result<()> {
        if !self.customers.delete(id).await? {
            return Err(ApplicationError::CustomerNotFound);
        }
        tracing::info!(customer_id = %id, "customer deleted");
        Ok(())
    }
}
