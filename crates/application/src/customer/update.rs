use std::sync::Arc;

use domain::{Customer, CustomerId, CustomerRepository};

use crate::error::{ApplicationError, Result};

/// Changes a customer's name and address. `None` keeps the current value.
pub struct UpdateCustomerProfile<R: ?Sized> {
    customers: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> UpdateCustomerProfile<R> {
    pub fn new(customers: Arc<R>) -> Self {
        Self { customers }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        id: CustomerId,
        name: Option<String>,
        address: Option<String>,
    ) -> Result<Customer> {
        let mut customer = self
            .customers
            .find_by_id(id)
            .await?
            .ok_or(ApplicationError::CustomerNotFound)?;

        let name = name.unwrap_or_else(|| customer.name().to_string());
        let address = address.unwrap_or_else(|| customer.address().to_string());
        customer.update_profile(name, address)?;
        self.customers.update(&customer).await?;
        tracing::info!(customer_id = %id, "customer profile updated");

        Ok(customer)
    }
}
