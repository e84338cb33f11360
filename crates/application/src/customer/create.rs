use std::sync::Arc;

use domain::{Customer, CustomerRepository, NewCustomer};

use crate::error::{ApplicationError, Result};

/// Registers a customer with a unique email.
pub struct CreateCustomer<R: ?Sized> {
    customers: Arc<R>,
}

impl<R: CustomerRepository + ?Sized> CreateCustomer<R> {
    pub fn new(customers: Arc<R>) -> Self {
        Self { customers }
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn execute(&self, input: NewCustomer) -> Result<Customer> {
        let customer = Customer::register(input)?;

        if self
            .customers
            .find_by_email(customer.email())
            .await?
            .is_some()
        {
            return Err(ApplicationError::DuplicateEmail);
        }

        self.customers.save(&customer).await?;

        metrics::counter!("customers_created_total").increment(1);
        tracing::info!(customer_id = %customer.id(), "customer created");

        Ok(customer)
    }
}
