//! Customer entity.

use chrono::{DateTime, Utc};
use common::CustomerId;

use super::{CustomerError, Email, PasswordHash};

/// Registration input for a [`Customer`].
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub address: String,
    pub password: String,
}

/// A registered customer.
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: Email,
    password: PasswordHash,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Customer {
    /// Validates the input and creates a customer with a fresh ID.
    ///
    /// Checks run in order: name, email, password.
    pub fn register(input: NewCustomer) -> Result<Self, CustomerError> {
        validate_name(&input.name)?;
        let email = Email::parse(&input.email)?;
        let password = PasswordHash::from_plaintext(&input.password)?;

        let now = Utc::now();
        Ok(Self {
            id: CustomerId::new(),
            name: input.name,
            email,
            password,
            address: input.address,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuilds a customer from stored fields without re-hashing.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: CustomerId,
        name: String,
        email: Email,
        password: PasswordHash,
        address: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password,
            address,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Changes the name and address. The name must stay non-empty.
    pub fn update_profile(
        &mut self,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<(), CustomerError> {
        let name = name.into();
        validate_name(&name)?;

        self.name = name;
        self.address = address.into();
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), CustomerError> {
    if name.trim().is_empty() {
        return Err(CustomerError::EmptyName);
    }
    Ok(())
}
