//! Composition root.
//!
//! Holds one set of repository singletons and hands out use cases bound to
//! them.

use application::{
    AdjustStock, CreateCustomer, CreateProduct, DeleteCustomer, DeleteProduct, GetCustomer,
    GetProduct, ListProducts, SearchProducts, UpdateCustomerProfile, UpdateProduct,
};
use domain::{CustomerRepository, ProductRepository};
use persistence::{Repositories, StorageEngine};

use crate::config::Config;

type Products = dyn ProductRepository;
type Customers = dyn CustomerRepository;

#[derive(Clone)]
pub struct Container {
    repositories: Repositories,
}

impl Container {
    pub fn new(repositories: Repositories) -> Self {
        Self { repositories }
    }

    /// Empty in-memory storage.
    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory())
    }

    /// Selects the storage engine from `DB_ENGINE` and `DATABASE_URL`.
    pub async fn bootstrap(config: &Config) -> persistence::Result<Self> {
        let repositories =
            Repositories::connect(&config.db_engine, config.database_url.as_deref()).await?;
        Ok(Self::new(repositories))
    }

    pub fn engine(&self) -> StorageEngine {
        self.repositories.engine
    }

    pub fn get_product(&self) -> GetProduct<Products> {
        GetProduct::new(self.repositories.products.clone())
    }

    pub fn list_products(&self) -> ListProducts<Products> {
        ListProducts::new(self.repositories.products.clone())
    }

    pub fn create_product(&self) -> CreateProduct<Products> {
        CreateProduct::new(self.repositories.products.clone())
    }

    pub fn update_product(&self) -> UpdateProduct<Products> {
        UpdateProduct::new(self.repositories.products.clone())
    }

    pub fn delete_product(&self) -> DeleteProduct<Products> {
        DeleteProduct::new(self.repositories.products.clone())
    }

    pub fn adjust_stock(&self) -> AdjustStock<Products> {
        AdjustStock::new(self.repositories.products.clone())
    }

    pub fn search_products(&self) -> SearchProducts<Products> {
        SearchProducts::new(self.repositories.products.clone())
    }

    pub fn create_customer(&self) -> CreateCustomer<Customers> {
        CreateCustomer::new(self.repositories.customers.clone())
    }

    pub fn get_customer(&self) -> GetCustomer<Customers> {
        GetCustomer::new(self.repositories.customers.clone())
    }

    pub fn update_customer_profile(&self) -> UpdateCustomerProfile<Customers> {
        UpdateCustomerProfile::new(self.repositories.customers.clone())
    }

    pub fn delete_customer(&self) -> DeleteCustomer<Customers> {
        DeleteCustomer::new(self.repositories.customers.clone())
    }
}
