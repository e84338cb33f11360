use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{
    CategoryId, Customer, CustomerId, CustomerRepository, Email, Money, Product, ProductId,
    ProductRepository, RepositoryError, RepositoryResult,
};
use tokio::sync::RwLock;

/// In-memory product repository.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryProductRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    async fn filtered(&self, predicate: impl Fn(&Product) -> bool) -> Vec<Product> {
        let products = self.products.read().await;
        let mut matches: Vec<_> = products.values().filter(|p| predicate(p)).cloned().collect();
        matches.sort_by_key(|p| (p.created_at(), p.id()));
        matches
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn find_by_category(&self, category_id: &CategoryId) -> RepositoryResult<Vec<Product>> {
        Ok(self.filtered(|p| p.category().id() == category_id).await)
    }

    async fn save(&self, product: &Product) -> RepositoryResult<()> {
        self.products
            .write()
            .await
            .insert(product.id(), product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> RepositoryResult<()> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id()) {
            Some(existing) => {
                *existing = product.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "Product",
                id: product.id().to_string(),
            }),
        }
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }

    async fn find_by_sku(&self, sku: &str) -> RepositoryResult<Option<Product>> {
        Ok(self.filtered(|p| p.sku() == sku).await.into_iter().next())
    }

    async fn find_by_price_range(&self, min: Money, max: Money) -> RepositoryResult<Vec<Product>> {
        Ok(self
            .filtered(|p| p.price() >= min && p.price() <= max)
            .await)
    }

    async fn find_out_of_stock(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.filtered(|p| !p.is_in_stock()).await)
    }

    async fn find_low_stock(&self, threshold: u32) -> RepositoryResult<Vec<Product>> {
        Ok(self
            .filtered(|p| p.is_in_stock() && p.stock_quantity() <= threshold)
            .await)
    }
}

/// In-memory customer repository.
///
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
}

impl InMemoryCustomerRepository {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored customers.
    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn save(&self, customer: &Customer) -> RepositoryResult<()> {
        self.customers
            .write()
            .await
            .insert(customer.id(), customer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> RepositoryResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.values().find(|c| c.email() == email).cloned())
    }

    async fn update(&self, customer: &Customer) -> RepositoryResult<()> {
        let mut customers = self.customers.write().await;
        match customers.get_mut(&customer.id()) {
            Some(existing) => {
                *existing = customer.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound {
                entity: "Customer",
                id: customer.id().to_string(),
            }),
        }
    }

    async fn delete(&self, id: CustomerId) -> RepositoryResult<bool> {
        Ok(self.customers.write().await.remove(&id).is_some())
    }
}
