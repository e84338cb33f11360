//! JSON views of domain entities.

use chrono::{DateTime, SecondsFormat, Utc};
use domain::{Customer, Product, ProductCategory};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    /// Display form, e.g. `"$12.34"`.
    pub price: String,
    pub category: CategoryView,
    pub sku: String,
    pub stock_quantity: u32,
    pub in_stock: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Customer as returned to clients. Never carries the password hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub created_at: String,
    pub updated_at: String,
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&ProductCategory> for CategoryView {
    fn from(category: &ProductCategory) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name().to_string(),
            description: category.description().to_string(),
        }
    }
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            price_cents: product.price().cents(),
            price: product.price().to_string(),
            category: product.category().into(),
            sku: product.sku().to_string(),
            stock_quantity: product.stock_quantity(),
            in_stock: product.is_in_stock(),
            created_at: timestamp(product.created_at()),
            updated_at: timestamp(product.updated_at()),
        }
    }
}

impl From<&Customer> for CustomerView {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_string(),
            email: customer.email().to_string(),
            address: customer.address().to_string(),
            created_at: timestamp(customer.created_at()),
            updated_at: timestamp(customer.updated_at()),
        }
    }
}

/// Maps a collection of entities to their views.
pub fn present_many<'a, T, V>(items: &'a [T]) -> Vec<V>
where
    V: From<&'a T>,
{
    items.iter().map(V::from).collect()
}
