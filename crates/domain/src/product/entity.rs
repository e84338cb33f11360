//! Product entity.

use chrono::{DateTime, Utc};
use common::ProductId;

use super::{ProductCategory, ProductError};
use crate::money::Money;

/// Input for building a [`Product`].
///
/// `id` and the timestamps are optional so the same type serves both new
/// products and rows rehydrated from storage. Stock is signed so that a
/// negative input is reported as a domain error instead of being truncated.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: ProductCategory,
    pub sku: String,
    pub stock_quantity: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl NewProduct {
    /// Creates input for a brand new product with an empty description.
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        price: Money,
        category: ProductCategory,
        stock_quantity: i64,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            price,
            category,
            sku: sku.into(),
            stock_quantity,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A product in the catalog.
#[derive(Debug, Clone)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    price: Money,
    category: ProductCategory,
    sku: String,
    stock_quantity: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a product, enforcing every invariant.
    pub fn new(props: NewProduct) -> Result<Self, ProductError> {
        validate_name(&props.name)?;
        validate_price(props.price)?;
        if props.sku.trim().is_empty() {
            return Err(ProductError::EmptySku);
        }
        if props.stock_quantity < 0 {
            return Err(ProductError::NegativeStock {
                quantity: props.stock_quantity,
            });
        }
        let stock_quantity =
            u32::try_from(props.stock_quantity).map_err(|_| ProductError::StockOverflow)?;

        let now = Utc::now();
        let created_at = props.created_at.unwrap_or(now);

        Ok(Self {
            id: props.id.unwrap_or_default(),
            name: props.name,
            description: props.description,
            price: props.price,
            category: props.category,
            sku: props.sku,
            stock_quantity,
            created_at,
            updated_at: props.updated_at.unwrap_or(created_at),
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category(&self) -> &ProductCategory {
        &self.category
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns true when at least one unit is available.
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Removes `quantity` units from stock.
    pub fn decrease_stock(&mut self, quantity: u32) -> Result<(), ProductError> {
        if quantity == 0 {
            return Err(ProductError::NonPositiveQuantity);
        }
        if self.stock_quantity < quantity {
            return Err(ProductError::InsufficientStock {
                requested: quantity,
                available: self.stock_quantity,
            });
        }

        self.stock_quantity -= quantity;
        self.touch();
        Ok(())
    }

    /// Adds `quantity` units to stock.
    pub fn increase_stock(&mut self, quantity: u32) -> Result<(), ProductError> {
        if quantity == 0 {
            return Err(ProductError::NonPositiveQuantity);
        }

        self.stock_quantity = self
            .stock_quantity
            .checked_add(quantity)
            .ok_or(ProductError::StockOverflow)?;
        self.touch();
        Ok(())
    }

    pub fn update_name(&mut self, name: impl Into<String>) -> Result<(), ProductError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn update_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    pub fn update_price(&mut self, price: Money) -> Result<(), ProductError> {
        validate_price(price)?;
        self.price = price;
        self.touch();
        Ok(())
    }

    pub fn update_category(&mut self, category: ProductCategory) {
        self.category = category;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::EmptyName);
    }
    Ok(())
}

fn validate_price(price: Money) -> Result<(), ProductError> {
    if price.is_negative() {
        return Err(ProductError::NegativePrice {
            cents: price.cents(),
        });
    }
    Ok(())
}
