//! Cart Aggregate
//!
//! Client-side cart totals. Prices come from the product snapshots the lines
//! were added from; the backend recomputes authoritative totals at checkout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_objects::{Money, MoneyError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    currency: String,
    items: Vec<CartItem>,
    subtotal: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl CartItem {
    pub fn line_total(&self) -> Result<Money, MoneyError> { self.unit_price.multiply(self.quantity) }

    fn is_same_line(&self, product_id: &str, variant_id: Option<&str>) -> bool {
        self.product_id == product_id && self.variant_id.as_deref() == variant_id
    }
}

impl Cart {
    pub fn new(currency: &str) -> Self {
        let subtotal = Money::zero(currency);
        Self { currency: subtotal.currency().to_string(), items: vec![], subtotal }
    }

    pub fn currency(&self) -> &str { &self.currency }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn line_count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 { self.items.iter().map(|i| u64::from(i.quantity)).sum() }

    /// Adds a line, merging into an existing line for the same product and variant.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.unit_price.currency() != self.currency {
            return Err(CartError::CurrencyMismatch { expected: self.currency.clone(), found: item.unit_price.currency().to_string() });
        }
        if item.quantity == 0 { return Ok(()); }
        let mut items = self.items.clone();
        match items.iter_mut().find(|i| i.is_same_line(&item.product_id, item.variant_id.as_deref())) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => items.push(item),
        }
        self.commit(items)
    }

    /// Sets a line's quantity; zero removes the line.
    pub fn update_quantity(&mut self, product_id: &str, variant_id: Option<&str>, quantity: u32) -> Result<(), CartError> {
        let pos = self.items.iter().position(|i| i.is_same_line(product_id, variant_id)).ok_or(CartError::ItemNotFound)?;
        let mut items = self.items.clone();
        if quantity == 0 {
            items.remove(pos);
        } else if let Some(item) = items.get_mut(pos) {
            item.quantity = quantity;
        }
        self.commit(items)
    }

    pub fn remove_item(&mut self, product_id: &str, variant_id: Option<&str>) -> Result<(), CartError> {
        let before = self.items.len();
        let items: Vec<CartItem> = self.items.iter().filter(|i| !i.is_same_line(product_id, variant_id)).cloned().collect();
        if items.len() == before { return Err(CartError::ItemNotFound); }
        self.commit(items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.subtotal = Money::zero(&self.currency);
    }

    /// Replaces the lines only if their subtotal can be represented.
    fn commit(&mut self, items: Vec<CartItem>) -> Result<(), CartError> {
        let mut subtotal = Money::zero(&self.currency);
        for item in &items {
            subtotal = subtotal.add(&item.line_total()?)?;
        }
        self.items = items;
        self.subtotal = subtotal;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("item not found in cart")]
    ItemNotFound,
    #[error("cart is priced in {expected}, item is priced in {found}")]
    CurrencyMismatch { expected: String, found: String },
    #[error("cart total is too large")]
    Overflow,
}

impl From<MoneyError> for CartError {
    fn from(err: MoneyError) -> Self {
        match err {
            MoneyError::CurrencyMismatch { expected, found } => Self::CurrencyMismatch { expected, found },
            MoneyError::Overflow => Self::Overflow,
        }
    }
}
