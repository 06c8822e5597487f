//! Product Aggregate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::variant::{available_stock, VariantResolver};

/// Selectable attribute dimensions of a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind { Size, Color, Material, Pattern, Fit, Sleeve }

impl OptionKind {
    pub const ALL: [OptionKind; 6] = [Self::Size, Self::Color, Self::Material, Self::Pattern, Self::Fit, Self::Sleeve];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Color => "color",
            Self::Material => "material",
            Self::Pattern => "pattern",
            Self::Fit => "fit",
            Self::Sleeve => "sleeve",
        }
    }
}

/// One purchasable SKU, as returned by the variants API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub fit: Option<String>,
    #[serde(default)]
    pub sleeve: Option<String>,
    /// Overrides the product base price when present.
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub reserved_stock: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool { true }

impl ProductVariant {
    pub fn attribute(&self, kind: OptionKind) -> Option<&str> {
        let value = match kind {
            OptionKind::Size => &self.size,
            OptionKind::Color => &self.color,
            OptionKind::Material => &self.material,
            OptionKind::Pattern => &self.pattern,
            OptionKind::Fit => &self.fit,
            OptionKind::Sleeve => &self.sleeve,
        };
        value.as_deref()
    }

    /// `stock_quantity - reserved_stock`, never below zero.
    pub fn available_stock(&self) -> u64 {
        u64::try_from(self.stock_quantity.saturating_sub(self.reserved_stock)).unwrap_or(0)
    }

    pub fn is_purchasable(&self) -> bool { self.is_active && self.available_stock() > 0 }

    pub fn effective_price(&self, base_price: Decimal) -> Decimal { self.price.unwrap_or(base_price) }
}

/// Product snapshot with its variants, as rendered on the product page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub base_price: Decimal,
    #[serde(default)]
    pub currency: Option<String>,
    /// Stock of a simple product. Ignored once the product has variants.
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    pub fn resolver(&self) -> VariantResolver<'_> { VariantResolver::new(&self.variants, self.base_price) }

    pub fn has_variants(&self) -> bool { !self.variants.is_empty() }

    /// A selector is only shown when at least one active variant exists.
    pub fn requires_selection(&self) -> bool { self.variants.iter().any(|v| v.is_active) }

    pub fn available_stock(&self, selected: Option<&ProductVariant>) -> u64 {
        if self.has_variants() {
            available_stock(selected)
        } else {
            u64::try_from(self.stock_quantity).unwrap_or(0)
        }
    }
}
