//! Request and response bodies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::{
    AvailableOptions, DisplayPrice, Money, OptionMatrix, OrderProgress, Product, ProductVariant, Selection,
};

#[derive(Debug, Serialize)]
pub struct OrderProgressResponse {
    pub order_number: String,
    pub status_label: &'static str,
    pub status_color: &'static str,
    pub progress: OrderProgress,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResolveVariantRequest {
    #[validate(custom = "validate_product")]
    pub product: Product,
    #[serde(default)]
    pub selection: Selection,
}

#[derive(Debug, Serialize)]
pub struct ResolveVariantResponse {
    pub requires_selection: bool,
    pub options: AvailableOptions,
    pub availability: OptionMatrix,
    #[serde(rename = "match")]
    pub outcome: &'static str,
    pub variant: Option<ProductVariant>,
    pub display_price: DisplayPrice,
    pub currency: String,
    pub available_stock: u64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VariantAvailabilityRequest {
    #[validate(custom = "validate_variant")]
    pub variant: ProductVariant,
    #[validate(range(min = 1))]
    pub quantity: u32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CartTotalsRequest {
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    #[validate(length(min = 1))]
    pub items: Vec<CartLineRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CartLineRequest {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[serde(default)]
    pub variant_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    #[validate(range(min = 1))]
    pub quantity: u32,
    #[validate(custom = "validate_amount")]
    pub unit_price: Decimal,
    /// Defaults to the cart currency.
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: String,
    pub variant_id: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

#[derive(Debug, Serialize)]
pub struct CartTotalsResponse {
    pub currency: String,
    pub subtotal: Money,
    pub item_count: u64,
    pub lines: Vec<CartLineView>,
}

fn validate_product(product: &Product) -> Result<(), ValidationError> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::new("product_id_required"));
    }
    validate_amount(&product.base_price)?;
    product.variants.iter().try_for_each(validate_variant)
}

fn validate_variant(variant: &ProductVariant) -> Result<(), ValidationError> {
    if variant.id.trim().is_empty() {
        return Err(ValidationError::new("variant_id_required"));
    }
    variant.price.as_ref().map_or(Ok(()), validate_amount)
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() {
        return Err(ValidationError::new("negative_amount"));
    }
    Ok(())
}
