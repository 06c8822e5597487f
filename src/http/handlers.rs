//! Route handlers.

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::json;
use validator::Validate;

use crate::domain::{check_availability, AvailabilityCheck, Cart, CartError, CartItem, Money, Order};
use crate::http::dto::{
    CartLineView, CartTotalsRequest, CartTotalsResponse, OrderProgressResponse, ResolveVariantRequest,
    ResolveVariantResponse, VariantAvailabilityRequest,
};
use crate::http::AppState;
use crate::{Result, StorefrontError};

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy", "service": "opensase-storefront", "timestamp": Utc::now()}))
}

pub async fn order_progress(Json(order): Json<Order>) -> Json<OrderProgressResponse> {
    let progress = order.progress();
    tracing::debug!(order_number = %order.order_number, status = ?order.status, completed = progress.completed_count(), "Projected order progress");
    Json(OrderProgressResponse {
        order_number: order.order_number.clone(),
        status_label: order.status_label(),
        status_color: order.status_color(),
        progress,
    })
}

pub async fn resolve_variant(
    State(state): State<AppState>,
    Json(req): Json<ResolveVariantRequest>,
) -> Result<Json<ResolveVariantResponse>> {
    req.validate()?;
    let product = &req.product;
    let resolver = product.resolver();
    let outcome = resolver.find_matching_variant(&req.selection);
    let selected = outcome.variant();
    tracing::debug!(product_id = %product.id, outcome = outcome.as_str(), "Resolved variant selection");

    Ok(Json(ResolveVariantResponse {
        requires_selection: product.requires_selection(),
        options: resolver.available_options(),
        availability: resolver.option_matrix(&req.selection),
        outcome: outcome.as_str(),
        variant: selected.cloned(),
        display_price: resolver.display_price(selected),
        currency: product.currency.clone().unwrap_or_else(|| state.config.default_currency.clone()),
        available_stock: product.available_stock(selected),
    }))
}

pub async fn variant_availability(
    State(state): State<AppState>,
    Json(req): Json<VariantAvailabilityRequest>,
) -> Result<Json<AvailabilityCheck>> {
    req.validate()?;
    ensure_quantity_within_limit(req.quantity, state.config.max_line_quantity)?;
    Ok(Json(check_availability(&req.variant, req.quantity)))
}

pub async fn cart_totals(
    State(state): State<AppState>,
    Json(req): Json<CartTotalsRequest>,
) -> Result<Json<CartTotalsResponse>> {
    req.validate()?;
    let currency = req.currency.unwrap_or_else(|| state.config.default_currency.clone());
    let mut cart = Cart::new(&currency);

    for line in req.items {
        line.validate()?;
        ensure_quantity_within_limit(line.quantity, state.config.max_line_quantity)?;
        let line_currency = line.currency.as_deref().unwrap_or(cart.currency());
        let unit_price = Money::new(line.unit_price, line_currency);
        cart.add_item(CartItem {
            product_id: line.product_id,
            variant_id: line.variant_id,
            name: line.name,
            sku: line.sku,
            quantity: line.quantity,
            unit_price,
        })?;
    }

    let lines = cart
        .items()
        .iter()
        .map(|item| {
            Ok(CartLineView {
                product_id: item.product_id.clone(),
                variant_id: item.variant_id.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price.clone(),
                line_total: item.line_total().map_err(CartError::from)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Json(CartTotalsResponse {
        currency: cart.currency().to_string(),
        subtotal: cart.subtotal().clone(),
        item_count: cart.item_count(),
        lines,
    }))
}

fn ensure_quantity_within_limit(quantity: u32, max: u32) -> Result<()> {
    if quantity > max {
        return Err(StorefrontError::Validation(format!("quantity {quantity} exceeds the limit of {max}")));
    }
    Ok(())
}
