//! OpenSASE Storefront
//!
//! View models behind the storefront and admin order pages. The catalog,
//! orders and payments live in the commerce backend; this crate turns the
//! snapshots it returns into what the pages render.
//!
//! ## Features
//! - Order progress timeline and status badges
//! - Variant selection: option lists, availability, SKU matching
//! - Display price and price ranges
//! - Cart totals
//! - JSON view-model endpoints

pub mod config;
pub mod domain;
pub mod http;
pub mod telemetry;

use thiserror::Error;

use crate::domain::CartError;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Cart(#[from] CartError),
}

impl From<validator::ValidationErrors> for StorefrontError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
