//! Storefront domain: pure projections over backend snapshots.
pub mod aggregates;
pub mod value_objects;

pub use aggregates::*;
pub use value_objects::{Money, MoneyError};
