//! Aggregates module
pub mod product;
pub mod variant;
pub mod order;
pub mod cart;

pub use product::{OptionKind, Product, ProductVariant};
pub use variant::{
    available_stock, check_availability, AvailabilityCheck, AvailableOptions, DisplayPrice, OptionMatrix,
    OptionValue, Selection, VariantMatch, VariantResolver,
};
pub use order::{
    is_current_step, is_step_completed, should_show_pay_button, status_index, Order, OrderProgress, OrderStatus,
    StatusParseError, TerminalIndicator, TimelineStep, TIMELINE,
};
pub use cart::{Cart, CartError, CartItem};
