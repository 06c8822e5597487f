//! Order Aggregate
//!
//! Read-side view of an order as delivered by the backend, and the projection
//! of its status onto the fulfilment timeline. Status transitions happen
//! upstream; nothing here mutates an order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus { Pending, Paid, Processing, Shipped, Delivered, Completed, Cancelled, Failed, Expired }

/// Happy-path fulfilment steps, in display order.
pub const TIMELINE: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Paid,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

impl OrderStatus {
    pub const ALL: [OrderStatus; 9] = [
        Self::Pending, Self::Paid, Self::Processing, Self::Shipped, Self::Delivered,
        Self::Completed, Self::Cancelled, Self::Failed, Self::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
            Self::Expired => "EXPIRED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Awaiting Payment",
            Self::Paid => "Paid",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Failed => "Payment Failed",
            Self::Expired => "Expired",
        }
    }

    /// Badge colour used by the order list and detail pages.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Pending => "yellow",
            Self::Paid => "blue",
            Self::Processing => "indigo",
            Self::Shipped => "purple",
            Self::Delivered | Self::Completed => "green",
            Self::Cancelled => "gray",
            Self::Failed => "red",
            Self::Expired => "orange",
        }
    }

    /// Statuses from which an order never progresses along the timeline.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Failed | Self::Expired)
    }

    /// Zero-based position on the timeline. `Completed` shares the slot of
    /// `Delivered`; failure statuses have no slot.
    pub fn step_index(&self) -> Option<usize> {
        match self {
            Self::Pending => Some(0),
            Self::Paid => Some(1),
            Self::Processing => Some(2),
            Self::Shipped => Some(3),
            Self::Delivered | Self::Completed => Some(4),
            Self::Cancelled | Self::Failed | Self::Expired => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct StatusParseError(pub String);

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| StatusParseError(s.to_string()))
    }
}

pub fn status_index(status: OrderStatus) -> Option<usize> { status.step_index() }

pub fn is_step_completed(step: OrderStatus, current: OrderStatus) -> bool {
    if current.is_terminal_failure() { return false; }
    match (step.step_index(), current.step_index()) {
        (Some(step), Some(current)) => step <= current,
        _ => false,
    }
}

pub fn is_current_step(step: OrderStatus, current: OrderStatus) -> bool {
    match current {
        OrderStatus::Completed => step == OrderStatus::Delivered,
        _ => step == current,
    }
}

pub fn should_show_pay_button(status: OrderStatus) -> bool { status == OrderStatus::Pending }

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineStep { pub status: OrderStatus, pub label: &'static str, pub completed: bool, pub current: bool }

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TerminalIndicator { pub status: OrderStatus, pub label: &'static str, pub color: &'static str }

/// Everything the order page needs to draw the progress tracker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderProgress {
    pub status: Option<OrderStatus>,
    pub steps: Vec<TimelineStep>,
    pub current: Option<OrderStatus>,
    pub terminal: Option<TerminalIndicator>,
    pub show_pay_button: bool,
}

impl OrderProgress {
    /// `None` stands for a status the backend sent that we could not read; it
    /// renders the timeline with nothing completed.
    pub fn for_status(status: Option<OrderStatus>) -> Self {
        let Some(current) = status else {
            return Self {
                status: None,
                steps: TIMELINE.iter().map(|&s| TimelineStep { status: s, label: s.label(), completed: false, current: false }).collect(),
                current: None,
                terminal: None,
                show_pay_button: false,
            };
        };

        if current.is_terminal_failure() {
            return Self {
                status: Some(current),
                steps: Vec::new(),
                current: None,
                terminal: Some(TerminalIndicator { status: current, label: current.label(), color: current.color() }),
                show_pay_button: false,
            };
        }

        let steps: Vec<TimelineStep> = TIMELINE
            .iter()
            .map(|&step| TimelineStep {
                status: step,
                label: step.label(),
                completed: is_step_completed(step, current),
                current: is_current_step(step, current),
            })
            .collect();
        let current_step = steps.iter().find(|s| s.current).map(|s| s.status);

        Self { status: Some(current), steps, current: current_step, terminal: None, show_pay_button: should_show_pay_button(current) }
    }

    pub fn completed_count(&self) -> usize { self.steps.iter().filter(|s| s.completed).count() }
    pub fn is_terminal(&self) -> bool { self.terminal.is_some() }
}

/// Order snapshot as returned by the orders API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn progress(&self) -> OrderProgress { OrderProgress::for_status(self.status) }
    pub fn can_pay(&self) -> bool { self.status.is_some_and(should_show_pay_button) }
    pub fn status_label(&self) -> &'static str { self.status.map_or("Unknown", |s| s.label()) }
    pub fn status_color(&self) -> &'static str { self.status.map_or("gray", |s| s.color()) }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<Option<OrderStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value.parse::<OrderStatus>() {
        Ok(status) => Some(status),
        Err(err) => {
            tracing::warn!(error = %err, "rendering order without progress");
            None
        }
    }))
}
