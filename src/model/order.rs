//! Order types, from the frozen draft to the record written to the sink.
//!
//! The total is computed exactly once, in [`OrderDraft::new`], and copied
//! unchanged into [`ConfirmedOrder`] and [`OrderRecord`].
use crate::cart::{CartLedger, CartLine};
use crate::model::CustomerDetails;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Order number and delivery estimate issued by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_number: String,
    pub estimated_delivery_time: String,
}

/// Everything needed to confirm an order, captured at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub restaurant_name: String,
    pub lines: Vec<CartLine>,
    pub details: CustomerDetails,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total: u64,
}

impl OrderDraft {
    /// Snapshots the cart and freezes `total = subtotal + shipping fee`.
    pub fn new(
        cart: &CartLedger,
        details: CustomerDetails,
        restaurant_name: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_name: restaurant_name.into(),
            lines: cart.snapshot(),
            details,
            subtotal: cart.subtotal(),
            shipping_fee: cart.shipping_fee(),
            total: cart.total(),
        }
    }

    /// `"name xN, name xN"`, the wording used in confirmation prompts.
    pub fn prompt_summary(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{} x{}", line.item.name, line.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A confirmed order as shown on the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedOrder {
    #[serde(flatten)]
    pub details: CustomerDetails,
    pub order_number: String,
    pub estimated_delivery_time: String,
    pub total: u64,
    pub cart: Vec<CartLine>,
    pub restaurant_name: String,
}

impl ConfirmedOrder {
    pub fn assemble(draft: OrderDraft, confirmation: OrderConfirmation) -> Self {
        Self {
            details: draft.details,
            order_number: confirmation.order_number,
            estimated_delivery_time: confirmation.estimated_delivery_time,
            total: draft.total,
            cart: draft.lines,
            restaurant_name: draft.restaurant_name,
        }
    }

    /// `"name (xN), name (xN)"`, the wording used in order records.
    pub fn items_summary(&self) -> String {
        self.cart
            .iter()
            .map(|line| format!("{} (x{})", line.item.name, line.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One write to the order sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_number: String,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub total: u64,
    pub restaurant: String,
    pub items: String,
    pub notes: Option<String>,
    pub payment_method: String,
    /// RFC 3339, UTC.
    pub timestamp: String,
}

impl OrderRecord {
    pub fn new(order: &ConfirmedOrder, at: DateTime<Utc>) -> Self {
        Self {
            order_number: order.order_number.clone(),
            customer_name: order.details.customer_name.clone(),
            phone: order.details.customer_phone.clone(),
            address: order.details.delivery_address.clone(),
            total: order.total,
            restaurant: order.restaurant_name.clone(),
            items: order.items_summary(),
            notes: order.details.order_notes.clone(),
            payment_method: order.details.payment_method.clone(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
