use serde::{Deserialize, Serialize};

/// Contact and delivery details of a validated checkout.
///
/// Only produced by [`CheckoutForm::validate`](crate::session::CheckoutForm::validate),
/// so the four required fields are always non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_notes: Option<String>,
}

/// Payment labels offered at checkout.
pub mod payment {
    pub const CASH_ON_DELIVERY: &str = "貨到付款";
    pub const CREDIT_CARD: &str = "信用卡";
    pub const LINE_PAY: &str = "LINE Pay";
}
