use crate::model::CustomerDetails;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Alert raised when a checkout is submitted with required fields left blank.
pub const REQUIRED_FIELDS_MESSAGE: &str = "請填寫所有必填欄位 (*)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckoutField {
    CustomerName,
    CustomerPhone,
    DeliveryAddress,
    PaymentMethod,
    OrderNotes,
}

impl CheckoutField {
    pub const REQUIRED: [CheckoutField; 4] = [
        CheckoutField::CustomerName,
        CheckoutField::CustomerPhone,
        CheckoutField::DeliveryAddress,
        CheckoutField::PaymentMethod,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CheckoutField::CustomerName => "全名",
            CheckoutField::CustomerPhone => "電話號碼",
            CheckoutField::DeliveryAddress => "外送地址",
            CheckoutField::PaymentMethod => "付款方式",
            CheckoutField::OrderNotes => "訂單備註",
        }
    }
}

impl Display for CheckoutField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} 缺少：{}", REQUIRED_FIELDS_MESSAGE, missing_labels(.missing))]
pub struct ValidationError {
    pub missing: Vec<CheckoutField>,
}

fn missing_labels(missing: &[CheckoutField]) -> String {
    missing
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join("、")
}

/// What the customer has typed on the checkout screen so far.
///
/// A fresh, empty form is created every time checkout is entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub payment_method: String,
    pub order_notes: String,
}

impl CheckoutForm {
    pub fn set(&mut self, field: CheckoutField, value: impl Into<String>) {
        let slot = match field {
            CheckoutField::CustomerName => &mut self.customer_name,
            CheckoutField::CustomerPhone => &mut self.customer_phone,
            CheckoutField::DeliveryAddress => &mut self.delivery_address,
            CheckoutField::PaymentMethod => &mut self.payment_method,
            CheckoutField::OrderNotes => &mut self.order_notes,
        };
        *slot = value.into();
    }

    pub fn get(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::CustomerName => &self.customer_name,
            CheckoutField::CustomerPhone => &self.customer_phone,
            CheckoutField::DeliveryAddress => &self.delivery_address,
            CheckoutField::PaymentMethod => &self.payment_method,
            CheckoutField::OrderNotes => &self.order_notes,
        }
    }

    /// Produces trimmed customer details, or every required field that is
    /// blank after trimming.
    pub fn validate(&self) -> Result<CustomerDetails, ValidationError> {
        let missing: Vec<_> = CheckoutField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        let notes = self.order_notes.trim();
        Ok(CustomerDetails {
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            delivery_address: self.delivery_address.trim().to_string(),
            payment_method: self.payment_method.trim().to_string(),
            order_notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}
