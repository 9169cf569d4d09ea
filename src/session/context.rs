use super::checkout::CheckoutForm;
use crate::cart::CartLedger;
use crate::model::{ConfirmedOrder, MenuItem, OrderConfirmation, OrderDraft, Restaurant};

/// Per-order session data, cleared as one unit on "new order".
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub selected: Option<Restaurant>,
    pub menu: Vec<MenuItem>,
    pub cart: CartLedger,
    pub checkout: CheckoutForm,
    pub confirmed: Option<ConfirmedOrder>,
    /// Confirmation issued for `draft` whose record could not be saved.
    pub issued: Option<(OrderDraft, OrderConfirmation)>,
}

impl SessionContext {
    pub fn new(shipping_fee: u64) -> Self {
        Self {
            selected: None,
            menu: Vec::new(),
            cart: CartLedger::new(shipping_fee),
            checkout: CheckoutForm::default(),
            confirmed: None,
            issued: None,
        }
    }

    /// Drops the selected restaurant and its menu. The cart is kept.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.menu.clear();
    }

    /// The confirmation to reuse if `draft` is identical to the one it was
    /// issued for.
    pub fn reusable_confirmation(&self, draft: &OrderDraft) -> Option<OrderConfirmation> {
        self.issued
            .as_ref()
            .filter(|(issued_for, _)| issued_for == draft)
            .map(|(_, confirmation)| confirmation.clone())
    }
}
