use crate::model::{MenuItem, MenuItemId};
use serde::{Deserialize, Serialize};

/// A menu item together with how many of it are in the cart.
///
/// `quantity` is between 1 and [`CartLedger::MAX_QUANTITY`] for every line
/// held by a [`CartLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn line_total(&self) -> u64 {
        u64::from(self.item.price) * u64::from(self.quantity)
    }
}

/// Ordered collection of cart lines, in first-added order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLedger {
    lines: Vec<CartLine>,
    shipping_fee: u64,
}

impl CartLedger {
    pub const DEFAULT_SHIPPING_FEE: u64 = 60;

    /// Upper bound of a single line's quantity. Larger requests are clamped.
    pub const MAX_QUANTITY: u32 = u16::MAX as u32;

    pub fn new(shipping_fee: u64) -> Self {
        Self {
            lines: Vec::new(),
            shipping_fee,
        }
    }

    /// Adds one of `item`. Returns the line's new quantity.
    pub fn add_item(&mut self, item: &MenuItem) -> u32 {
        match self.position(&item.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = (line.quantity + 1).min(Self::MAX_QUANTITY);
                line.quantity
            }
            None => {
                self.lines.push(CartLine {
                    item: item.clone(),
                    quantity: 1,
                });
                1
            }
        }
    }

    /// Sets the quantity of an existing line. Zero or less removes it, and
    /// anything above [`Self::MAX_QUANTITY`] is clamped.
    pub fn update_quantity(&mut self, id: &MenuItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }
        if let Some(index) = self.position(id) {
            let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.lines[index].quantity = quantity.min(Self::MAX_QUANTITY);
        }
    }

    pub fn remove_item(&mut self, id: &MenuItemId) {
        self.lines.retain(|line| &line.item.id != id);
    }

    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(0, u64::saturating_add)
    }

    pub fn shipping_fee(&self) -> u64 {
        self.shipping_fee
    }

    pub fn total(&self) -> u64 {
        self.subtotal().saturating_add(self.shipping_fee)
    }

    /// Sum of all quantities, shown on the cart badge.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .map(|line| line.quantity)
            .fold(0, u32::saturating_add)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines.clone()
    }

    fn position(&self, id: &MenuItemId) -> Option<usize> {
        self.lines.iter().position(|line| &line.item.id == id)
    }
}

impl Default for CartLedger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SHIPPING_FEE)
    }
}
