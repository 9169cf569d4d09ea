use super::checkout::{CheckoutField, CheckoutForm};
use super::view::View;
use crate::alert::Alert;
use crate::cart::CartLine;
use crate::model::{ConfirmedOrder, MenuItem, MenuItemId, OrderDraft, Restaurant, RestaurantId};
use crate::pipeline::PipelineError;
use crate::services::ServiceError;
use serde::Serialize;

/// Everything a user can do to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// (Re)load the restaurant listing.
    LoadRestaurants,
    SelectRestaurant(RestaurantId),
    AddToCart(MenuItemId),
    UpdateQuantity { item: MenuItemId, quantity: i64 },
    RemoveItem(MenuItemId),
    /// Header cart button, available on every screen.
    OpenCart,
    Back,
    GoHome,
    ProceedToCheckout,
    EditCheckout { field: CheckoutField, value: String },
    SubmitCheckout,
    NewOrder,
    DismissAlert,
    Snapshot,
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::LoadRestaurants => "load_restaurants",
            SessionCommand::SelectRestaurant(_) => "select_restaurant",
            SessionCommand::AddToCart(_) => "add_to_cart",
            SessionCommand::UpdateQuantity { .. } => "update_quantity",
            SessionCommand::RemoveItem(_) => "remove_item",
            SessionCommand::OpenCart => "open_cart",
            SessionCommand::Back => "back",
            SessionCommand::GoHome => "go_home",
            SessionCommand::ProceedToCheckout => "proceed_to_checkout",
            SessionCommand::EditCheckout { .. } => "edit_checkout",
            SessionCommand::SubmitCheckout => "submit_checkout",
            SessionCommand::NewOrder => "new_order",
            SessionCommand::DismissAlert => "dismiss_alert",
            SessionCommand::Snapshot => "snapshot",
        }
    }

    /// Commands that only read or hide an alert are served even while work
    /// is in flight.
    pub fn is_passive(&self) -> bool {
        matches!(self, SessionCommand::DismissAlert | SessionCommand::Snapshot)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub total: u64,
    pub item_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadingFlags {
    pub restaurants: bool,
    pub menu: bool,
    pub submitting: bool,
}

impl LoadingFlags {
    pub fn any(&self) -> bool {
        self.restaurants || self.menu || self.submitting
    }
}

/// Read-only copy of a session, enough to render any screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub view: View,
    pub restaurants: Vec<Restaurant>,
    pub selected: Option<Restaurant>,
    pub menu: Vec<MenuItem>,
    pub cart: CartSummary,
    pub checkout: CheckoutForm,
    pub confirmed: Option<ConfirmedOrder>,
    pub loading: LoadingFlags,
    pub alert: Option<Alert>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionReply {
    Restaurants(Vec<Restaurant>),
    Menu(Vec<MenuItem>),
    Cart(CartSummary),
    View(View),
    Checkout(CheckoutForm),
    Order(Box<ConfirmedOrder>),
    Snapshot(Box<SessionSnapshot>),
    Done,
}

/// Completions of deferred session work.
#[derive(Debug)]
pub enum SessionEvent {
    RestaurantsLoaded(Result<Vec<Restaurant>, ServiceError>),
    MenuLoaded {
        restaurant: RestaurantId,
        result: Result<Vec<MenuItem>, ServiceError>,
    },
    OrderSettled {
        draft: OrderDraft,
        outcome: Result<ConfirmedOrder, PipelineError>,
    },
}
