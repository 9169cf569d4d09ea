use serde::Serialize;
use std::fmt::Display;

/// The five screens of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Listing,
    Menu,
    Cart,
    Checkout,
    Confirmation,
}

impl Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            View::Listing => "listing",
            View::Menu => "menu",
            View::Cart => "cart",
            View::Checkout => "checkout",
            View::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}
