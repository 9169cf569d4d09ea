//! Represents one restaurant in a listing.
//!
//! Listings are produced by the generation service (or the offline catalog)
//! and never mutated afterwards.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Restaurants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(pub String);

impl From<&str> for RestaurantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for RestaurantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub category: String,
    /// URL of a picture of the restaurant or its food.
    pub image: String,
    /// Between 0 and 5.
    pub rating: f64,
    pub reviews: u32,
    /// Display label such as "25-35 分鐘".
    pub delivery_time: String,
    pub min_order: u32,
}

impl Restaurant {
    pub const MAX_RATING: f64 = 5.0;

    pub fn has_valid_rating(&self) -> bool {
        (0.0..=Self::MAX_RATING).contains(&self.rating)
    }
}
