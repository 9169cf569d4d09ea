use super::error::ServiceError;
use crate::model::{MenuItem, OrderConfirmation, OrderDraft, Restaurant};
use async_trait::async_trait;

/// The three calls the storefront makes to its content backend.
///
/// Implementations are shared behind an `Arc` and called from deferred
/// session work, so they must be `Send + Sync`.
#[async_trait]
pub trait GenerationService: Send + Sync {
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, ServiceError>;

    /// Menu for the restaurant called `restaurant_name`.
    async fn fetch_menu(&self, restaurant_name: &str) -> Result<Vec<MenuItem>, ServiceError>;

    async fn confirm_order(&self, draft: &OrderDraft) -> Result<OrderConfirmation, ServiceError>;
}
