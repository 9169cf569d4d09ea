//! # Session Client
//!
//! Provides a high-level API for driving a `Session` actor.
//! It wraps a `StateClient<Session>` and turns each user action into a typed call.
use crate::model::{ConfirmedOrder, MenuItem, MenuItemId, Restaurant, RestaurantId};
use crate::session::{
    CartSummary, CheckoutField, CheckoutForm, Session, SessionCommand, SessionError,
    SessionReply, SessionSnapshot, View,
};
use async_trait::async_trait;
use event_actor::{ActorClient, FrameworkError, StateClient};
use tracing::instrument;

/// Client for interacting with the Session actor.
#[derive(Clone, Debug)]
pub struct SessionClient {
    inner: StateClient<Session>,
}

impl SessionClient {
    pub fn new(inner: StateClient<Session>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Session> for SessionClient {
    type Error = SessionError;

    fn inner(&self) -> &StateClient<Session> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        SessionError::ActorCommunicationError(e.to_string())
    }
}

fn unexpected(reply: SessionReply) -> SessionError {
    SessionError::UnexpectedReply(format!("{reply:?}"))
}

impl SessionClient {
    async fn change_view(&self, command: SessionCommand) -> Result<View, SessionError> {
        match self.dispatch(command).await? {
            SessionReply::View(view) => Ok(view),
            other => Err(unexpected(other)),
        }
    }

    async fn edit_cart(&self, command: SessionCommand) -> Result<CartSummary, SessionError> {
        match self.dispatch(command).await? {
            SessionReply::Cart(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    /// Loads the restaurant listing. Also the way to retry after a failure.
    #[instrument(skip(self))]
    pub async fn load_restaurants(&self) -> Result<Vec<Restaurant>, SessionError> {
        match self.dispatch(SessionCommand::LoadRestaurants).await? {
            SessionReply::Restaurants(restaurants) => Ok(restaurants),
            other => Err(unexpected(other)),
        }
    }

    /// Opens the restaurant's menu and waits for it to load.
    #[instrument(skip(self))]
    pub async fn select_restaurant(&self, id: RestaurantId) -> Result<Vec<MenuItem>, SessionError> {
        match self.dispatch(SessionCommand::SelectRestaurant(id)).await? {
            SessionReply::Menu(menu) => Ok(menu),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, item: MenuItemId) -> Result<CartSummary, SessionError> {
        self.edit_cart(SessionCommand::AddToCart(item)).await
    }

    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        item: MenuItemId,
        quantity: i64,
    ) -> Result<CartSummary, SessionError> {
        self.edit_cart(SessionCommand::UpdateQuantity { item, quantity })
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, item: MenuItemId) -> Result<CartSummary, SessionError> {
        self.edit_cart(SessionCommand::RemoveItem(item)).await
    }

    #[instrument(skip(self))]
    pub async fn open_cart(&self) -> Result<View, SessionError> {
        self.change_view(SessionCommand::OpenCart).await
    }

    #[instrument(skip(self))]
    pub async fn back(&self) -> Result<View, SessionError> {
        self.change_view(SessionCommand::Back).await
    }

    #[instrument(skip(self))]
    pub async fn go_home(&self) -> Result<View, SessionError> {
        self.change_view(SessionCommand::GoHome).await
    }

    #[instrument(skip(self))]
    pub async fn proceed_to_checkout(&self) -> Result<View, SessionError> {
        self.change_view(SessionCommand::ProceedToCheckout).await
    }

    #[instrument(skip(self, value))]
    pub async fn edit_checkout(
        &self,
        field: CheckoutField,
        value: impl Into<String> + Send,
    ) -> Result<CheckoutForm, SessionError> {
        let command = SessionCommand::EditCheckout {
            field,
            value: value.into(),
        };
        match self.dispatch(command).await? {
            SessionReply::Checkout(form) => Ok(form),
            other => Err(unexpected(other)),
        }
    }

    /// Submits the checkout form and waits for the whole order pipeline.
    #[instrument(skip(self))]
    pub async fn submit_checkout(&self) -> Result<ConfirmedOrder, SessionError> {
        match self.dispatch(SessionCommand::SubmitCheckout).await? {
            SessionReply::Order(order) => Ok(*order),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn new_order(&self) -> Result<View, SessionError> {
        self.change_view(SessionCommand::NewOrder).await
    }

    #[instrument(skip(self))]
    pub async fn dismiss_alert(&self) -> Result<(), SessionError> {
        match self.dispatch(SessionCommand::DismissAlert).await? {
            SessionReply::Done => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        match self.dispatch(SessionCommand::Snapshot).await? {
            SessionReply::Snapshot(snapshot) => Ok(*snapshot),
            other => Err(unexpected(other)),
        }
    }
}
