use super::checkout::ValidationError;
use super::view::View;
use crate::model::{MenuItemId, RestaurantId};
use crate::pipeline::PipelineError;
use crate::services::ServiceError;
use std::fmt::Display;
use thiserror::Error;

/// The slow operation a session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    Restaurants,
    Menu,
    Order,
}

impl Display for Pending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Pending::Restaurants => "restaurant listing",
            Pending::Menu => "menu",
            Pending::Order => "order submission",
        })
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Busy: {0} in progress")]
    Busy(Pending),

    #[error("Cannot {action} from the {from} view")]
    InvalidTransition { from: View, action: &'static str },

    #[error("Unknown restaurant: {0}")]
    UnknownRestaurant(RestaurantId),

    #[error("Unknown menu item: {0}")]
    UnknownMenuItem(MenuItemId),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("No restaurant selected")]
    NoRestaurantSelected,

    #[error("The pending operation was interrupted")]
    Interrupted,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    #[error("Unexpected reply from session: {0}")]
    UnexpectedReply(String),
}

impl From<String> for SessionError {
    fn from(msg: String) -> Self {
        SessionError::ActorCommunicationError(msg)
    }
}
