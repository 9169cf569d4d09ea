//! # Session
//!
//! The storefront's view state machine. One [`Session`] value holds
//! everything a customer sees: the current [`View`], the restaurant listing,
//! the per-order [`SessionContext`] (selection, menu, cart, checkout form,
//! confirmed order), the loading flags and the alert channel.
//!
//! ## Structure
//!
//! - [`view`] - the five screens
//! - [`context`] - [`SessionContext`], reset as one unit on "new order"
//! - [`checkout`] - [`CheckoutForm`] and its validation
//! - [`command`] - [`SessionCommand`], [`SessionReply`], [`SessionEvent`], [`SessionSnapshot`]
//! - [`error`] - [`SessionError`]
//! - [`state`] - the [`ActorState`](event_actor::ActorState) implementation
//! - [`new()`] - factory that creates the actor and its client
//!
//! ## Transitions
//!
//! ```text
//! Listing --select--> Menu --open cart--> Cart --checkout--> Checkout --submit ok--> Confirmation
//!    ^                 |                   |                     |                      |
//!    +------back-------+   back: Menu if a restaurant is selected, else Listing        |
//!    +---------------------------------- new order / home (full reset) ----------------+
//! ```
//!
//! The header cart button opens `Cart` from anywhere and home always returns
//! to `Listing`, dropping the selected restaurant. While the restaurant
//! listing, a menu or an order submission is in flight, every other command
//! except [`SessionCommand::Snapshot`] and [`SessionCommand::DismissAlert`] is
//! rejected with [`SessionError::Busy`].
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront::clients::SessionClient;
//! use storefront::services::{LogSink, OfflineCatalog};
//! use storefront::session::{self, Session, SessionDeps, View};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = session::new(Session::default());
//!     let client = SessionClient::new(generic_client);
//!
//!     let deps = SessionDeps::new(Arc::new(OfflineCatalog::new()), Arc::new(LogSink::default()));
//!     let handle = tokio::spawn(actor.run(deps));
//!
//!     let restaurants = client.load_restaurants().await?;
//!     client.select_restaurant(restaurants[0].id.clone()).await?;
//!     assert_eq!(client.snapshot().await?.view, View::Menu);
//!
//!     drop(client);
//!     handle.await?;
//!     Ok(())
//! }
//! ```

pub mod checkout;
pub mod command;
pub mod context;
pub mod error;
pub mod state;
pub mod view;

pub use checkout::*;
pub use command::*;
pub use context::*;
pub use error::*;
pub use state::*;
pub use view::*;

use event_actor::{EventActor, StateClient};

/// Creates a new session actor and its client.
pub fn new(session: Session) -> (EventActor<Session>, StateClient<Session>) {
    EventActor::new(session, 32)
}
