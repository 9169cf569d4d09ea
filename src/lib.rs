//! # Storefront
//!
//! A food-ordering storefront engine. A customer browses generated restaurant
//! listings, opens a menu, builds a cart, checks out with contact and
//! delivery details and receives an order confirmation.
//!
//! ## Core Components
//!
//! - **[session]**: the view state machine, owned by a single
//!   [`EventActor`](event_actor::EventActor) task.
//! - **[clients]**: [`SessionClient`](clients::SessionClient), the typed async API for a session.
//! - **[cart]**: the cart ledger and its totals.
//! - **[pipeline]**: confirm-then-record order submission.
//! - **[services]**: the generation service (HTTP proxy or offline catalog) and the order sink.
//! - **[alert]**: transient success and error notifications.
//! - **[lifecycle]**: starting and stopping a storefront.
//! - **[config]**: command line and environment configuration.
//! - **[model]**: plain data types.
//!
//! ## Testing
//!
//! [`services::mock`] scripts the outside services and
//! [`event_actor::mock`] scripts the session actor itself.

pub mod alert;
pub mod cart;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod pipeline;
pub mod services;
pub mod session;
