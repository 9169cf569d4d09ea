//! Type-safe wrappers around [`StateClient`](event_actor::StateClient).

pub mod session_client;

pub use session_client::*;
