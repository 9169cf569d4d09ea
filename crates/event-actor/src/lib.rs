//! # Event Actor
//!
//! Building blocks for a single-owner, event-driven actor on Tokio.
//!
//! An [`EventActor`] owns exactly one state value. Commands arrive over a
//! channel and are applied one at a time, so the state is never shared and
//! never locked. Work that has to wait (network calls, timers) is returned by
//! the state as a deferred future; the actor runs it off-loop and applies its
//! completion event back on the owning task before answering the caller.
//!
//! This gives the cooperative, single-logical-thread model of an interactive
//! front end: user commands and async completions interleave, but never race.
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`ActorState`]): your transitions, as synchronous handlers
//! 2. **Runtime Layer** ([`EventActor`]): message loop and deferred work
//! 3. **Interface Layer** ([`StateClient`], [`ActorClient`]): typed async calls
//!
//! ## Errors
//!
//! Transport failures ([`FrameworkError`]) and state rejections
//! (`ActorState::Error`) are kept apart, so a domain client can match on its
//! own error enum without downcasting.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers commands from a script of expected replies.
//! See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod tracing;

// Re-export core types for convenience
pub use actor::EventActor;
pub use client::StateClient;
pub use client_trait::ActorClient;
pub use error::FrameworkError;
pub use message::{Request, Response};
pub use state::{ActorState, Deferred, Step};
