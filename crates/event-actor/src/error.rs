//! # Framework Errors
//!
//! Transport-level failures between an [`StateClient`](crate::StateClient) and
//! its [`EventActor`](crate::EventActor). Rejections produced by the state
//! itself travel separately as `ActorState::Error`, so callers keep the typed
//! domain error instead of a boxed one.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
}
