//! # ActorState Trait
//!
//! The `ActorState` trait is the contract for anything owned by an
//! [`EventActor`](crate::EventActor). The state receives commands one at a
//! time and answers each with a [`Step`]: either an immediate reply, or a
//! deferred future whose output (an `Event`) is fed back through
//! [`ActorState::on_event`] on the owning task.
//!
//! # Architecture Note
//! Handlers are plain synchronous methods taking `&mut self`. Anything that
//! has to wait (network calls, timers) is moved out of the handler into a
//! [`Deferred`] future. The future must own whatever it needs (clone `Arc`s
//! out of the context), because it runs while the actor keeps serving other
//! commands. State is only ever touched from the actor task, so the state
//! itself needs no locks.

use std::fmt::{self, Debug};
use std::future::Future;
use std::pin::Pin;

/// A unit of asynchronous work handed back to the actor.
pub type Deferred<E> = Pin<Box<dyn Future<Output = E> + Send + 'static>>;

/// Trait that any state must implement to be owned by an `EventActor`.
pub trait ActorState: Sized + Send + 'static {
    /// Requests accepted by the state (e.g. `SelectRestaurant`).
    type Command: Send + Debug + 'static;

    /// The result type returned for commands.
    type Reply: Send + Debug + 'static;

    /// Completion of deferred work, applied back on the actor task.
    type Event: Send + Debug + 'static;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this state.
    ///
    /// One error enum per state rather than one per command, like the
    /// per-actor error types elsewhere in this workspace.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Handle a command. Returns either the reply or deferred work.
    fn handle_command(&mut self, command: Self::Command, ctx: &Self::Context) -> Step<Self>;

    /// Apply the completion of deferred work and produce the reply for the
    /// caller that issued the original command.
    fn on_event(
        &mut self,
        event: Self::Event,
        ctx: &Self::Context,
    ) -> Result<Self::Reply, Self::Error>;

    /// Deferred work panicked before producing its event. Undo whatever the
    /// handler set up for it and return the error for the waiting caller.
    fn on_abandoned(&mut self, ctx: &Self::Context) -> Self::Error;
}

/// Outcome of [`ActorState::handle_command`].
pub enum Step<S: ActorState> {
    /// Answer the caller now.
    Reply(Result<S::Reply, S::Error>),
    /// Run the future off the actor task and answer once its event is applied.
    Defer(Deferred<S::Event>),
}

impl<S: ActorState> Step<S> {
    pub fn reply(reply: S::Reply) -> Self {
        Step::Reply(Ok(reply))
    }

    pub fn reject(error: S::Error) -> Self {
        Step::Reply(Err(error))
    }

    pub fn defer<F>(work: F) -> Self
    where
        F: Future<Output = S::Event> + Send + 'static,
    {
        Step::Defer(Box::pin(work))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Step::Defer(_))
    }
}

impl<S: ActorState> From<Result<S::Reply, S::Error>> for Step<S> {
    fn from(result: Result<S::Reply, S::Error>) -> Self {
        Step::Reply(result)
    }
}

impl<S: ActorState> Debug for Step<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Reply(result) => f.debug_tuple("Reply").field(result).finish(),
            Step::Defer(_) => f.write_str("Defer(..)"),
        }
    }
}
