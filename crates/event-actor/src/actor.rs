//! # Event Actor
//!
//! This module defines the `EventActor`, the server half of the framework. It
//! owns one [`ActorState`] value and applies commands to it strictly in
//! arrival order.
//!
//! ## Deferred work
//!
//! When a handler returns [`Step::Defer`], the future is spawned into a
//! `JoinSet` together with the caller's response channel. The actor keeps
//! receiving commands while the future runs. When it finishes, its event is
//! applied through [`ActorState::on_event`] on the actor task and the result
//! goes back to the waiting caller. The state is therefore only mutated by the
//! actor task, and the state decides itself (through its own flags) which
//! commands are legal while work is outstanding.
//!
//! Each deferred future runs in its own task. If it panics, the actor calls
//! [`ActorState::on_abandoned`] instead so the state can release its flags,
//! and the caller receives that error.
//!
//! ```rust
//! use event_actor::{ActorState, EventActor, Step};
//!
//! #[derive(Debug, Default)]
//! struct Counter { value: u32 }
//!
//! #[derive(Debug)] enum CounterCommand { Bump, BumpLater }
//! #[derive(Debug)] struct Bumped;
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! impl ActorState for Counter {
//!     type Command = CounterCommand;
//!     type Reply = u32;
//!     type Event = Bumped;
//!     type Context = ();
//!     type Error = CounterError;
//!
//!     fn handle_command(&mut self, command: CounterCommand, _: &()) -> Step<Self> {
//!         match command {
//!             CounterCommand::Bump => {
//!                 self.value += 1;
//!                 Step::reply(self.value)
//!             }
//!             CounterCommand::BumpLater => Step::defer(async { Bumped }),
//!         }
//!     }
//!
//!     fn on_event(&mut self, _: Bumped, _: &()) -> Result<u32, CounterError> {
//!         self.value += 1;
//!         Ok(self.value)
//!     }
//!
//!     fn on_abandoned(&mut self, _: &()) -> CounterError {
//!         CounterError
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = EventActor::new(Counter::default(), 10);
//!     tokio::spawn(actor.run(()));
//!
//!     assert_eq!(client.request(CounterCommand::Bump).await.unwrap().unwrap(), 1);
//!     assert_eq!(client.request(CounterCommand::BumpLater).await.unwrap().unwrap(), 2);
//! }
//! ```

use crate::client::StateClient;
use crate::message::{Request, Response};
use crate::state::{ActorState, Step};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info};

/// A finished deferred task: its event (or the panic that replaced it) and
/// the caller still waiting for an answer.
type Settled<S> = (Result<<S as ActorState>::Event, JoinError>, Response<S>);

/// The generic actor that owns a single state value.
///
/// **Concurrency model**: one task, one state, no locks. Deferred futures run
/// concurrently with the loop, but only their *events* touch the state, and
/// events are applied on this task.
pub struct EventActor<S: ActorState> {
    receiver: mpsc::Receiver<Request<S>>,
    state: S,
}

impl<S: ActorState> EventActor<S> {
    /// Creates a new `EventActor` around `state` and its associated `StateClient`.
    ///
    /// `buffer_size` is the capacity of the command channel; when it is full,
    /// client calls wait for space.
    pub fn new(state: S, buffer_size: usize) -> (Self, StateClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, state };
        let client = StateClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client is dropped and all
    /// deferred work has been applied. Returns the final state.
    ///
    /// # Context Injection
    /// The `context` argument is passed to every handler, so dependencies can
    /// be wired after the actor was constructed but before the loop starts.
    pub async fn run(mut self, context: S::Context) -> S {
        // Just the type name, e.g. "Session" rather than its full path
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(state_type, "Actor started");

        let mut in_flight: JoinSet<Settled<S>> = JoinSet::new();

        loop {
            tokio::select! {
                msg = self.receiver.recv() => {
                    let Some(Request { command, respond_to }) = msg else {
                        break;
                    };
                    debug!(state_type, ?command, "Command");
                    match self.state.handle_command(command, &context) {
                        Step::Reply(result) => {
                            if let Err(e) = &result {
                                debug!(state_type, error = %e, "Rejected");
                            }
                            let _ = respond_to.send(result);
                        }
                        Step::Defer(work) => {
                            in_flight.spawn(async move { (tokio::spawn(work).await, respond_to) });
                            debug!(state_type, in_flight = in_flight.len(), "Deferred");
                        }
                    }
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    self.complete(state_type, joined, &context);
                }
            }
        }

        // Channel closed: finish outstanding work before stopping.
        while let Some(joined) = in_flight.join_next().await {
            self.complete(state_type, joined, &context);
        }

        info!(state_type, "Shutdown");
        self.state
    }

    fn complete(
        &mut self,
        state_type: &str,
        joined: Result<Settled<S>, JoinError>,
        context: &S::Context,
    ) {
        match joined {
            Ok((Ok(event), respond_to)) => {
                debug!(state_type, ?event, "Event");
                let result = self.state.on_event(event, context);
                if let Err(e) = &result {
                    info!(state_type, error = %e, "Event failed");
                }
                let _ = respond_to.send(result);
            }
            Ok((Err(e), respond_to)) => {
                error!(state_type, error = %e, "Deferred work panicked");
                let _ = respond_to.send(Err(self.state.on_abandoned(context)));
            }
            // The response sender died with the task; the caller sees ActorDropped.
            Err(e) => error!(state_type, error = %e, "Deferred task failed"),
        }
    }
}
