//! # Mock Framework
//!
//! Utilities for testing code that talks to an actor through a
//! [`StateClient`] without running the real state.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, scripted replies | real transitions |
//! | **Use case** | logic *around* the client (reply mapping, error mapping) | the state machine itself |
//! | **Error injection** | `return_err` | needs a failing dependency |
//!
//! ```rust
//! use event_actor::mock::MockClient;
//! use event_actor::{ActorState, Step};
//!
//! #[derive(Debug)] struct Lamp { on: bool }
//! #[derive(Debug)] enum LampCommand { Toggle }
//! #[derive(Debug)] enum LampEvent {}
//! #[derive(Debug, thiserror::Error)] #[error("lamp broken")] struct LampError;
//!
//! impl ActorState for Lamp {
//!     type Command = LampCommand; type Reply = bool; type Event = LampEvent;
//!     type Context = (); type Error = LampError;
//!     fn handle_command(&mut self, _: LampCommand, _: &()) -> Step<Self> {
//!         self.on = !self.on;
//!         Step::reply(self.on)
//!     }
//!     fn on_event(&mut self, event: LampEvent, _: &()) -> Result<bool, LampError> {
//!         match event {}
//!     }
//!     fn on_abandoned(&mut self, _: &()) -> LampError {
//!         LampError
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Lamp>::new();
//!     mock.expect_command().return_ok(true);
//!     mock.expect_command().return_err(LampError);
//!
//!     let client = mock.client();
//!     assert!(client.request(LampCommand::Toggle).await.unwrap().unwrap());
//!     assert!(client.request(LampCommand::Toggle).await.unwrap().is_err());
//!     mock.verify();
//! }
//! ```

use crate::message::{Request, Response};
use crate::state::ActorState;
use crate::StateClient;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

type Matcher<S> = Box<dyn Fn(&<S as ActorState>::Command) -> bool + Send>;

/// An expected command and the scripted answer for it.
struct Expectation<S: ActorState> {
    matches: Option<Matcher<S>>,
    response: Result<S::Reply, S::Error>,
}

type Expectations<S> = Arc<Mutex<VecDeque<Expectation<S>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A command that arrives with no
/// expectation left, or that fails the expectation's predicate, panics the
/// background task; the caller then observes `FrameworkError::ActorDropped`
/// and [`MockClient::verify`] reports the leftover expectation.
pub struct MockClient<S: ActorState> {
    client: StateClient<S>,
    expectations: Expectations<S>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: ActorState> MockClient<S> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<Request<S>>(100);
        let expectations: Expectations<S> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(Request {
                command,
                respond_to,
            }) = receiver.recv().await
            {
                let expectation = expectations_clone.lock().unwrap().pop_front();
                match expectation {
                    Some(Expectation { matches, response }) => {
                        if let Some(matches) = matches {
                            assert!(matches(&command), "Unexpected command: {command:?}");
                        }
                        let _ = respond_to.send(response);
                    }
                    None => panic!("No expectation left for command: {command:?}"),
                }
            }
        });

        Self {
            client: StateClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StateClient<S> {
        self.client.clone()
    }

    /// Expects any command.
    pub fn expect_command(&mut self) -> ExpectationBuilder<S> {
        ExpectationBuilder {
            matches: None,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a command satisfying `predicate`.
    pub fn expect_matching(
        &mut self,
        predicate: impl Fn(&S::Command) -> bool + Send + 'static,
    ) -> ExpectationBuilder<S> {
        ExpectationBuilder {
            matches: Some(Box::new(predicate)),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<S: ActorState> Default for MockClient<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned by [`MockClient::expect_command`] and [`MockClient::expect_matching`].
pub struct ExpectationBuilder<S: ActorState> {
    matches: Option<Matcher<S>>,
    expectations: Expectations<S>,
}

impl<S: ActorState> ExpectationBuilder<S> {
    /// Answers the command with `reply`.
    pub fn return_ok(self, reply: S::Reply) {
        self.push(Ok(reply));
    }

    /// Answers the command with a state rejection.
    pub fn return_err(self, error: S::Error) {
        self.push(Err(error));
    }

    fn push(self, response: Result<S::Reply, S::Error>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            matches: self.matches,
            response,
        });
    }
}

/// Creates a client and the receiver its requests land on.
///
/// For tests that want to inspect each command and answer it by hand.
/// Consider [`MockClient`] for the fluent API.
pub fn create_mock_client<S: ActorState>(
    buffer_size: usize,
) -> (StateClient<S>, mpsc::Receiver<Request<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StateClient::new(sender), receiver)
}

/// Waits for the next request and splits it into command and responder.
pub async fn expect_request<S: ActorState>(
    receiver: &mut mpsc::Receiver<Request<S>>,
) -> Option<(S::Command, Response<S>)> {
    receiver
        .recv()
        .await
        .map(|Request { command, respond_to }| (command, respond_to))
}
