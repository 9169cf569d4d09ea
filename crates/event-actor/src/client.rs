//! # Generic Client
//!
//! The `StateClient<S>` sends commands to an `EventActor<S>` and awaits the
//! answer. It holds only a sender, so cloning is cheap and clones can be
//! shared across tasks.

use crate::error::FrameworkError;
use crate::message::Request;
use crate::state::ActorState;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with an `EventActor`.
pub struct StateClient<S: ActorState> {
    sender: mpsc::Sender<Request<S>>,
}

// Manual impl: derive would require `S: Clone`.
impl<S: ActorState> Clone for StateClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: ActorState> std::fmt::Debug for StateClient<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateClient")
            .field("closed", &self.sender.is_closed())
            .finish()
    }
}

impl<S: ActorState> StateClient<S> {
    pub fn new(sender: mpsc::Sender<Request<S>>) -> Self {
        Self { sender }
    }

    /// Sends a command and waits for the state's answer.
    ///
    /// The outer error is a transport failure; the inner `Result` is what the
    /// state replied, including its own rejections.
    pub async fn request(
        &self,
        command: S::Command,
    ) -> Result<Result<S::Reply, S::Error>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(Request {
                command,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)
    }
}
