//! # ActorClient Trait
//!
//! Common interface for domain-specific clients built on a generic
//! `StateClient`. Implementors provide the inner client and an error mapping;
//! [`ActorClient::dispatch`] then flattens transport and state errors into the
//! domain error type.
use crate::{ActorState, FrameworkError, StateClient};
use async_trait::async_trait;

/// Trait for domain clients wrapping a [`StateClient`].
#[async_trait]
pub trait ActorClient<S: ActorState>: Send + Sync {
    /// The domain error type. State rejections convert into it directly.
    type Error: From<S::Error> + Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &StateClient<S>;

    /// Map framework errors to the domain error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Send a command and return the state's reply.
    #[tracing::instrument(skip(self))]
    async fn dispatch(&self, command: S::Command) -> Result<S::Reply, Self::Error> {
        tracing::debug!("Sending request");
        let reply = self
            .inner()
            .request(command)
            .await
            .map_err(Self::map_error)?;
        reply.map_err(Into::into)
    }
}
