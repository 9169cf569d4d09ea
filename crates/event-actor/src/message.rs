//! # Generic Messages
//!
//! Message types exchanged between the `StateClient` and the `EventActor`.

use crate::state::ActorState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
///
/// The outer `Result` of the client call carries transport errors; this
/// channel only ever carries the state's own answer.
pub type Response<S> =
    oneshot::Sender<Result<<S as ActorState>::Reply, <S as ActorState>::Error>>;

/// A command together with the channel its answer goes back on.
#[derive(Debug)]
pub struct Request<S: ActorState> {
    pub command: S::Command,
    pub respond_to: Response<S>,
}
