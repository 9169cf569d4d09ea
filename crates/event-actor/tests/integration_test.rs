use event_actor::{ActorClient, ActorState, EventActor, FrameworkError, StateClient, Step};
use std::time::Duration;
use tokio::sync::oneshot;

// --- Test State ---

/// A tiny "kettle": boiling takes time, and while it boils nothing else may
/// happen. Mirrors how loading flags gate commands in real states.
#[derive(Debug, Default)]
struct Kettle {
    boiling: bool,
    boils: u32,
    log: Vec<&'static str>,
}

#[derive(Debug)]
enum KettleCommand {
    Boil { gate: oneshot::Receiver<()> },
    Pour,
    Count,
    /// Heats with a faulty element: the deferred work panics.
    Crack,
}

#[derive(Debug, PartialEq)]
enum KettleReply {
    Boiled(u32),
    Poured,
    Count(u32),
}

#[derive(Debug)]
enum KettleEvent {
    Boiled,
    GateDropped,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum KettleError {
    #[error("kettle is busy")]
    Busy,
    #[error("gate dropped")]
    GateDropped,
    #[error("element failed")]
    ElementFailed,
    #[error("transport: {0}")]
    Transport(String),
}

async fn faulty_element() -> KettleEvent {
    panic!("heating element burnt out")
}

impl ActorState for Kettle {
    type Command = KettleCommand;
    type Reply = KettleReply;
    type Event = KettleEvent;
    type Context = ();
    type Error = KettleError;

    fn handle_command(&mut self, command: KettleCommand, _ctx: &()) -> Step<Self> {
        match command {
            KettleCommand::Boil { gate } => {
                if self.boiling {
                    return Step::reject(KettleError::Busy);
                }
                self.boiling = true;
                self.log.push("boil");
                Step::defer(async move {
                    match gate.await {
                        Ok(()) => KettleEvent::Boiled,
                        Err(_) => KettleEvent::GateDropped,
                    }
                })
            }
            KettleCommand::Pour => {
                if self.boiling {
                    return Step::reject(KettleError::Busy);
                }
                self.log.push("pour");
                Step::reply(KettleReply::Poured)
            }
            KettleCommand::Count => Step::reply(KettleReply::Count(self.boils)),
            KettleCommand::Crack => {
                if self.boiling {
                    return Step::reject(KettleError::Busy);
                }
                self.boiling = true;
                self.log.push("crack");
                Step::defer(faulty_element())
            }
        }
    }

    fn on_event(&mut self, event: KettleEvent, _ctx: &()) -> Result<KettleReply, KettleError> {
        self.boiling = false;
        match event {
            KettleEvent::Boiled => {
                self.boils += 1;
                self.log.push("boiled");
                Ok(KettleReply::Boiled(self.boils))
            }
            KettleEvent::GateDropped => Err(KettleError::GateDropped),
        }
    }

    fn on_abandoned(&mut self, _ctx: &()) -> KettleError {
        self.boiling = false;
        KettleError::ElementFailed
    }
}

struct KettleClient {
    inner: StateClient<Kettle>,
}

impl ActorClient<Kettle> for KettleClient {
    type Error = KettleError;

    fn inner(&self) -> &StateClient<Kettle> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        KettleError::Transport(e.to_string())
    }
}

// --- Tests ---

#[tokio::test]
async fn test_commands_are_served_while_work_is_deferred() {
    let (actor, client) = EventActor::new(Kettle::default(), 10);
    let handle = tokio::spawn(actor.run(()));

    let (release, gate) = oneshot::channel();
    let boil_client = client.clone();
    let boil = tokio::spawn(async move { boil_client.request(KettleCommand::Boil { gate }).await });

    // Wait until the boil has been accepted.
    tokio::time::sleep(Duration::from_millis(20)).await;

    // The actor keeps answering, and the state rejects conflicting commands.
    let pour = client.request(KettleCommand::Pour).await.unwrap();
    assert_eq!(pour, Err(KettleError::Busy));
    let (_unused, second_gate) = oneshot::channel();
    let second = client
        .request(KettleCommand::Boil { gate: second_gate })
        .await
        .unwrap();
    assert_eq!(second, Err(KettleError::Busy));

    release.send(()).unwrap();
    let boiled = boil.await.unwrap().unwrap();
    assert_eq!(boiled, Ok(KettleReply::Boiled(1)));

    // Flag released by the completion event.
    let pour = client.request(KettleCommand::Pour).await.unwrap();
    assert_eq!(pour, Ok(KettleReply::Poured));

    drop(client);
    let kettle = handle.await.unwrap();
    assert_eq!(kettle.log, vec!["boil", "boiled", "pour"]);
}

#[tokio::test]
async fn test_event_errors_reach_the_caller() {
    let (actor, client) = EventActor::new(Kettle::default(), 10);
    tokio::spawn(actor.run(()));

    let (release, gate) = oneshot::channel::<()>();
    drop(release);
    let result = client.request(KettleCommand::Boil { gate }).await.unwrap();
    assert_eq!(result, Err(KettleError::GateDropped));

    let count = client.request(KettleCommand::Count).await.unwrap();
    assert_eq!(count, Ok(KettleReply::Count(0)));
}

#[tokio::test]
async fn test_actor_stops_after_last_client_and_pending_work() {
    let (actor, client) = EventActor::new(Kettle::default(), 10);
    let handle = tokio::spawn(actor.run(()));

    let (release, gate) = oneshot::channel();
    let boil = tokio::spawn({
        let client = client.clone();
        async move { client.request(KettleCommand::Boil { gate }).await }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Every client handle is gone except the one inside the boil task.
    drop(client);
    release.send(()).unwrap();

    assert_eq!(boil.await.unwrap().unwrap(), Ok(KettleReply::Boiled(1)));
    let kettle = handle.await.unwrap();
    assert_eq!(kettle.boils, 1);
    assert!(!kettle.boiling);
}

#[tokio::test]
async fn test_panicking_work_releases_the_state() {
    let (actor, client) = EventActor::new(Kettle::default(), 10);
    let handle = tokio::spawn(actor.run(()));

    let cracked = client.request(KettleCommand::Crack).await.unwrap();
    assert_eq!(cracked, Err(KettleError::ElementFailed));

    // The actor survived and the busy flag was cleared.
    let pour = client.request(KettleCommand::Pour).await.unwrap();
    assert_eq!(pour, Ok(KettleReply::Poured));

    drop(client);
    let kettle = handle.await.unwrap();
    assert!(!kettle.boiling);
    assert_eq!(kettle.log, vec!["crack", "pour"]);
}

#[tokio::test]
async fn test_actor_client_flattens_errors() {
    let (actor, inner) = EventActor::new(Kettle::default(), 10);
    let handle = tokio::spawn(actor.run(()));
    let client = KettleClient { inner };

    assert_eq!(
        client.dispatch(KettleCommand::Count).await,
        Ok(KettleReply::Count(0))
    );

    handle.abort();
    let _ = handle.await;
    let closed = client.dispatch(KettleCommand::Count).await;
    assert_eq!(closed, Err(KettleError::Transport("Actor closed".into())));
}
