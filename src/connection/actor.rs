//! Task-owned client.
//!
//! [`spawn`] moves a [`StompClient`] into a tokio task. Caller operations
//! arrive through a cloneable [`ClientHandle`] and transport notifications
//! through a channel; one `select!` loop applies both, so the client is
//! never touched from two places at once.

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::connection::{ConnectionState, StompClient};
use crate::error::{Error, Result};
use crate::protocol::headers::{self, Headers};
use crate::protocol::{AckMode, Frame, Subscription};
use crate::transport::{Transport, TransportEvent};

/// Operations sent from a [`ClientHandle`] to the actor.
#[derive(Debug)]
pub enum ActorCommand {
    /// Open the transport.
    Connect,
    /// Send `DISCONNECT`.
    Disconnect,
    /// Close the transport.
    Close,
    /// Send a frame.
    Transmit(Frame),
    /// Report the session state and id.
    Status(oneshot::Sender<(ConnectionState, Option<String>)>),
    /// Stop the actor and hand the client back.
    Shutdown,
}

/// Cloneable handle to a spawned client.
///
/// Every method returns [`Error::EngineStopped`] once the actor has exited.
/// The actor exits when [`ClientHandle::shutdown`] is called or every handle
/// is dropped.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::UnboundedSender<ActorCommand>,
}

impl ClientHandle {
    fn command(&self, cmd: ActorCommand) -> Result<()> {
        self.cmd_tx.send(cmd).map_err(|_| Error::EngineStopped)
    }

    /// Whether the actor is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.cmd_tx.is_closed()
    }

    /// Open the transport; `CONNECT` follows once it reports open.
    pub fn connect(&self) -> Result<()> {
        self.command(ActorCommand::Connect)
    }

    /// Send `DISCONNECT`.
    pub fn disconnect(&self) -> Result<()> {
        self.command(ActorCommand::Disconnect)
    }

    /// Close the transport.
    pub fn close(&self) -> Result<()> {
        self.command(ActorCommand::Close)
    }

    /// Send an arbitrary frame.
    pub fn transmit(&self, frame: Frame) -> Result<()> {
        self.command(ActorCommand::Transmit(frame))
    }

    /// Publish a text body with `content-type: text/plain`.
    pub fn send(&self, destination: &str, body: impl Into<String>) -> Result<()> {
        self.transmit(Frame::send(destination, body, None, None))
    }

    /// Publish a text body with extra headers and an optional receipt id.
    pub fn send_with(
        &self,
        destination: &str,
        body: impl Into<String>,
        extra: Option<&Headers>,
        receipt: Option<&str>,
    ) -> Result<()> {
        self.transmit(Frame::send(destination, body, extra, receipt))
    }

    /// Serialize `value` as JSON and send it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `value` cannot be serialized, or
    /// [`Error::EngineStopped`] if the actor has exited.
    pub fn send_json<S: Serialize + ?Sized>(&self, destination: &str, value: &S) -> Result<()> {
        let body = serde_json::to_string(value)?;
        let extra = Headers::from([(headers::CONTENT_TYPE, headers::APPLICATION_JSON)]);
        self.send_with(destination, body, Some(&extra), None)
    }

    /// Subscribe with `auto` acknowledgement, using the destination as id.
    pub fn subscribe(&self, destination: &str) -> Result<()> {
        self.subscribe_with_ack(destination, AckMode::Auto)
    }

    /// Subscribe with the given acknowledgement mode.
    pub fn subscribe_with_ack(&self, destination: &str, ack: AckMode) -> Result<()> {
        self.subscribe_to(&Subscription::for_destination(destination).with_ack(ack))
    }

    /// Subscribe with raw headers.
    pub fn subscribe_with_headers(&self, destination: &str, extra: &Headers) -> Result<()> {
        self.transmit(Frame::subscribe_with_headers(destination, extra))
    }

    /// Subscribe using a prepared subscription record.
    pub fn subscribe_to(&self, subscription: &Subscription) -> Result<()> {
        self.transmit(Frame::subscribe(subscription))
    }

    /// Remove the subscription with the given id.
    pub fn unsubscribe(&self, id: &str) -> Result<()> {
        self.transmit(Frame::unsubscribe(id))
    }

    /// Start a transaction.
    pub fn begin(&self, transaction_id: &str) -> Result<()> {
        self.transmit(Frame::begin(transaction_id))
    }

    /// Commit a transaction.
    pub fn commit(&self, transaction_id: &str) -> Result<()> {
        self.transmit(Frame::commit(transaction_id))
    }

    /// Roll back a transaction.
    pub fn abort(&self, transaction_id: &str) -> Result<()> {
        self.transmit(Frame::abort(transaction_id))
    }

    /// Acknowledge a message.
    pub fn ack(&self, message_id: &str) -> Result<()> {
        self.transmit(Frame::ack(message_id, None))
    }

    /// Acknowledge a message, naming the subscription it arrived on.
    pub fn ack_with_subscription(&self, message_id: &str, subscription: &str) -> Result<()> {
        self.transmit(Frame::ack(message_id, Some(subscription)))
    }

    /// Current session state, after every command queued before this call.
    pub async fn state(&self) -> Result<ConnectionState> {
        Ok(self.status().await?.0)
    }

    /// Session id assigned by the broker, if connected.
    pub async fn session_id(&self) -> Result<Option<String>> {
        Ok(self.status().await?.1)
    }

    async fn status(&self) -> Result<(ConnectionState, Option<String>)> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command(ActorCommand::Status(reply_tx))?;
        reply_rx.await.map_err(|_| Error::EngineStopped)
    }

    /// Ask the actor to stop once queued commands are applied.
    pub fn shutdown(&self) -> Result<()> {
        self.command(ActorCommand::Shutdown)
    }
}

/// Run `client` in a new tokio task.
///
/// `transport_events` carries the transport's notifications. The returned
/// join handle resolves to the client once the actor stops.
pub fn spawn<T>(
    client: StompClient<T>,
    transport_events: mpsc::UnboundedReceiver<TransportEvent>,
) -> (ClientHandle, JoinHandle<StompClient<T>>)
where
    T: Transport + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(client, cmd_rx, transport_events));
    (ClientHandle { cmd_tx }, task)
}

async fn run<T: Transport>(
    mut client: StompClient<T>,
    mut cmd_rx: mpsc::UnboundedReceiver<ActorCommand>,
    mut transport_events: mpsc::UnboundedReceiver<TransportEvent>,
) -> StompClient<T> {
    info!("STOMP actor started");
    let mut transport_attached = true;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(ActorCommand::Shutdown) => {
                    info!("shutdown requested, stopping actor");
                    break;
                }
                Some(cmd) => apply(&mut client, cmd),
                None => {
                    info!("all handles dropped, stopping actor");
                    break;
                }
            },
            event = transport_events.recv(), if transport_attached => match event {
                Some(event) => client.handle_transport_event(event),
                None => {
                    debug!("transport event channel closed");
                    transport_attached = false;
                }
            },
        }
    }

    client
}

fn apply<T: Transport>(client: &mut StompClient<T>, cmd: ActorCommand) {
    match cmd {
        ActorCommand::Connect => client.connect(),
        ActorCommand::Disconnect => client.disconnect(),
        ActorCommand::Close => client.close(),
        ActorCommand::Transmit(frame) => client.transmit(&frame),
        ActorCommand::Status(reply_tx) => {
            let status = (client.state(), client.session_id().map(str::to_owned));
            let _ = reply_tx.send(status);
        }
        ActorCommand::Shutdown => {}
    }
}
