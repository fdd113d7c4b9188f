use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::codec;
use crate::config::Config;
use crate::connection::ConnectionState;
use crate::connection::fragmenter::ChunkSplitter;
use crate::dispatcher::{self, Inbound};
use crate::error::{Error, Result};
use crate::event::{self, EventSink, EventStream, StompEvent};
use crate::protocol::headers::{self, Headers};
use crate::protocol::{AckMode, Frame, Subscription};
use crate::transport::{Transport, TransportEvent};

/// A STOMP client session over an injected transport.
///
/// `StompClient` owns the transport, the session state and the sending half
/// of the event channel. Every operation takes `&mut self`, so whoever owns
/// the client (a single task, a mutex, or the [`actor`](super::actor)) is the
/// one serialization point for state changes, outbound writes and inbound
/// dispatch.
///
/// Operations return nothing: failures surface later as [`StompEvent`]s on
/// the stream returned by [`StompClient::new`].
///
/// ## Example
///
/// ```rust,ignore
/// use wsstomp::{Config, StompClient, TransportEvent};
///
/// let (mut client, mut events) = StompClient::new(transport, Config::new().with_accept_version("1.2"));
/// client.connect();
///
/// // Feed transport notifications back in as they arrive.
/// client.handle_transport_event(TransportEvent::Opened);
///
/// client.subscribe("/topic/prices");
/// while let Some(event) = events.recv().await {
///     println!("{event:?}");
/// }
/// ```
#[derive(Debug)]
pub struct StompClient<T> {
    transport: T,
    config: Config,
    state: ConnectionState,
    session_id: Option<String>,
    events: EventSink,
}

impl<T> StompClient<T> {
    /// Create a client and the stream its events are delivered on.
    pub fn new(transport: T, config: Config) -> (Self, EventStream) {
        let (sink, stream) = event::channel();
        (Self::with_event_sink(transport, config, sink), stream)
    }

    /// Create a client that reports into an existing event sink.
    pub fn with_event_sink(transport: T, config: Config, events: EventSink) -> Self {
        Self {
            transport,
            config,
            state: ConnectionState::Disconnected,
            session_id: None,
            events,
        }
    }

    /// Get the current session state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Session id assigned by the broker, while connected.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Check if the broker has accepted the session.
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Get the session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get a mutable reference to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn set_state(&mut self, state: ConnectionState) {
        if self.state != state {
            info!(from = %self.state, to = %state, "STOMP state change");
            self.state = state;
        }
    }

    fn reset(&mut self) {
        self.set_state(ConnectionState::Disconnected);
        self.session_id = None;
    }
}

impl<T: Transport> StompClient<T> {
    /// Open the transport. `CONNECT` is sent once the transport reports
    /// [`TransportEvent::Opened`].
    ///
    /// Does nothing if the transport is already open or opening.
    pub fn connect(&mut self) {
        if self.transport.is_open() || self.state == ConnectionState::Connecting {
            debug!(state = %self.state, "transport already open, connect ignored");
            return;
        }
        match self.transport.open() {
            Ok(()) => self.set_state(ConnectionState::Connecting),
            Err(error) => self.fail(error),
        }
    }

    /// Send `DISCONNECT`. The caller closes the transport afterwards.
    ///
    /// Does nothing when no session is being established or established.
    /// If the transport has not finished opening, the pending open is
    /// abandoned by closing the transport and `Disconnected` fires.
    pub fn disconnect(&mut self) {
        if !self.state.can_disconnect() {
            debug!(state = %self.state, "disconnect ignored");
            return;
        }
        if !self.transport.is_open() {
            debug!(state = %self.state, "disconnect before transport opened, abandoning open");
            match self.transport.close() {
                Ok(()) => {
                    self.reset();
                    self.events.emit(StompEvent::Disconnected);
                }
                Err(error) => self.fail(error),
            }
            return;
        }
        if self.submit(&Frame::disconnect(unix_now())).is_ok() {
            self.set_state(ConnectionState::Disconnecting);
        }
    }

    /// Close the transport. The state resets when the transport reports
    /// the close.
    pub fn close(&mut self) {
        if let Err(error) = self.transport.close() {
            self.fail(error);
        }
    }

    /// Publish a text body with `content-type: text/plain`.
    pub fn send(&mut self, destination: &str, body: impl Into<String>) {
        self.send_with(destination, body, None, None);
    }

    /// Publish a text body with extra headers and an optional receipt id.
    pub fn send_with(
        &mut self,
        destination: &str,
        body: impl Into<String>,
        extra: Option<&Headers>,
        receipt: Option<&str>,
    ) {
        self.transmit(&Frame::send(destination, body, extra, receipt));
    }

    /// Publish a value serialized as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if `value` cannot be serialized;
    /// nothing is sent in that case.
    pub fn send_json<S: Serialize + ?Sized>(&mut self, destination: &str, value: &S) -> Result<()> {
        let body = serde_json::to_string(value)?;
        let extra = Headers::from([(headers::CONTENT_TYPE, headers::APPLICATION_JSON)]);
        self.send_with(destination, body, Some(&extra), None);
        Ok(())
    }

    /// Subscribe with `auto` acknowledgement, using the destination as id.
    pub fn subscribe(&mut self, destination: &str) {
        self.subscribe_with_ack(destination, AckMode::Auto);
    }

    /// Subscribe with the given acknowledgement mode, using the destination
    /// as id.
    pub fn subscribe_with_ack(&mut self, destination: &str, ack: AckMode) {
        self.subscribe_to(&Subscription::for_destination(destination).with_ack(ack));
    }

    /// Subscribe with raw headers.
    pub fn subscribe_with_headers(&mut self, destination: &str, extra: &Headers) {
        self.transmit(&Frame::subscribe_with_headers(destination, extra));
    }

    /// Subscribe using a prepared subscription record.
    pub fn subscribe_to(&mut self, subscription: &Subscription) {
        self.transmit(&Frame::subscribe(subscription));
    }

    /// Remove the subscription with the given id.
    pub fn unsubscribe(&mut self, id: &str) {
        self.transmit(&Frame::unsubscribe(id));
    }

    /// Start a transaction.
    pub fn begin(&mut self, transaction_id: &str) {
        self.transmit(&Frame::begin(transaction_id));
    }

    /// Commit a transaction.
    pub fn commit(&mut self, transaction_id: &str) {
        self.transmit(&Frame::commit(transaction_id));
    }

    /// Roll back a transaction.
    pub fn abort(&mut self, transaction_id: &str) {
        self.transmit(&Frame::abort(transaction_id));
    }

    /// Acknowledge a message received on a `client` ack subscription.
    pub fn ack(&mut self, message_id: &str) {
        self.transmit(&Frame::ack(message_id, None));
    }

    /// Acknowledge a message, naming the subscription it arrived on.
    pub fn ack_with_subscription(&mut self, message_id: &str, subscription: &str) {
        self.transmit(&Frame::ack(message_id, Some(subscription)));
    }

    /// Send an arbitrary frame.
    ///
    /// If the transport is not open nothing is written and
    /// [`StompEvent::Disconnected`] fires. A write failure fires
    /// [`StompEvent::WillDisconnect`] and resets the session.
    pub fn transmit(&mut self, frame: &Frame) {
        // Outcome already reported through events.
        let _ = self.submit(frame);
    }

    /// Apply a notification from the transport.
    pub fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Opened => {
                if self.state != ConnectionState::Connecting {
                    debug!(state = %self.state, "transport opened without a pending connect, closing");
                    if let Err(error) = self.transport.close() {
                        warn!(%error, "failed to close unrequested transport");
                    }
                    return;
                }
                debug!("transport opened, sending CONNECT");
                let connect = Frame::connect(&self.config.connection_headers);
                self.transmit(&connect);
            }
            TransportEvent::Message(payload) => match codec::decode_payload(&payload) {
                Ok(frame) => self.dispatch(frame),
                Err(error) => warn!(%error, len = payload.len(), "dropping undecodable payload"),
            },
            TransportEvent::Closed {
                code,
                reason,
                was_clean,
            } => {
                if self.state == ConnectionState::Disconnected {
                    debug!(code, "transport closed after session reset");
                    return;
                }
                info!(code, %reason, was_clean, "transport closed");
                self.reset();
                if was_clean {
                    self.events.emit(StompEvent::Disconnected);
                } else {
                    self.events
                        .emit(StompEvent::WillDisconnect(Error::ConnectionClosed { code, reason }));
                }
            }
            TransportEvent::Error(message) => self.fail(Error::Transport(message)),
        }
    }

    fn dispatch(&mut self, frame: Frame) {
        debug!(command = %frame.command, len = frame.content_length(), "received frame");
        match dispatcher::route(frame) {
            Inbound::Connected { session_id } => {
                if self.state != ConnectionState::Connecting {
                    debug!(state = %self.state, "ignoring CONNECTED outside a pending connect");
                    return;
                }
                if let Some(id) = &session_id {
                    self.session_id = Some(id.clone());
                }
                self.set_state(ConnectionState::Connected);
                self.events.emit(StompEvent::Connected { session_id });
            }
            Inbound::Heartbeat => {
                match self.write_frame(&Frame::heartbeat()) {
                    Ok(()) => {}
                    Err(Error::NotConnected) => {
                        debug!("transport not open, heartbeat not echoed");
                    }
                    Err(error) => self.fail(error),
                }
                self.events.emit(StompEvent::Ping);
            }
            Inbound::Ignored(command) => {
                debug!(%command, "ignoring inbound frame");
            }
            inbound => {
                if let Some(event) = inbound.into_event() {
                    self.events.emit(event);
                }
            }
        }
    }

    /// Write a frame and report failures through events.
    fn submit(&mut self, frame: &Frame) -> Result<()> {
        let result = self.write_frame(frame);
        match &result {
            Ok(()) => {}
            Err(Error::NotConnected) => {
                warn!(command = %frame.command, "transport not open, frame not sent");
                self.events.emit(StompEvent::Disconnected);
            }
            Err(error) => self.fail(error.clone()),
        }
        result
    }

    /// Encode a frame and write it, chunked to `max_frame_size`.
    ///
    /// All chunks of one frame are written before returning.
    fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        if !self.transport.is_open() {
            return Err(Error::NotConnected);
        }

        let text = codec::encode(frame);
        let splitter = ChunkSplitter::new(&text, self.config.max_frame_size);
        if splitter.needs_chunking() {
            debug!(
                command = %frame.command,
                len = text.len(),
                max = self.config.max_frame_size,
                "chunking frame"
            );
        }
        for chunk in splitter {
            self.transport.send(chunk)?;
        }

        trace!(command = %frame.command, len = text.len(), "sent frame");
        Ok(())
    }

    fn fail(&mut self, error: Error) {
        warn!(%error, state = %self.state, "transport failure");
        self.reset();
        self.events.emit(StompEvent::WillDisconnect(error));
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
