//! Application-facing notifications.
//!
//! The engine never calls application code from the transport's context.
//! Every notification becomes a [`StompEvent`] pushed, in arrival order, onto
//! one unbounded channel; the application drains the matching
//! [`EventStream`] on whatever task it likes, either matching on the events
//! directly or forwarding them to a [`StompListener`].

use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::Error;
use crate::protocol::Headers;

/// A notification produced by the engine.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum StompEvent {
    /// The broker accepted the session.
    Connected {
        /// Session id from the `session` header, if the broker sent one.
        session_id: Option<String>,
    },
    /// The transport is closed, or a write was attempted while it was.
    Disconnected,
    /// The transport failed or closed uncleanly.
    WillDisconnect(Error),
    /// A `MESSAGE` frame arrived.
    Message {
        /// Decoded JSON body. `None` for non-JSON content types and for
        /// bodies that fail to parse.
        body: Option<Value>,
        /// Body text as received.
        raw_body: Option<String>,
        /// All frame headers.
        headers: Headers,
        /// Value of the `destination` header, empty if absent.
        destination: String,
    },
    /// The broker confirmed a frame carrying a `receipt` header.
    Receipt(String),
    /// The broker sent an `ERROR` frame.
    Error {
        /// The `message` header.
        message: String,
        /// The frame body.
        detail: Option<String>,
    },
    /// A heartbeat arrived and was echoed.
    Ping,
}

impl StompEvent {
    /// Invoke the listener method matching this event.
    pub fn deliver<L: StompListener + ?Sized>(&self, listener: &mut L) {
        match self {
            StompEvent::Connected { .. } => listener.on_connected(),
            StompEvent::Disconnected => listener.on_disconnected(),
            StompEvent::WillDisconnect(error) => listener.on_will_disconnect(error),
            StompEvent::Message {
                body,
                headers,
                destination,
                ..
            } => listener.on_message(body.as_ref(), headers, destination),
            StompEvent::Receipt(receipt_id) => listener.on_receipt(receipt_id),
            StompEvent::Error { message, detail } => listener.on_error(message, detail.as_deref()),
            StompEvent::Ping => listener.on_ping(),
        }
    }
}

/// Callback surface for engine notifications.
///
/// Every method defaults to a no-op; implement only what you need.
#[allow(unused_variables)]
pub trait StompListener {
    fn on_message(&mut self, body: Option<&Value>, headers: &Headers, destination: &str) {}

    fn on_disconnected(&mut self) {}

    fn on_will_disconnect(&mut self, error: &Error) {}

    fn on_connected(&mut self) {}

    fn on_receipt(&mut self, receipt_id: &str) {}

    fn on_error(&mut self, message: &str, detail: Option<&str>) {}

    fn on_ping(&mut self) {}
}

/// Create a connected event sink and stream.
#[must_use]
pub fn channel() -> (EventSink, EventStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSink { tx }, EventStream { rx })
}

/// Sending half owned by the engine.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<StompEvent>,
}

impl EventSink {
    /// Queue an event. Events emitted after the stream is dropped are
    /// discarded.
    pub fn emit(&self, event: StompEvent) {
        if let Err(mpsc::error::SendError(event)) = self.tx.send(event) {
            tracing::trace!(?event, "event stream dropped, discarding event");
        }
    }

    /// Whether the receiving [`EventStream`] still exists.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Receiving half handed to the application.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<StompEvent>,
}

impl EventStream {
    /// Wait for the next event. Returns `None` once the engine is dropped
    /// and every queued event has been read.
    pub async fn recv(&mut self) -> Option<StompEvent> {
        self.rx.recv().await
    }

    /// Take the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<StompEvent> {
        self.rx.try_recv().ok()
    }

    /// Deliver every queued event to `listener` without waiting.
    ///
    /// Returns the number of events delivered.
    pub fn drain_to<L: StompListener + ?Sized>(&mut self, listener: &mut L) -> usize {
        let mut delivered = 0;
        while let Some(event) = self.try_recv() {
            event.deliver(listener);
            delivered += 1;
        }
        delivered
    }

    /// Deliver events to `listener` until the engine is dropped.
    pub async fn forward_to<L: StompListener + ?Sized>(&mut self, listener: &mut L) {
        while let Some(event) = self.recv().await {
            event.deliver(listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl StompListener for Recorder {
        fn on_message(&mut self, body: Option<&Value>, _headers: &Headers, destination: &str) {
            let body = body.map(ToString::to_string).unwrap_or_default();
            self.calls.push(format!("message {destination} {body}"));
        }

        fn on_connected(&mut self) {
            self.calls.push("connected".into());
        }

        fn on_receipt(&mut self, receipt_id: &str) {
            self.calls.push(format!("receipt {receipt_id}"));
        }

        fn on_error(&mut self, message: &str, detail: Option<&str>) {
            self.calls.push(format!("error {message} {detail:?}"));
        }
    }

    #[test]
    fn test_deliver_routes_to_listener() {
        let mut recorder = Recorder::default();
        StompEvent::Receipt("r-1".into()).deliver(&mut recorder);
        StompEvent::Error {
            message: "bad".into(),
            detail: Some("why".into()),
        }
        .deliver(&mut recorder);

        assert_eq!(recorder.calls, ["receipt r-1", "error bad Some(\"why\")"]);
    }

    #[test]
    fn test_default_methods_are_noops() {
        struct Silent;
        impl StompListener for Silent {}

        let mut silent = Silent;
        StompEvent::Ping.deliver(&mut silent);
        StompEvent::Disconnected.deliver(&mut silent);
        StompEvent::WillDisconnect(Error::NotConnected).deliver(&mut silent);
    }

    #[test]
    fn test_drain_preserves_order() {
        let (sink, mut stream) = channel();
        sink.emit(StompEvent::Connected {
            session_id: Some("s".into()),
        });
        sink.emit(StompEvent::Message {
            body: Some(serde_json::json!({"a": 1})),
            raw_body: Some("{\"a\":1}".into()),
            headers: Headers::new(),
            destination: "/topic/a".into(),
        });
        sink.emit(StompEvent::Receipt("r".into()));

        let mut recorder = Recorder::default();
        assert_eq!(stream.drain_to(&mut recorder), 3);
        assert_eq!(
            recorder.calls,
            [
                "connected",
                "message /topic/a {\"a\":1}",
                "receipt r"
            ]
        );
    }

    #[test]
    fn test_emit_after_stream_dropped() {
        let (sink, stream) = channel();
        assert!(sink.is_attached());
        drop(stream);
        assert!(!sink.is_attached());
        sink.emit(StompEvent::Ping);
    }

    #[tokio::test]
    async fn test_forward_to_ends_when_sink_dropped() {
        let (sink, mut stream) = channel();
        sink.emit(StompEvent::Connected { session_id: None });
        sink.emit(StompEvent::Receipt("done".into()));
        drop(sink);

        let mut recorder = Recorder::default();
        stream.forward_to(&mut recorder).await;
        assert_eq!(recorder.calls, ["connected", "receipt done"]);
    }
}
