//! STOMP frame model.
//!
//! A frame is a command, an ordered header mapping and an optional text
//! body. Wire encoding and decoding live in [`crate::codec`].
//!
//! ## Frame Structure
//!
//! ```text
//! COMMAND\n
//! key:value\n        (zero or more, insertion order)
//! \n
//! body               (optional)
//! \0
//! ```

use crate::protocol::Command;
use crate::protocol::headers::{self, Headers};
use crate::protocol::subscription::Subscription;

/// A STOMP frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Frame command. Empty ([`Command::Heartbeat`]) for heartbeats.
    pub command: Command,
    /// Frame headers in wire order.
    pub headers: Headers,
    body: Option<String>,
}

impl Frame {
    /// Create a frame with no headers and no body.
    #[must_use]
    pub fn new(command: impl Into<Command>) -> Self {
        Self {
            command: command.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Create a heartbeat frame (a bare newline on the wire).
    #[must_use]
    pub fn heartbeat() -> Self {
        Self::new(Command::Heartbeat)
    }

    /// Add or replace a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Add or replace every header in `headers`.
    #[must_use]
    pub fn with_headers(mut self, headers: &Headers) -> Self {
        self.headers.extend_from(headers);
        self
    }

    /// Attach a body and set `content-length` to its UTF-8 byte length.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.set_body(body);
        self
    }

    /// Replace the body, keeping `content-length` in step.
    pub fn set_body(&mut self, body: impl Into<String>) {
        let body = body.into();
        self.headers
            .insert(headers::CONTENT_LENGTH, body.len().to_string());
        self.body = Some(body);
    }

    /// The body, if any.
    #[inline]
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Take ownership of the body.
    #[must_use]
    pub fn into_body(self) -> Option<String> {
        self.body
    }

    /// Split into command, headers and body.
    #[must_use]
    pub fn into_parts(self) -> (Command, Headers, Option<String>) {
        (self.command, self.headers, self.body)
    }

    /// Look up a header value.
    #[inline]
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Check if this is a heartbeat frame.
    #[inline]
    #[must_use]
    pub fn is_heartbeat(&self) -> bool {
        self.command.is_heartbeat()
    }

    /// Body length in UTF-8 bytes, computed locally.
    #[inline]
    #[must_use]
    pub fn content_length(&self) -> usize {
        self.body.as_ref().map_or(0, String::len)
    }

    /// Used by the decoder, which must not synthesise a `content-length`
    /// the peer never sent.
    pub(crate) fn from_parts(command: Command, headers: Headers, body: Option<String>) -> Self {
        Self {
            command,
            headers,
            body,
        }
    }

    /// `CONNECT` carrying the configured connection headers.
    #[must_use]
    pub fn connect(connection_headers: &Headers) -> Self {
        Self::new(Command::Connect).with_headers(connection_headers)
    }

    /// `SEND` of a text body.
    ///
    /// Caller headers are kept; `receipt` and `destination` override them,
    /// and `content-type` defaults to `text/plain` when not given.
    #[must_use]
    pub fn send(
        destination: &str,
        body: impl Into<String>,
        extra: Option<&Headers>,
        receipt: Option<&str>,
    ) -> Self {
        let mut frame = Self::new(Command::Send);
        if let Some(extra) = extra {
            frame.headers.extend_from(extra);
        }
        if let Some(receipt) = receipt {
            frame.headers.insert(headers::RECEIPT, receipt);
        }
        frame.headers.insert(headers::DESTINATION, destination);
        frame
            .headers
            .insert_if_absent(headers::CONTENT_TYPE, headers::TEXT_PLAIN);
        frame.with_body(body)
    }

    /// `SUBSCRIBE` for a subscription record.
    #[must_use]
    pub fn subscribe(subscription: &Subscription) -> Self {
        Self::new(Command::Subscribe)
            .with_header(headers::DESTINATION, subscription.destination.as_str())
            .with_header(headers::ACK, subscription.ack.as_str())
            .with_header(headers::ID, subscription.id.as_str())
    }

    /// `SUBSCRIBE` with raw caller headers; `destination` overrides theirs.
    #[must_use]
    pub fn subscribe_with_headers(destination: &str, extra: &Headers) -> Self {
        Self::new(Command::Subscribe)
            .with_headers(extra)
            .with_header(headers::DESTINATION, destination)
    }

    /// `UNSUBSCRIBE` by subscription id.
    #[must_use]
    pub fn unsubscribe(id: &str) -> Self {
        Self::new(Command::Unsubscribe).with_header(headers::ID, id)
    }

    #[must_use]
    pub fn begin(transaction_id: &str) -> Self {
        Self::new(Command::Begin).with_header(headers::TRANSACTION, transaction_id)
    }

    #[must_use]
    pub fn commit(transaction_id: &str) -> Self {
        Self::new(Command::Commit).with_header(headers::TRANSACTION, transaction_id)
    }

    #[must_use]
    pub fn abort(transaction_id: &str) -> Self {
        Self::new(Command::Abort).with_header(headers::TRANSACTION, transaction_id)
    }

    /// `ACK` of a message, optionally naming its subscription.
    #[must_use]
    pub fn ack(message_id: &str, subscription: Option<&str>) -> Self {
        let frame = Self::new(Command::Ack).with_header(headers::MESSAGE_ID, message_id);
        match subscription {
            Some(subscription) => frame.with_header(headers::SUBSCRIPTION, subscription),
            None => frame,
        }
    }

    /// `DISCONNECT` stamped with the client's Unix time in seconds.
    #[must_use]
    pub fn disconnect(unix_seconds: u64) -> Self {
        Self::new(Command::Disconnect).with_header(headers::DISCONNECTED, unix_seconds.to_string())
    }
}
