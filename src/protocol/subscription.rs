//! Caller-managed subscription and transaction records.
//!
//! The engine keeps no registry of either: these are value types passed into
//! the frame constructors, and duplicate or unknown ids are sent as given.

use std::fmt;

use crate::protocol::headers::{self, Headers};

/// Acknowledgement mode of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AckMode {
    /// The broker considers a message delivered once it is sent.
    #[default]
    Auto,
    /// The client must ACK each message explicitly.
    Client,
}

impl AckMode {
    /// Wire value of the `ack` header.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AckMode::Auto => "auto",
            AckMode::Client => "client",
        }
    }
}

impl fmt::Display for AckMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subscription to a destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Subscription {
    /// Client-chosen id, echoed by the broker in `subscription` headers.
    pub id: String,
    /// Destination being subscribed to.
    pub destination: String,
    /// Acknowledgement mode.
    pub ack: AckMode,
}

impl Subscription {
    /// Create a subscription with an explicit id and `auto` acknowledgement.
    #[must_use]
    pub fn new(id: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            destination: destination.into(),
            ack: AckMode::Auto,
        }
    }

    /// Create a subscription whose id is the destination itself, so that
    /// `unsubscribe(destination)` removes it.
    #[must_use]
    pub fn for_destination(destination: impl Into<String>) -> Self {
        let destination = destination.into();
        Self::new(destination.clone(), destination)
    }

    /// Set the acknowledgement mode.
    #[must_use]
    pub const fn with_ack(mut self, ack: AckMode) -> Self {
        self.ack = ack;
        self
    }
}

/// A transaction label.
///
/// Only the id travels on the wire; commit/abort bookkeeping is the caller's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    id: String,
}

impl Transaction {
    /// Create a transaction with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The transaction id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Attach this transaction's label to a header set.
    pub fn label(&self, headers: &mut Headers) {
        headers.insert(headers::TRANSACTION, self.id.as_str());
    }

    /// A fresh header set carrying only this transaction's label.
    #[must_use]
    pub fn headers(&self) -> Headers {
        Headers::from([(headers::TRANSACTION, self.id.as_str())])
    }
}
