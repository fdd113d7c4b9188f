//! STOMP frame commands.

use std::fmt;

/// STOMP frame command.
///
/// Defines how the headers and body of a frame are interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Command {
    /// `CONNECT` - opens a STOMP session.
    Connect,
    /// `SEND` - publishes a message to a destination.
    Send,
    /// `SUBSCRIBE` - registers interest in a destination.
    Subscribe,
    /// `UNSUBSCRIBE` - removes a subscription by id.
    Unsubscribe,
    /// `BEGIN` - starts a transaction.
    Begin,
    /// `COMMIT` - commits a transaction.
    Commit,
    /// `ABORT` - rolls back a transaction.
    Abort,
    /// `ACK` - acknowledges a message.
    Ack,
    /// `DISCONNECT` - ends the STOMP session.
    Disconnect,

    /// `CONNECTED` - broker accepted the session.
    Connected,
    /// `MESSAGE` - a message delivered to a subscription.
    Message,
    /// `RECEIPT` - broker processed a frame that asked for a receipt.
    Receipt,
    /// `ERROR` - broker reported a protocol or processing error.
    Error,

    /// Empty command. On the wire this is a bare newline, used as a
    /// heartbeat in both directions.
    Heartbeat,

    /// Any command this engine has no meaning for.
    Other(String),
}

impl Command {
    /// Parse a command from its wire text.
    ///
    /// Never fails: unknown commands become [`Command::Other`] and the empty
    /// string becomes [`Command::Heartbeat`].
    #[must_use]
    pub fn from_wire(text: &str) -> Self {
        match text {
            "" => Command::Heartbeat,
            "CONNECT" => Command::Connect,
            "SEND" => Command::Send,
            "SUBSCRIBE" => Command::Subscribe,
            "UNSUBSCRIBE" => Command::Unsubscribe,
            "BEGIN" => Command::Begin,
            "COMMIT" => Command::Commit,
            "ABORT" => Command::Abort,
            "ACK" => Command::Ack,
            "DISCONNECT" => Command::Disconnect,
            "CONNECTED" => Command::Connected,
            "MESSAGE" => Command::Message,
            "RECEIPT" => Command::Receipt,
            "ERROR" => Command::Error,
            other => Command::Other(other.to_owned()),
        }
    }

    /// Wire text of this command.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Command::Connect => "CONNECT",
            Command::Send => "SEND",
            Command::Subscribe => "SUBSCRIBE",
            Command::Unsubscribe => "UNSUBSCRIBE",
            Command::Begin => "BEGIN",
            Command::Commit => "COMMIT",
            Command::Abort => "ABORT",
            Command::Ack => "ACK",
            Command::Disconnect => "DISCONNECT",
            Command::Connected => "CONNECTED",
            Command::Message => "MESSAGE",
            Command::Receipt => "RECEIPT",
            Command::Error => "ERROR",
            Command::Heartbeat => "",
            Command::Other(text) => text,
        }
    }

    /// Check if this command is sent by clients.
    #[inline]
    #[must_use]
    pub const fn is_client(&self) -> bool {
        matches!(
            self,
            Command::Connect
                | Command::Send
                | Command::Subscribe
                | Command::Unsubscribe
                | Command::Begin
                | Command::Commit
                | Command::Abort
                | Command::Ack
                | Command::Disconnect
        )
    }

    /// Check if this command is sent by brokers.
    #[inline]
    #[must_use]
    pub const fn is_server(&self) -> bool {
        matches!(
            self,
            Command::Connected | Command::Message | Command::Receipt | Command::Error
        )
    }

    /// Check if this is the empty heartbeat command.
    #[inline]
    #[must_use]
    pub const fn is_heartbeat(&self) -> bool {
        matches!(self, Command::Heartbeat)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Heartbeat => write!(f, "<heartbeat>"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl From<&str> for Command {
    fn from(text: &str) -> Self {
        Command::from_wire(text)
    }
}
