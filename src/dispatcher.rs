//! Routing of inbound frames.
//!
//! [`route`] classifies a decoded frame by command and extracts what the
//! application needs. It has no side effects; the client applies the state
//! changes and the heartbeat echo.

use serde_json::Value;

use crate::event::StompEvent;
use crate::protocol::headers::{self, Headers};
use crate::protocol::{Command, Frame};

/// Content-type fragment that marks a JSON body.
const JSON_MEDIA_TYPE: &str = "application/json";

/// What an inbound frame means to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// `CONNECTED`: the session is established.
    Connected {
        /// `session` header, if present.
        session_id: Option<String>,
    },
    /// `MESSAGE`.
    Message {
        /// JSON-decoded body when the content type says JSON.
        body: Option<Value>,
        /// Body text.
        raw_body: Option<String>,
        /// Frame headers.
        headers: Headers,
        /// `destination` header, empty if absent.
        destination: String,
    },
    /// `RECEIPT` carrying a `receipt-id`.
    Receipt(String),
    /// `ERROR` carrying a `message` header.
    Error {
        /// `message` header.
        message: String,
        /// Frame body.
        detail: Option<String>,
    },
    /// Empty command: a heartbeat to echo.
    Heartbeat,
    /// Nothing to report: an unknown command, or a `RECEIPT`/`ERROR`
    /// missing its required header.
    Ignored(Command),
}

impl Inbound {
    /// The application event for this frame, if any.
    ///
    /// `Heartbeat` maps to [`StompEvent::Ping`]; `Ignored` maps to nothing.
    #[must_use]
    pub fn into_event(self) -> Option<StompEvent> {
        match self {
            Inbound::Connected { session_id } => Some(StompEvent::Connected { session_id }),
            Inbound::Message {
                body,
                raw_body,
                headers,
                destination,
            } => Some(StompEvent::Message {
                body,
                raw_body,
                headers,
                destination,
            }),
            Inbound::Receipt(receipt_id) => Some(StompEvent::Receipt(receipt_id)),
            Inbound::Error { message, detail } => Some(StompEvent::Error { message, detail }),
            Inbound::Heartbeat => Some(StompEvent::Ping),
            Inbound::Ignored(_) => None,
        }
    }
}

/// Classify an inbound frame.
#[must_use]
pub fn route(frame: Frame) -> Inbound {
    let (command, frame_headers, body) = frame.into_parts();
    match command {
        Command::Connected => Inbound::Connected {
            session_id: frame_headers.get(headers::SESSION).map(str::to_owned),
        },
        Command::Message => {
            let decoded = if frame_headers.get(headers::CONTENT_TYPE).is_some_and(is_json_content_type) {
                decode_json(body.as_deref())
            } else {
                None
            };
            let destination = frame_headers
                .get(headers::DESTINATION)
                .unwrap_or_default()
                .to_owned();
            Inbound::Message {
                body: decoded,
                raw_body: body,
                headers: frame_headers,
                destination,
            }
        }
        Command::Receipt => match frame_headers.get(headers::RECEIPT_ID) {
            Some(receipt_id) => Inbound::Receipt(receipt_id.to_owned()),
            None => Inbound::Ignored(Command::Receipt),
        },
        Command::Error => match frame_headers.get(headers::MESSAGE) {
            Some(message) => Inbound::Error {
                message: message.to_owned(),
                detail: body,
            },
            None => Inbound::Ignored(Command::Error),
        },
        Command::Heartbeat => Inbound::Heartbeat,
        other => Inbound::Ignored(other),
    }
}

/// Check if a `content-type` value denotes JSON, ignoring case and
/// parameters such as `charset`.
#[must_use]
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains(JSON_MEDIA_TYPE)
}

fn decode_json(body: Option<&str>) -> Option<Value> {
    let body = body?;
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(%error, "MESSAGE body is not valid JSON");
            None
        }
    }
}
