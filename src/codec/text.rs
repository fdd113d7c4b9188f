//! Text wire encoding of STOMP frames.
//!
//! The decoder assumes one transport message carries exactly one frame. It
//! does not scan for NUL boundaries across messages, so a peer that splits a
//! frame over several messages, or packs several frames into one, is not
//! understood. Header values are written and read verbatim (no `\c`, `\n`,
//! `\r` or `\\` escaping).

use std::fmt::Write;

use crate::error::Result;
use crate::protocol::headers::{self, Headers};
use crate::protocol::{Command, Frame};
use crate::transport::Payload;

/// Frame terminator.
pub const NUL: char = '\0';

/// Wire text of a heartbeat.
pub const HEARTBEAT: &str = "\n";

/// Encode a frame to its wire text.
///
/// `content-length` is always written from the body actually being sent,
/// whatever the header map says, and dropped when there is no body.
#[must_use]
pub fn encode(frame: &Frame) -> String {
    if frame.is_heartbeat() {
        return HEARTBEAT.to_owned();
    }

    let mut out = String::with_capacity(encoded_len_hint(frame));
    out.push_str(frame.command.as_str());
    out.push('\n');

    let body = frame.body();
    let mut wrote_length = false;
    for (key, value) in frame.headers.iter() {
        if key == headers::CONTENT_LENGTH {
            if let Some(body) = body {
                // Infallible for String
                let _ = writeln!(out, "{key}:{}", body.len());
                wrote_length = true;
            }
            continue;
        }
        out.push_str(key);
        out.push(':');
        out.push_str(value);
        out.push('\n');
    }
    if let Some(body) = body {
        if !wrote_length {
            let _ = writeln!(out, "{}:{}", headers::CONTENT_LENGTH, body.len());
        }
    }

    out.push('\n');
    if let Some(body) = body {
        out.push_str(body);
    }
    out.push(NUL);
    out
}

fn encoded_len_hint(frame: &Frame) -> usize {
    let headers: usize = frame
        .headers
        .iter()
        .map(|(k, v)| k.len() + v.len() + 2)
        .sum();
    frame.command.as_str().len() + headers + frame.content_length() + 24
}

/// Decode one transport message into a frame.
///
/// Never fails on text input: an empty command yields a heartbeat, header
/// lines without `:` are skipped and an empty body decodes as `None`.
#[must_use]
pub fn decode(text: &str) -> Frame {
    let mut lines = text.split('\n').peekable();
    if lines.peek() == Some(&"") {
        lines.next();
    }

    let Some(command_line) = lines.next() else {
        return Frame::heartbeat();
    };
    let command = Command::from_wire(strip_cr(command_line));

    let mut headers = Headers::new();
    for line in lines.by_ref() {
        let line = strip_cr(line);
        if line.is_empty() {
            break;
        }
        match line.split_once(':') {
            Some((key, value)) => {
                headers.insert(key, value);
            }
            None => tracing::trace!(line, "skipping header line without ':'"),
        }
    }

    let rest: Vec<&str> = lines.collect();
    let joined = rest.join("\n");
    let body = strip_terminator(&joined);
    let body = (!body.is_empty()).then(|| body.to_owned());

    Frame::from_parts(command, headers, body)
}

/// Decode a raw transport payload, interpreting binary payloads as UTF-8.
///
/// # Errors
///
/// Returns [`Error::InvalidFrame`](crate::Error::InvalidFrame) if a binary
/// payload is not valid UTF-8.
pub fn decode_payload(payload: &Payload) -> Result<Frame> {
    match payload {
        Payload::Text(text) => Ok(decode(text)),
        Payload::Binary(bytes) => Ok(decode(std::str::from_utf8(bytes)?)),
    }
}

#[inline]
fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Strip trailing NULs, along with any EOLs a broker appended after them.
fn strip_terminator(body: &str) -> &str {
    let trimmed = body.trim_end_matches(['\r', '\n']);
    if trimmed.ends_with(NUL) {
        trimmed.trim_end_matches(NUL)
    } else {
        body
    }
}
