//! STOMP frame codec.
//!
//! Turns frames into wire text and single transport messages back into
//! frames.

mod text;

pub use text::{HEARTBEAT, NUL, decode, decode_payload, encode};
