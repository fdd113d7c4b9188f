//! STOMP session management.
//!
//! [`StompClient`] is the protocol engine: it owns the transport, tracks the
//! [`ConnectionState`], writes chunked frames and turns inbound transport
//! messages into events. With the `async-tokio` feature, [`actor::spawn`]
//! runs a client inside its own task behind a cloneable
//! [`ClientHandle`](actor::ClientHandle).
//!
//! ## Session Lifecycle
//!
//! 1. **Connecting** - transport open requested, `CONNECT` sent once it opens
//! 2. **Connected** - `CONNECTED` received from the broker
//! 3. **Disconnecting** - `DISCONNECT` sent, waiting for the transport to close
//! 4. **Disconnected** - transport closed or failed

mod client;
mod fragmenter;
mod state;

pub use client::StompClient;
pub use fragmenter::ChunkSplitter;
pub use state::ConnectionState;

#[cfg(feature = "async-tokio")]
pub mod actor;

#[cfg(feature = "async-tokio")]
pub use actor::{ClientHandle, spawn};
