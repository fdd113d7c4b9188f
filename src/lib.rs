//! # wsstomp - STOMP client protocol engine over WebSocket
//!
//! `wsstomp` speaks the client side of STOMP on top of any message-oriented
//! transport, typically a WebSocket client supplied by the application.
//!
//! ## Features
//!
//! - **Sans-io engine**: the transport is injected through the [`Transport`] trait
//! - **Chunked writes** for brokers with small WebSocket message limits
//! - **Ordered events** delivered on a tokio channel or to a [`StompListener`]
//! - **JSON bodies** decoded with `serde_json` for JSON content types
//! - **Task actor** (`async-tokio` feature) with a cloneable [`ClientHandle`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use wsstomp::{Config, StompClient, StompEvent, TransportEvent};
//!
//! let config = Config::new()
//!     .with_accept_version("1.1,1.2")
//!     .with_heart_beat(10_000, 10_000);
//! let (client, mut events) = StompClient::new(my_websocket, config);
//! let (handle, _task) = wsstomp::spawn(client, transport_events);
//!
//! handle.connect()?;
//! handle.subscribe("/topic/prices")?;
//! while let Some(event) = events.recv().await {
//!     if let StompEvent::Message { body, destination, .. } = event {
//!         println!("{destination}: {body:?}");
//!     }
//! }
//! ```

pub mod codec;
pub mod config;
pub mod connection;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod protocol;
pub mod transport;

pub use config::{Config, DEFAULT_MAX_FRAME_SIZE};
pub use connection::{ConnectionState, StompClient};
pub use error::{Error, Result};
pub use event::{EventSink, EventStream, StompEvent, StompListener};
pub use protocol::{AckMode, Command, Frame, Headers, Subscription, Transaction};
pub use transport::{Payload, Transport, TransportEvent};

#[cfg(feature = "async-tokio")]
pub use connection::{ClientHandle, spawn};
