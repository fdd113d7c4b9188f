//! STOMP frame model: commands, headers, frames and caller-side records.

pub mod command;
pub mod frame;
pub mod headers;
pub mod subscription;

pub use command::Command;
pub use frame::Frame;
pub use headers::Headers;
pub use subscription::{AckMode, Subscription, Transaction};
