//! Test harness for driving a STOMP client without a network.
//!
//! [`LoopbackTransport`] records every outbound transport message and lets
//! tests flip its open flag; [`Metrics`] counts events across tasks.

#![allow(dead_code)]

mod metrics;

pub use metrics::Metrics;

use std::sync::{Arc, Mutex};

use wsstomp::codec;
use wsstomp::{Error, Frame, Result, Transport};

/// In-memory transport shared between the client and the test body.
#[derive(Debug, Clone, Default)]
pub struct LoopbackTransport {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    open: bool,
    fail_writes: bool,
    sent: Vec<String>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `send` fail.
    pub fn fail_writes(&self) {
        self.inner.lock().unwrap().fail_writes = true;
    }

    /// Raw transport messages written so far.
    pub fn sent(&self) -> Vec<String> {
        self.inner.lock().unwrap().sent.clone()
    }

    /// Transport messages decoded one frame per message.
    pub fn sent_frames(&self) -> Vec<Frame> {
        self.sent().iter().map(|s| codec::decode(s)).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().sent.clear();
    }
}

impl Transport for LoopbackTransport {
    fn open(&mut self) -> Result<()> {
        self.inner.lock().unwrap().open = true;
        Ok(())
    }

    fn send(&mut self, text: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_writes {
            return Err(Error::Transport("write refused".into()));
        }
        inner.sent.push(text.to_owned());
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.inner.lock().unwrap().open
    }

    fn close(&mut self) -> Result<()> {
        self.inner.lock().unwrap().open = false;
        Ok(())
    }
}

/// A `MESSAGE` frame as the broker would send it.
pub fn message_frame(destination: &str, content_type: &str, body: &str) -> String {
    format!(
        "MESSAGE\ndestination:{destination}\ncontent-type:{content_type}\nmessage-id:m-1\n\n{body}\0"
    )
}

/// Install a `tracing` subscriber honouring `RUST_LOG`, once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
