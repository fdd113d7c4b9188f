//! Event counters for concurrency tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use wsstomp::StompEvent;

/// Atomic per-kind event counters, cheap to clone across tasks.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    messages: AtomicUsize,
    receipts: AtomicUsize,
    pings: AtomicUsize,
    disconnects: AtomicUsize,
    other: AtomicUsize,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: &StompEvent) {
        let counter = match event {
            StompEvent::Message { .. } => &self.inner.messages,
            StompEvent::Receipt(_) => &self.inner.receipts,
            StompEvent::Ping => &self.inner.pings,
            StompEvent::Disconnected | StompEvent::WillDisconnect(_) => &self.inner.disconnects,
            _ => &self.inner.other,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn messages(&self) -> usize {
        self.inner.messages.load(Ordering::Relaxed)
    }

    pub fn receipts(&self) -> usize {
        self.inner.receipts.load(Ordering::Relaxed)
    }

    pub fn pings(&self) -> usize {
        self.inner.pings.load(Ordering::Relaxed)
    }

    pub fn disconnects(&self) -> usize {
        self.inner.disconnects.load(Ordering::Relaxed)
    }
}
