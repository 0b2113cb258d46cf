//! Event fan-out — the broadcast source and per-reporter subscriptions.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use chainpulse_core::event::SyncEvent;

/// Default broadcast channel capacity.
const DEFAULT_CAPACITY: usize = 1_024;

/// Fan-out source of raw sync events.
///
/// Each subscriber holds an independent cursor over the stream: one
/// subscriber's drain never consumes events another would have read, and
/// every cursor sees events in publish order.
#[derive(Debug, Clone)]
pub struct EventSource {
    tx: broadcast::Sender<SyncEvent>,
}

impl EventSource {
    /// Create a source retaining up to `capacity` undelivered events per cursor.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to every live subscription.
    pub fn publish(&self, event: SyncEvent) {
        if let Err(e) = self.tx.send(event) {
            // Receiver dropped — not a fatal error
            tracing::warn!("no active subscribers: {e}");
        }
    }

    /// Open an independent read cursor over the event stream.
    pub fn subscribe(&self) -> EventSubscription {
        EventSubscription {
            rx: self.tx.subscribe(),
            closed: false,
            lagged: 0,
        }
    }
}

impl Default for EventSource {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// One reporter's read cursor over the event stream.
pub struct EventSubscription {
    rx: broadcast::Receiver<SyncEvent>,
    closed: bool,
    lagged: u64,
}

impl EventSubscription {
    /// Non-blocking read of the next pending event.
    ///
    /// Returns `None` once this cursor's backlog is empty. A cursor that
    /// fell behind a bounded buffer skips to the oldest retained event
    /// and keeps reading; the loss is counted, never blocking the
    /// producer.
    pub fn try_next(&mut self) -> Option<SyncEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Lagged(skipped)) => {
                    self.lagged += skipped;
                    tracing::debug!(skipped, "subscription lagged behind the event stream");
                }
                Err(TryRecvError::Closed) => {
                    self.closed = true;
                    return None;
                }
            }
        }
    }

    /// Returns `true` once every publisher handle has been dropped and
    /// the backlog fully drained.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Total events skipped due to lag since subscription.
    pub fn lagged(&self) -> u64 {
        self.lagged
    }
}
