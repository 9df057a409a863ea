use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::event::FeedFrame;

/// Default channel buffer size for feed events.
const DEFAULT_BUFFER_SIZE: usize = 256;

/// The channel pair connecting the feed producers (pollers, playback engine,
/// WebSocket reader) to the dashboard loop.
///
/// Producers clone `feed_tx`; the dashboard loop takes the single receiver.
/// Built on Tokio mpsc channels for async, bounded backpressure.
pub struct DashBus {
    pub feed_tx: mpsc::Sender<FeedFrame>,
    feed_rx: Option<mpsc::Receiver<FeedFrame>>,
}

impl DashBus {
    /// Create a new bus with the default buffer size.
    pub fn new() -> Self {
        Self::with_buffer_size(DEFAULT_BUFFER_SIZE)
    }

    /// Create a new bus with a custom buffer size.
    pub fn with_buffer_size(buffer: usize) -> Self {
        let (feed_tx, feed_rx) = mpsc::channel(buffer);
        info!(buffer_size = buffer, "DashBus initialized");
        Self {
            feed_tx,
            feed_rx: Some(feed_rx),
        }
    }

    /// Take the feed receiver (can only be called once).
    pub fn take_feed_rx(&mut self) -> Option<mpsc::Receiver<FeedFrame>> {
        debug!("Feed receiver taken");
        self.feed_rx.take()
    }
}

impl Default for DashBus {
    fn default() -> Self {
        Self::new()
    }
}
