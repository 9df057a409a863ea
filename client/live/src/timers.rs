//! One active task handle per timer kind.
//!
//! Every periodic job in the dashboard is keyed by a `TimerKind`; starting a
//! new job of a kind aborts whatever was running under that kind, so two
//! pollers of the same kind can never tick concurrently.

use std::collections::HashMap;
use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

/// The kinds of periodic work the dashboard runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// 3-second live conversation poll.
    ConversationPoll,
    /// 2-second experiment status poll.
    StatusPoll,
    /// Mock playback emission loop.
    Playback,
    /// 2-second transient agent-status revert.
    StatusRevert,
    /// WebSocket reader task.
    Stream,
}

/// Registry of the currently running timer tasks.
#[derive(Debug, Default)]
pub struct TimerRegistry {
    handles: HashMap<TimerKind, JoinHandle<()>>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a task under a kind, aborting any previous task of that kind.
    pub fn spawn<F>(&mut self, kind: TimerKind, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(future);
        if let Some(previous) = self.handles.insert(kind, handle) {
            debug!(kind = ?kind, "Aborting previous timer of this kind");
            previous.abort();
        }
    }

    /// Abort the task of one kind, if any.
    pub fn cancel(&mut self, kind: TimerKind) {
        if let Some(handle) = self.handles.remove(&kind) {
            handle.abort();
        }
    }

    /// Abort everything. Used on stop and reset.
    pub fn cancel_all(&mut self) {
        for (kind, handle) in self.handles.drain() {
            debug!(kind = ?kind, "Aborting timer");
            handle.abort();
        }
    }

    /// Whether a task of this kind is still running.
    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.handles.get(&kind).map(|h| !h.is_finished()).unwrap_or(false)
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_starting_same_kind_aborts_previous() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut registry = TimerRegistry::new();

        let first = Arc::clone(&counter);
        registry.spawn(TimerKind::ConversationPoll, async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            first.fetch_add(1, Ordering::SeqCst);
        });

        let second = Arc::clone(&counter);
        registry.spawn(TimerKind::ConversationPoll, async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            second.fetch_add(10, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        // Only the replacement ran to completion.
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[tokio::test]
    async fn test_cancel_all_stops_everything() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut registry = TimerRegistry::new();

        for kind in [TimerKind::ConversationPoll, TimerKind::StatusPoll, TimerKind::Playback] {
            let counter = Arc::clone(&counter);
            registry.spawn(kind, async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        registry.cancel_all();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert!(!registry.is_active(TimerKind::StatusPoll));
    }

    #[tokio::test]
    async fn test_is_active_reflects_completion() {
        let mut registry = TimerRegistry::new();
        registry.spawn(TimerKind::StatusRevert, async {});
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!registry.is_active(TimerKind::StatusRevert));
    }
}
