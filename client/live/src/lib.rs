//! Live data production for the dashboard: the conversation and status
//! pollers, the offline mock playback engine, and the one-active-timer-per-
//! kind registry that keeps them from overlapping themselves.

pub mod playback;
pub mod poller;
pub mod scripts;
pub mod status;
pub mod timers;

pub use playback::PlaybackEngine;
pub use poller::FeedPoller;
pub use scripts::Script;
pub use status::StatusPoller;
pub use timers::{TimerKind, TimerRegistry};
