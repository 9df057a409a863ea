//! Terminal rendering for the simdash dashboard.
//!
//! Exposes the ratatui draw routine, keyboard mapping, and the read-only
//! context the dashboard loop hands to each frame.

pub mod app;
pub mod input;
pub mod render;

pub use app::UiContext;
pub use input::{map_key, Action};
pub use render::draw_ui;
