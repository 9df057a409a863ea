//! Per-frame UI context.
//!
//! The dashboard loop owns the session and view state; each frame borrows a
//! read-only snapshot of what the terminal needs to draw.

use simdash_session::state::Session;
use simdash_session::view::ViewState;

pub struct UiContext<'a> {
    pub session: &'a Session,
    pub view: &'a ViewState,
    /// Cursor position in the experiment picker.
    pub picker_index: usize,
    /// Pre-rendered template editor lines for the configuration step.
    pub template_lines: &'a [String],
    /// Pre-rendered run settings for the review step.
    pub review_lines: &'a [String],
}
