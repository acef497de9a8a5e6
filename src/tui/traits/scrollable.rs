//! Scrollable trait for components with scrollable content
//!
//! Components that display more content than fits in their viewport
//! implement this trait to get uniform scroll behavior.

use super::Component;
use crate::tui::scroll::ScrollState;

/// Trait for components with scrollable content
///
/// Components own their `ScrollState` and expose it through this trait;
/// navigation methods have default implementations that delegate to it.
pub trait Scrollable: Component {
    /// Get immutable reference to scroll state
    fn scroll_state(&self) -> &ScrollState;

    /// Get mutable reference to scroll state
    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    // ─────────────────────────────────────────────────────────────
    // Navigation - default implementations delegate to ScrollState
    // ─────────────────────────────────────────────────────────────

    /// Scroll by `delta` lines, negative is up
    fn scroll_by(&mut self, delta: isize) {
        self.scroll_state_mut().scroll_by(delta);
    }

    /// Jump to the bottom of content
    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    /// Scroll up by a page
    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    /// Scroll down by a page
    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }

    // ─────────────────────────────────────────────────────────────
    // State queries
    // ─────────────────────────────────────────────────────────────

    /// Get current scroll offset
    fn scroll_offset(&self) -> usize {
        self.scroll_state().offset()
    }
}
