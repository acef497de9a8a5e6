//! Interactive trait for components that handle keyboard input

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
///
/// Tells the App whether the component consumed the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event is not one of this component's bindings
    No,
}

impl Handled {
    /// Check if the event was handled
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Trait for components that handle keyboard input
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (global: Ctrl+C, Enter, PageUp/PageDown, Alt+Up/Alt+Down)
///    │
///    │ everything else, to both
///    ├──────────────────────┐
///    ▼                      ▼
/// TextInput             FileSelector
/// (chars, editing)      (Up, Down, Tab, Shift+Tab)
/// ```
///
/// The two bindings sets are disjoint, so a key is consumed by at most one.
pub trait Interactive: Component {
    /// Handle a key event
    ///
    /// Returns `Handled::Yes` if the component consumed the event.
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Hint text for the status bar
    fn key_hint(&self) -> Option<&'static str> {
        None
    }
}
