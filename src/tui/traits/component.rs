//! Core component trait - the foundation of the UI system
//!
//! Every UI element that can be rendered implements `Component`.

use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Immutable context passed to components during rendering
///
/// Components only see what they need - no access to mutable app state.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Color theme for styling
    pub theme: &'a Theme,
}

impl<'a> RenderContext<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

/// Base trait for all UI components
///
/// A component is anything that can render itself to the terminal.
/// Rendering is pure: it reads component state and writes to the frame.
pub trait Component {
    /// Render the component to the given area
    ///
    /// # Arguments
    ///
    /// * `f` - The frame to render to
    /// * `area` - The rectangular area allocated for this component
    /// * `ctx` - Immutable render context (theme)
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
