//! Scrollbar rendering helper
//!
//! Draws a vertical scrollbar over the right border of a panel from its
//! `ScrollState`. Nothing is drawn while the content fits.

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::{Margin, Rect},
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Visual style for the scrollbar
#[derive(Debug, Clone, Copy, Default)]
pub enum ScrollbarStyle {
    /// Arrows at top and bottom (↑ ↓)
    Arrows,
    /// Minimal style - no arrows, just the thumb
    #[default]
    Minimal,
}

/// Render a vertical scrollbar for a bordered panel
///
/// # Arguments
///
/// * `f` - Frame to render to
/// * `area` - The panel area, borders included
/// * `scroll` - ScrollState containing position and dimensions
/// * `style` - Visual style (Arrows or Minimal)
/// * `thumb` - Style of the thumb
pub fn render_scrollbar(
    f: &mut Frame,
    area: Rect,
    scroll: &ScrollState,
    style: ScrollbarStyle,
    thumb: Style,
) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = match style {
        ScrollbarStyle::Arrows => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓")),
        ScrollbarStyle::Minimal => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None),
    }
    .thumb_style(thumb);

    // ScrollbarState wants: content_length (how much can scroll) and position
    let mut state = ScrollbarState::new(scroll.max_offset()).position(scroll.offset());

    // Keep the corners of the border intact
    let track = area.inner(Margin {
        vertical: 1,
        horizontal: 0,
    });
    f.render_stateful_widget(scrollbar, track, &mut state);
}
