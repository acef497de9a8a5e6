// Screen layout
//
// ┌ Files ─────┐┌ Content ─────────────────────────┐
// │            ││                                  │
// │            │└──────────────────────────────────┘
// │            │┌ History ─────────────────────────┐
// │            ││                                  │
// └────────────┘└──────────────────────────────────┘
// ┌──────────────────────────────────────────────────┐
// │ > query                                          │
// └──────────────────────────────────────────────────┘
//  status line

use ratatui::layout::{Constraint, Layout, Rect};

/// Responsive breakpoint system for TUI layout decisions.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 60 cols: Split pane, minimal terminal
    Compact,
    /// 60-99 cols: Half-screen
    Normal,
    /// 100+ cols: Full terminal
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }

    /// Width of the left-docked file selector
    fn selector_width(&self) -> u16 {
        match self {
            Breakpoint::Compact => 20,
            Breakpoint::Normal | Breakpoint::Wide => 32,
        }
    }
}

/// Height of the history panel, borders included
fn history_height(total_height: u16) -> u16 {
    if total_height < 30 {
        8
    } else {
        12
    }
}

const INPUT_HEIGHT: u16 = 3;
const STATUS_HEIGHT: u16 = 1;

/// Areas of every panel for one terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelLayout {
    pub selector: Rect,
    pub content: Rect,
    pub history: Rect,
    pub input: Rect,
    pub status: Rect,
}

impl PanelLayout {
    pub fn compute(area: Rect) -> Self {
        let [main, input, status] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .areas(area);

        let bp = Breakpoint::from_width(area.width);
        let [selector, right] = Layout::horizontal([
            Constraint::Length(bp.selector_width()),
            Constraint::Min(0),
        ])
        .areas(main);

        let [content, history] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(history_height(area.height)),
        ])
        .areas(right);

        Self {
            selector,
            content,
            history,
            input,
            status,
        }
    }

    pub fn for_size(width: u16, height: u16) -> Self {
        Self::compute(Rect::new(0, 0, width, height))
    }
}

/// Text area inside a bordered panel: (width, height)
pub fn inner_size(panel: Rect) -> (u16, u16) {
    (panel.width.saturating_sub(2), panel.height.saturating_sub(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(99), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(100), Breakpoint::Wide);
        assert!(Breakpoint::Wide.at_least(Breakpoint::Normal));
        assert!(!Breakpoint::Compact.at_least(Breakpoint::Normal));
    }

    #[test]
    fn panels_tile_the_screen() {
        let layout = PanelLayout::for_size(120, 40);
        assert_eq!(layout.selector.x, 0);
        assert_eq!(layout.selector.width, 32);
        assert_eq!(layout.content.x, 32);
        assert_eq!(layout.content.width, 88);
        assert_eq!(layout.history.height, 12);
        assert_eq!(layout.content.height + layout.history.height, 36);
        assert_eq!(layout.input.y, 36);
        assert_eq!(layout.status.y, 39);
    }

    #[test]
    fn compact_terminal_narrows_selector() {
        let layout = PanelLayout::for_size(50, 20);
        assert_eq!(layout.selector.width, 20);
        assert_eq!(layout.history.height, 8);
        assert_eq!(inner_size(layout.history), (28, 6));
    }

    #[test]
    fn tiny_terminal_does_not_underflow() {
        let layout = PanelLayout::for_size(3, 2);
        let (w, h) = inner_size(layout.content);
        assert!(w <= 3 && h <= 2);
    }
}
