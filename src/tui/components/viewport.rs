//! Scrollable viewport
//!
//! A bordered panel showing pre-laid-out lines with its own scroll position.
//! Used for both the content panel and the history panel.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, RenderContext, Scrollable};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct Viewport {
    title: &'static str,
    lines: Vec<Line<'static>>,
    width: u16,
    height: u16,
    scroll: ScrollState,
    scrollbar: ScrollbarStyle,
}

impl Viewport {
    pub fn new(title: &'static str, scrollbar: ScrollbarStyle) -> Self {
        Self {
            title,
            lines: Vec::new(),
            width: 0,
            height: 0,
            scroll: ScrollState::new(),
            scrollbar,
        }
    }

    /// Replace the content and return to the top
    pub fn set_content(&mut self, lines: Vec<Line<'static>>) {
        self.scroll.set_total(lines.len());
        self.lines = lines;
    }

    /// Replace the content with one plain line per entry
    pub fn set_text<S: AsRef<str>>(&mut self, entries: &[S]) {
        let lines = entries
            .iter()
            .map(|e| Line::raw(e.as_ref().to_string()))
            .collect();
        self.set_content(lines);
    }

    /// New text-area size; content is kept and the offset reclamped
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.scroll.resize(height as usize);
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }
}

impl Component for Viewport {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(theme.title))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border));

        let (start, end) = self.scroll.visible_range();
        let visible = self.lines[start..end].to_vec();

        let paragraph = Paragraph::new(visible)
            .style(Style::default().fg(theme.foreground).bg(theme.background))
            .block(block);
        f.render_widget(paragraph, area);

        render_scrollbar(
            f,
            area,
            &self.scroll,
            self.scrollbar,
            Style::default().fg(theme.border),
        );
    }
}

impl Scrollable for Viewport {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use ratatui::{backend::TestBackend, Terminal};

    fn numbered(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {}", i)).collect()
    }

    #[test]
    fn test_set_content_resets_offset() {
        let mut vp = Viewport::new("History", ScrollbarStyle::Minimal);
        vp.resize(20, 3);
        vp.set_text(&numbered(10));
        vp.scroll_to_bottom();
        assert_eq!(vp.scroll_offset(), 7);

        vp.set_text(&numbered(12));
        assert_eq!(vp.scroll_offset(), 0);
        assert_eq!(vp.line_count(), 12);
    }

    #[test]
    fn test_resize_keeps_content_and_clamps() {
        let mut vp = Viewport::new("History", ScrollbarStyle::Minimal);
        vp.resize(20, 3);
        vp.set_text(&numbered(10));
        vp.scroll_by(100);
        assert_eq!(vp.scroll_offset(), 7);

        vp.resize(40, 8);
        assert_eq!(vp.line_count(), 10);
        assert_eq!(vp.scroll_offset(), 2);
        assert_eq!((vp.width(), vp.height()), (40, 8));
    }

    #[test]
    fn test_render_shows_visible_window() {
        let mut vp = Viewport::new("History", ScrollbarStyle::Minimal);
        vp.resize(18, 3);
        vp.set_text(&numbered(10));
        vp.scroll_by(4);

        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal
            .draw(|f| vp.render(f, f.area(), &RenderContext::new(&theme)))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| -> String {
            (1..19)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        };
        assert!(row(0).contains("History"));
        assert!(row(1).starts_with("line 4"));
        assert!(row(3).starts_with("line 6"));
    }
}
