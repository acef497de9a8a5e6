//! Error banner overlay
//!
//! Shows the current error message in the bottom-right corner on top of
//! all other content. Expiry is driven by the app's clear-error timer, not
//! by the banner itself.

use crate::tui::traits::{Component, RenderContext};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub struct ErrorBanner<'a> {
    pub message: &'a str,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }

    /// Where the banner goes inside `area`
    pub fn placement(&self, area: Rect) -> Rect {
        // 2 for borders, 2 for padding
        let wanted = self.message.width() as u16 + 4;
        let width = wanted.min(area.width.saturating_sub(4));
        let height = 3u16.min(area.height);

        // Bottom-right corner, offset by 2 cells from the edge
        let x = area.right().saturating_sub(width + 2).max(area.x);
        let y = area.bottom().saturating_sub(height + 2).max(area.y);

        Rect::new(x, y, width, height)
    }
}

impl Component for ErrorBanner<'_> {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let banner = self.placement(area);
        if banner.width < 3 || banner.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.error))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )
            .block(block);

        // Clear the area first so the banner appears on top
        f.render_widget(Clear, banner);
        f.render_widget(text, banner);
    }
}
