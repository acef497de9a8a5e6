// Status bar component
//
// One line at the bottom: key hints, the active selection, and the most
// recent warning or error from the log buffer.

use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use crate::tui::traits::Interactive;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar
///
/// Adapts to terminal width:
/// - Compact: selection and notice only
/// - Otherwise: key hints first
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let bp = Breakpoint::from_width(area.width);
    let sep = Span::styled(" │ ", Style::default().fg(theme.muted));

    let mut spans = Vec::new();
    if bp.at_least(Breakpoint::Normal) {
        let hints = [
            Some("C-c:quit"),
            app.input.key_hint(),
            app.file_selector.key_hint(),
            Some("PgUp/PgDn:content  A-↑↓:history"),
        ];
        let hints: Vec<&str> = hints.into_iter().flatten().collect();
        spans.push(Span::styled(
            format!(" {}", hints.join("  ")),
            Style::default().fg(theme.muted),
        ));
    }

    if let Some(path) = &app.selected_file {
        if !spans.is_empty() {
            spans.push(sep.clone());
        }
        spans.push(Span::styled(
            format!(" {}", path.display()),
            Style::default().fg(theme.success),
        ));
    }

    if let Some(notice) = app.log_buffer.latest_notice() {
        if !spans.is_empty() {
            spans.push(sep);
        }
        spans.push(Span::styled(
            format!(
                "{} {} {}",
                notice.timestamp.format("%H:%M:%S"),
                notice.level.as_str(),
                notice.message
            ),
            Style::default().fg(theme.warning),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
