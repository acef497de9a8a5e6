// Screen rendering
//
// `draw` is a pure function of App: it lays every panel into the areas
// computed by PanelLayout, then overlays the error banner if one is active.

use super::app::App;
use crate::tui::components::{status_bar, ErrorBanner};
use crate::tui::traits::{Component, RenderContext};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function, called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let ctx = RenderContext::new(&app.theme);
    let layout = &app.layout;

    app.file_selector.render(f, layout.selector, &ctx);
    app.content.render(f, layout.content, &ctx);
    app.history_view.render(f, layout.history, &ctx);
    app.input.render(f, layout.input, &ctx);
    status_bar::render(f, layout.status, app);

    // Drawn last so it sits on top of every panel
    if let Some(error) = &app.error {
        ErrorBanner::new(&error.message).render(f, f.area(), &ctx);
    }

    if app.input.is_focused() {
        f.set_cursor_position(app.input.caret_position(layout.input));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::events::AppEvent;
    use crate::logging::LogBuffer;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use std::path::PathBuf;

    fn render(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_initial_screen() {
        let config = Config::default();
        let (app, _) = App::init(&config, "# Welcome\n\nHello there.", LogBuffer::new(), (100, 30));
        let text = screen_text(&render(&app, 100, 30));

        assert!(text.contains("Files"));
        assert!(text.contains("Content"));
        assert!(text.contains("History"));
        assert!(text.contains("Welcome"));
        assert!(text.contains("Reading from ./data/."));
        assert!(text.contains(&config.placeholder));
        assert!(text.contains("Loading..."));
    }

    #[test]
    fn test_error_banner_overlay() {
        let (mut app, _) = App::init(&Config::default(), "x", LogBuffer::new(), (100, 30));
        app.update(AppEvent::FileSelectionRejected(PathBuf::from("./data/b.exe")));

        let text = screen_text(&render(&app, 100, 30));
        assert!(text.contains("./data/b.exe is not valid."));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let (mut app, _) = App::init(&Config::default(), "x", LogBuffer::new(), (10, 5));
        app.update(AppEvent::FileSelectionRejected(PathBuf::from("./data/b.exe")));
        render(&app, 10, 5);
    }
}
