// Application state machine
//
// App owns every piece of UI state and changes only inside `update`, one
// event at a time. `init` and `update` return the background work they want
// done as Commands; the scheduler runs them and feeds completions back in as
// events. Rendering reads App and never mutates it.

use crate::config::Config;
use crate::events::{AppEvent, Command, TimerTag};
use crate::logging::LogBuffer;
use crate::pipeline::FileOutcome;
use crate::theme::Theme;
use crate::tui::components::file_selector::{FileSelector, Selection};
use crate::tui::components::scrollbar::ScrollbarStyle;
use crate::tui::components::text_input::TextInput;
use crate::tui::components::viewport::Viewport;
use crate::tui::history::HistoryLog;
use crate::tui::layout::{inner_size, PanelLayout};
use crate::tui::markdown::render_markdown;
use crate::tui::traits::{Interactive, Scrollable};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// The error banner currently shown
#[derive(Debug, Clone)]
pub struct ErrorState {
    pub message: String,
    pub created_at: Instant,
    /// Matches the `ClearError` timer scheduled for this error
    generation: u64,
}

impl ErrorState {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct App {
    pub input: TextInput,
    pub content: Viewport,
    pub history_view: Viewport,
    pub file_selector: FileSelector,
    pub history: HistoryLog,
    pub error: Option<ErrorState>,
    pub selected_file: Option<PathBuf>,
    pub should_quit: bool,
    /// Set when terminal input died; the session ends with this error
    pub input_failure: Option<String>,
    pub layout: PanelLayout,
    pub theme: Theme,
    pub log_buffer: LogBuffer,
    error_timeout: Duration,
    error_generation: u64,
}

impl App {
    /// Build the initial state for a terminal of `size` (width, height)
    pub fn init(
        config: &Config,
        content_markdown: &str,
        log_buffer: LogBuffer,
        size: (u16, u16),
    ) -> (Self, Vec<Command>) {
        let theme = Theme::by_name(&config.theme);
        let layout = PanelLayout::for_size(size.0, size.1);
        let root = config.data_dir.clone();

        let mut app = Self {
            input: TextInput::new(config.placeholder.clone(), config.input_width),
            content: Viewport::new("Content", ScrollbarStyle::Arrows),
            history_view: Viewport::new("History", ScrollbarStyle::Minimal),
            file_selector: FileSelector::new(root.clone(), config.allowed_extensions.clone()),
            history: HistoryLog::new(),
            error: None,
            selected_file: None,
            should_quit: false,
            input_failure: None,
            layout,
            theme,
            log_buffer,
            error_timeout: config.error_timeout(),
            error_generation: 0,
        };
        app.apply_layout();

        // Laid out once, at the startup width
        let (width, _) = inner_size(app.layout.content);
        let lines = render_markdown(content_markdown, width.max(1) as usize, &app.theme);
        app.content.set_content(lines);

        app.push_history(format!("Reading from {}.", root.display()));

        let mut commands = vec![Command::ScanDirectory { dir: root.clone() }];
        if config.embed_on_startup {
            commands.push(Command::EmbedDirectory { dir: root });
        }

        tracing::debug!(
            width = size.0,
            height = size.1,
            commands = commands.len(),
            "App initialized"
        );
        (app, commands)
    }

    /// Apply one event; returns the follow-up commands
    pub fn update(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(width, height) => {
                self.layout = PanelLayout::for_size(width, height);
                self.apply_layout();
                Vec::new()
            }
            AppEvent::InputFailed(error) => {
                tracing::error!("Terminal input failed: {}", error);
                self.input_failure = Some(error);
                self.should_quit = true;
                Vec::new()
            }
            AppEvent::FileSelected(path) => {
                self.on_file_selected(path);
                Vec::new()
            }
            AppEvent::FileSelectionRejected(path) => self.on_selection_rejected(path),
            AppEvent::TimerFired(TimerTag::ClearError { generation }) => {
                if self.error.as_ref().map(ErrorState::generation) == Some(generation) {
                    if let Some(error) = self.error.take() {
                        tracing::debug!(shown_for = ?error.created_at.elapsed(), "Error cleared");
                    }
                }
                Vec::new()
            }
            AppEvent::DirectoryListed { dir, result } => {
                let failure = result.as_ref().err().cloned();
                if !self.file_selector.apply_listing(&dir, result) {
                    tracing::debug!(dir = %dir.display(), "Ignoring stale directory listing");
                } else if let Some(e) = failure {
                    tracing::warn!(dir = %dir.display(), "Cannot list directory: {}", e);
                    self.push_history(format!("Cannot read {}: {}", dir.display(), e));
                }
                Vec::new()
            }
            AppEvent::EmbeddingBatchCompleted { outcomes } => {
                self.on_batch_completed(&outcomes);
                Vec::new()
            }
            AppEvent::EmbeddingBatchFailed { dir, error } => {
                self.push_history(format!("Cannot read {}: {}", dir.display(), error));
                Vec::new()
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        // Release and repeat events would double every keystroke on some terminals
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                tracing::info!("Quit requested");
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Enter => {
                let query = self.input.take();
                self.push_history(query);
                Vec::new()
            }
            KeyCode::PageUp => {
                self.content.page_up();
                Vec::new()
            }
            KeyCode::PageDown => {
                self.content.page_down();
                Vec::new()
            }
            KeyCode::Up if alt => {
                self.history_view.scroll_by(-1);
                Vec::new()
            }
            KeyCode::Down if alt => {
                self.history_view.scroll_by(1);
                Vec::new()
            }
            _ => {
                // Disjoint bindings: at most one of the two claims the key
                let by_input = self.input.handle_key(key);
                let by_selector = self.file_selector.handle_key(key);
                if !by_input.was_handled() && !by_selector.was_handled() {
                    tracing::trace!(code = ?key.code, "Unbound key");
                }

                match self.file_selector.take_selection() {
                    Some(Selection::Enabled(path)) => self.update(AppEvent::FileSelected(path)),
                    Some(Selection::Disabled(path)) => {
                        self.update(AppEvent::FileSelectionRejected(path))
                    }
                    Some(Selection::OpenDir(dir)) => vec![Command::ScanDirectory { dir }],
                    None => Vec::new(),
                }
            }
        }
    }

    fn on_file_selected(&mut self, path: PathBuf) {
        tracing::debug!(path = %path.display(), "File selected");
        self.selected_file = Some(path);
    }

    fn on_selection_rejected(&mut self, path: PathBuf) -> Vec<Command> {
        tracing::debug!(path = %path.display(), "Selection rejected");
        self.error_generation += 1;
        self.error = Some(ErrorState {
            message: format!("{} is not valid.", path.display()),
            created_at: Instant::now(),
            generation: self.error_generation,
        });
        self.selected_file = None;

        vec![Command::StartTimer {
            tag: TimerTag::ClearError {
                generation: self.error_generation,
            },
            after: self.error_timeout,
        }]
    }

    fn on_batch_completed(&mut self, outcomes: &[FileOutcome]) {
        for outcome in outcomes {
            self.history.push(outcome.summary());
        }
        self.refresh_history();
    }

    fn push_history(&mut self, entry: impl Into<String>) {
        self.history.push(entry);
        self.refresh_history();
    }

    /// Rebuild the history viewport from the log and follow the newest line
    fn refresh_history(&mut self) {
        self.history_view.set_text(self.history.entries());
        self.history_view.scroll_to_bottom();
    }

    fn apply_layout(&mut self) {
        let (w, h) = inner_size(self.layout.content);
        self.content.resize(w, h);
        let (w, h) = inner_size(self.layout.history);
        self.history_view.resize(w, h);
    }
}
