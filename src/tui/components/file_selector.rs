//! File selector
//!
//! Lists one directory under a fixed root. Directories are always
//! navigable; files are always listed but disabled unless their name ends
//! with one of the allowed extensions (exact, case-sensitive).
//!
//! Bindings: Up/Down move the highlight, Tab opens the highlighted directory
//! or chooses the highlighted file, Shift+Tab goes to the parent directory
//! without leaving the root. Listings arrive asynchronously through
//! [`FileSelector::apply_listing`].

use crate::events::ListingEntry;
use crate::tui::traits::{Component, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::path::{Path, PathBuf};

/// A listed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorEntry {
    pub name: String,
    pub is_dir: bool,
    pub disabled: bool,
}

/// Outcome of a Tab / Shift+Tab press, collected by the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// An allowed file was chosen
    Enabled(PathBuf),
    /// A disallowed file was chosen
    Disabled(PathBuf),
    /// The selector moved to this directory and needs its listing
    OpenDir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ListingStatus {
    Loading,
    Ready,
    Failed(String),
}

pub struct FileSelector {
    root: PathBuf,
    current_dir: PathBuf,
    allowed_extensions: Vec<String>,
    entries: Vec<SelectorEntry>,
    /// Valid index whenever `entries` is non-empty
    highlighted: usize,
    status: ListingStatus,
    pending: Option<Selection>,
}

impl FileSelector {
    pub fn new(root: impl Into<PathBuf>, allowed_extensions: Vec<String>) -> Self {
        let root = root.into();
        Self {
            current_dir: root.clone(),
            root,
            allowed_extensions,
            entries: Vec::new(),
            highlighted: 0,
            status: ListingStatus::Loading,
            pending: None,
        }
    }

    #[cfg(test)]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn entries(&self) -> &[SelectorEntry] {
        &self.entries
    }

    pub fn highlighted(&self) -> Option<&SelectorEntry> {
        self.entries.get(self.highlighted)
    }

    /// Whether a file name passes the extension filter
    ///
    /// An empty filter allows every file.
    pub fn is_allowed(&self, name: &str) -> bool {
        self.allowed_extensions.is_empty()
            || self
                .allowed_extensions
                .iter()
                .any(|ext| name.ends_with(ext.as_str()))
    }

    /// Install a listing for `dir`
    ///
    /// Returns false and changes nothing if `dir` is no longer the current
    /// directory.
    pub fn apply_listing(&mut self, dir: &Path, result: Result<Vec<ListingEntry>, String>) -> bool {
        if dir != self.current_dir {
            return false;
        }

        match result {
            Ok(listing) => {
                self.entries = listing
                    .into_iter()
                    .map(|e| SelectorEntry {
                        disabled: !e.is_dir && !self.is_allowed(&e.name),
                        name: e.name,
                        is_dir: e.is_dir,
                    })
                    .collect();
                self.status = ListingStatus::Ready;
            }
            Err(e) => {
                self.entries.clear();
                self.status = ListingStatus::Failed(e);
            }
        }
        self.highlighted = 0;
        true
    }

    /// The selection made by the last key press, if any
    pub fn take_selection(&mut self) -> Option<Selection> {
        self.pending.take()
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.highlighted + 1 < self.entries.len() {
            self.highlighted += 1;
        }
    }

    /// Open the highlighted directory or choose the highlighted file
    pub fn select(&mut self) {
        let Some(entry) = self.entries.get(self.highlighted) else {
            return;
        };
        let path = self.current_dir.join(&entry.name);
        let (is_dir, disabled) = (entry.is_dir, entry.disabled);

        self.pending = Some(if is_dir {
            self.enter(path.clone());
            Selection::OpenDir(path)
        } else if disabled {
            Selection::Disabled(path)
        } else {
            Selection::Enabled(path)
        });
    }

    /// Go to the parent directory, never above the root
    pub fn back(&mut self) {
        if self.current_dir == self.root {
            return;
        }
        let parent = match self.current_dir.parent() {
            Some(p) if p.starts_with(&self.root) => p.to_path_buf(),
            _ => self.root.clone(),
        };
        self.enter(parent.clone());
        self.pending = Some(Selection::OpenDir(parent));
    }

    fn enter(&mut self, dir: PathBuf) {
        self.current_dir = dir;
        self.entries.clear();
        self.highlighted = 0;
        self.status = ListingStatus::Loading;
    }

    fn title(&self) -> String {
        let relative = self
            .current_dir
            .strip_prefix(&self.root)
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if relative.is_empty() {
            " Files ".to_string()
        } else {
            format!(" Files: {} ", relative)
        }
    }
}

impl Component for FileSelector {
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let block = Block::default()
            .title(self.title())
            .title_style(Style::default().fg(theme.title))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border));

        let placeholder = match &self.status {
            ListingStatus::Loading => Some("Loading...".to_string()),
            ListingStatus::Failed(e) => Some(format!("Unreadable: {}", e)),
            ListingStatus::Ready if self.entries.is_empty() => Some("(empty)".to_string()),
            ListingStatus::Ready => None,
        };
        if let Some(text) = placeholder {
            let paragraph = Paragraph::new(Line::styled(text, Style::default().fg(theme.muted)))
                .block(block);
            f.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let (label, style) = if entry.is_dir {
                    (
                        format!("{}/", entry.name),
                        Style::default()
                            .fg(theme.directory)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if entry.disabled {
                    (entry.name.clone(), Style::default().fg(theme.disabled))
                } else {
                    (entry.name.clone(), Style::default().fg(theme.foreground))
                };
                ListItem::new(Line::from(Span::styled(label, style)))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default().with_selected(Some(self.highlighted));
        f.render_stateful_widget(list, area, &mut state);
    }
}

impl Interactive for FileSelector {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Tab => self.select(),
            KeyCode::BackTab => self.back(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn key_hint(&self) -> Option<&'static str> {
        Some("↑↓:files  Tab:open/select  S-Tab:back")
    }
}
