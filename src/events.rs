// Events and commands that flow between the TUI and background tasks
//
// Everything that can change application state arrives as an AppEvent on a
// single FIFO queue. Everything the state machine wants done off the event
// path leaves as a Command, and each Command produces exactly one AppEvent
// when it finishes.

use crate::pipeline::FileOutcome;
use crossterm::event::KeyEvent;
use std::path::PathBuf;
use std::time::Duration;

/// A single entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Identifies what a timer was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTag {
    /// Clear the error banner, if it is still the one with this generation
    ClearError { generation: u64 },
}

/// Main event type consumed by `App::update`
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Key press from the terminal
    Key(KeyEvent),

    /// Terminal resized to (width, height)
    Resize(u16, u16),

    /// The terminal stopped delivering input; no key can arrive after this
    InputFailed(String),

    /// An allowed file was chosen in the file selector
    FileSelected(PathBuf),

    /// A file with a disallowed extension was chosen
    FileSelectionRejected(PathBuf),

    /// A timer started with `Command::StartTimer` elapsed
    TimerFired(TimerTag),

    /// A directory scan for the file selector finished
    DirectoryListed {
        dir: PathBuf,
        result: Result<Vec<ListingEntry>, String>,
    },

    /// Every file of the embedding batch resolved, in enumeration order
    EmbeddingBatchCompleted { outcomes: Vec<FileOutcome> },

    /// The batch directory itself could not be read
    EmbeddingBatchFailed { dir: PathBuf, error: String },
}

/// Background work requested by `App::init` / `App::update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List `dir` for the file selector
    ScanDirectory { dir: PathBuf },

    /// Embed every non-directory file of `dir`, one request at a time
    EmbedDirectory { dir: PathBuf },

    /// Deliver `TimerFired(tag)` after `after`
    StartTimer { tag: TimerTag, after: Duration },
}
