// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - The input thread feeding key and resize events into the event queue
// - The event loop: draw, wait for one event, update, dispatch commands

pub mod app;
pub mod components;
pub mod history;
pub mod layout;
pub mod markdown;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use crate::pipeline::EmbeddingClient;
use crate::scheduler::Scheduler;
use anyhow::{bail, Context, Result};
use app::App;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedSender};

/// How long the input thread blocks before checking whether to exit
const INPUT_POLL: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop until the user quits, and
/// restores the terminal even if the loop failed.
pub async fn run_tui(config: Config, content: String, log_buffer: LogBuffer) -> Result<()> {
    let embedder = EmbeddingClient::new(config.embed_url.clone(), config.request_timeout())
        .context("Failed to create embedding client")?;

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &config, &content, log_buffer, embedder).await;

    // Restore terminal
    restore_terminal().context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Leave raw mode and the alternate screen
///
/// Also called from the panic hook, so it must not assume a live Terminal.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

async fn run_event_loop(
    terminal: &mut Term,
    config: &Config,
    content: &str,
    log_buffer: LogBuffer,
    embedder: EmbeddingClient,
) -> Result<()> {
    let size = terminal.size().context("Failed to read terminal size")?;
    let (tx, mut rx) = mpsc::unbounded_channel();

    spawn_input_thread(tx.clone());
    let scheduler = Scheduler::new(tx, embedder);

    let (mut app, commands) = App::init(config, content, log_buffer, (size.width, size.height));
    scheduler.dispatch_all(commands);

    tracing::info!(data_dir = %config.data_dir.display(), "TUI started");

    loop {
        terminal
            .draw(|f| views::draw(f, &app))
            .context("Failed to draw frame")?;

        let Some(event) = rx.recv().await else {
            tracing::debug!("Event queue closed");
            break;
        };
        let commands = app.update(event);
        scheduler.dispatch_all(commands);

        if app.should_quit {
            break;
        }
    }

    tracing::info!("TUI stopped");
    match app.input_failure {
        Some(error) => bail!("Terminal input failed: {}", error),
        None => Ok(()),
    }
}

/// Forward terminal input into the event queue from a dedicated thread
///
/// The thread exits on its own once the receiving side is dropped. If the
/// terminal fails, the last thing it sends is `InputFailed`.
fn spawn_input_thread(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || {
        while !tx.is_closed() {
            let forwarded = match next_input() {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    let _ = tx.send(AppEvent::InputFailed(e.to_string()));
                    break;
                }
            };
            if tx.send(forwarded).is_err() {
                break;
            }
        }
        tracing::debug!("Input thread exiting");
    });
}

/// Wait up to `INPUT_POLL` for a key or resize
fn next_input() -> io::Result<Option<AppEvent>> {
    if !event::poll(INPUT_POLL)? {
        return Ok(None);
    }
    Ok(match event::read()? {
        Event::Key(key) => Some(AppEvent::Key(key)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    })
}
