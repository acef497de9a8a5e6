// Async command scheduler
//
// Runs each Command on its own tokio task and sends exactly one AppEvent back
// through the event queue when it finishes. Update never awaits; the only
// suspension points in the program live here.

use crate::events::{AppEvent, Command, ListingEntry};
use crate::pipeline::batch::is_directory;
use crate::pipeline::{EmbeddingClient, EmbeddingJob};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Spawns background work and routes completions into the event queue
#[derive(Clone)]
pub struct Scheduler {
    tx: UnboundedSender<AppEvent>,
    embedder: Arc<EmbeddingClient>,
}

impl Scheduler {
    pub fn new(tx: UnboundedSender<AppEvent>, embedder: EmbeddingClient) -> Self {
        Self {
            tx,
            embedder: Arc::new(embedder),
        }
    }

    pub fn dispatch_all(&self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            // Completions arrive through the queue; the handle is not needed
            let _ = self.dispatch(command);
        }
    }

    /// Start `command` without waiting for it
    ///
    /// Must be called from within a tokio runtime. The returned handle resolves
    /// once the completion event has been delivered or dropped.
    pub fn dispatch(&self, command: Command) -> JoinHandle<()> {
        tracing::trace!(?command, "Dispatching command");
        let tx = self.tx.clone();

        match command {
            Command::ScanDirectory { dir } => tokio::spawn(async move {
                let result = list_directory(&dir).await.map_err(|e| e.to_string());
                deliver(&tx, AppEvent::DirectoryListed { dir, result });
            }),
            Command::EmbedDirectory { dir } => {
                let embedder = Arc::clone(&self.embedder);
                tokio::spawn(async move {
                    let event = embed_directory(dir, &embedder).await;
                    deliver(&tx, event);
                })
            }
            Command::StartTimer { tag, after } => tokio::spawn(async move {
                tokio::time::sleep(after).await;
                deliver(&tx, AppEvent::TimerFired(tag));
            }),
        }
    }
}

/// Send a completion; after quit the receiver is gone and the event is dropped
fn deliver(tx: &UnboundedSender<AppEvent>, event: AppEvent) {
    if tx.send(event).is_err() {
        tracing::trace!("Event queue closed, dropping completion");
    }
}

async fn embed_directory(dir: PathBuf, embedder: &EmbeddingClient) -> AppEvent {
    match EmbeddingJob::snapshot(&dir).await {
        Ok(job) => AppEvent::EmbeddingBatchCompleted {
            outcomes: job.run(embedder).await,
        },
        Err(e) => {
            tracing::warn!(dir = %dir.display(), "Cannot read directory for embedding: {}", e);
            AppEvent::EmbeddingBatchFailed {
                dir,
                error: e.to_string(),
            }
        }
    }
}

/// Visible entries of `dir`: directories first, then files, each by name
pub async fn list_directory(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }

        // Follow symlinks so a linked directory stays navigable
        let is_dir = is_directory(&entry).await;
        entries.push(ListingEntry { name, is_dir });
    }

    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TimerTag;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn scheduler() -> (Scheduler, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        // Nothing listens here; only the batch tests would notice
        let client =
            EmbeddingClient::new("http://127.0.0.1:9/embed", Duration::from_secs(1)).unwrap();
        (Scheduler::new(tx, client), rx)
    }

    #[tokio::test]
    async fn test_listing_orders_dirs_first_and_hides_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.exe"), "").unwrap();
        std::fs::write(dir.path().join("a.md"), "").unwrap();
        std::fs::write(dir.path().join(".hidden"), "").unwrap();
        std::fs::create_dir(dir.path().join("zeta")).unwrap();

        let entries = list_directory(dir.path()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "a.md", "b.exe"]);
        assert!(entries[0].is_dir);
        assert!(!entries[1].is_dir);
    }

    #[tokio::test]
    async fn test_scan_delivers_one_listing_event() {
        let (sched, mut rx) = scheduler();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "").unwrap();

        sched.dispatch(Command::ScanDirectory {
            dir: dir.path().to_path_buf(),
        });

        match rx.recv().await.unwrap() {
            AppEvent::DirectoryListed { dir: listed, result } => {
                assert_eq!(listed, dir.path());
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scan_of_missing_dir_reports_error() {
        let (sched, mut rx) = scheduler();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        sched.dispatch(Command::ScanDirectory { dir: missing });

        match rx.recv().await.unwrap() {
            AppEvent::DirectoryListed { result, .. } => assert!(result.is_err()),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_embed_of_missing_dir_fails_the_batch() {
        let (sched, mut rx) = scheduler();
        let dir = tempfile::tempdir().unwrap();

        sched.dispatch(Command::EmbedDirectory {
            dir: dir.path().join("missing"),
        });

        assert!(matches!(
            rx.recv().await.unwrap(),
            AppEvent::EmbeddingBatchFailed { .. }
        ));
    }

    #[tokio::test]
    async fn test_embed_with_unreachable_service_reports_each_file() {
        let (sched, mut rx) = scheduler();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "a").unwrap();
        std::fs::write(dir.path().join("b.txt"), "b").unwrap();

        sched.dispatch(Command::EmbedDirectory {
            dir: dir.path().to_path_buf(),
        });

        match rx.recv().await.unwrap() {
            AppEvent::EmbeddingBatchCompleted { outcomes } => {
                assert_eq!(outcomes.len(), 2);
                assert!(outcomes.iter().all(|o| o.result.is_err()));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_fires_after_delay_not_before() {
        let (sched, mut rx) = scheduler();
        let tag = TimerTag::ClearError { generation: 7 };

        sched.dispatch(Command::StartTimer {
            tag,
            after: Duration::from_secs(2),
        });

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(1)).await;
        match rx.recv().await.unwrap() {
            AppEvent::TimerFired(fired) => assert_eq!(fired, tag),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completion_after_quit_is_discarded() {
        let (sched, rx) = scheduler();

        let timer = sched.dispatch(Command::StartTimer {
            tag: TimerTag::ClearError { generation: 1 },
            after: Duration::from_secs(2),
        });
        let dir = tempfile::tempdir().unwrap();
        let scan = sched.dispatch(Command::ScanDirectory {
            dir: dir.path().to_path_buf(),
        });

        // Quit before either completes
        drop(rx);

        // Both tasks run to completion without panicking
        assert!(scan.await.is_ok());
        assert!(timer.await.is_ok());
        assert!(sched.tx.is_closed());
    }
}
