//! Background document processing
//!
//! ```text
//! data_dir ──→ EmbeddingJob (snapshot, sequential) ──→ EmbeddingClient ──→ POST /embed
//!                    │
//!                    └──→ Vec<FileOutcome> ──→ AppEvent::EmbeddingBatchCompleted
//! ```

pub mod batch;
pub mod embeddings;

pub use batch::{EmbeddingJob, FileOutcome, FileOutcomeError};
pub use embeddings::{EmbeddingClient, EmbeddingError};
