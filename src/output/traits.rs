//! Output writer trait and error types
//!
//! Every writer renders the finalized results of a run into a string and
//! can write that string to a file.

use crate::results::{ResultTable, RunSummary};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Renders a finalized run
///
/// Writers only ever see a table after the run is complete.
pub trait ResultWriter {
    /// Short format name used in log and confirmation lines
    fn name(&self) -> &'static str;

    /// Renders the run into the writer's format
    fn render(&self, table: &ResultTable, summary: &RunSummary) -> OutputResult<String>;

    /// Renders the run and writes it to `path`, replacing any existing file
    fn write_to(&self, path: &Path, table: &ResultTable, summary: &RunSummary) -> OutputResult<()> {
        let content = self.render(table, summary)?;

        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;

        tracing::debug!("Wrote {} output to {}", self.name(), path.display());
        Ok(())
    }
}
