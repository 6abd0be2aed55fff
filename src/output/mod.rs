//! Output module for rendering harvest results
//!
//! This module handles:
//! - Plain text, CSV and JSON exports of the harvested links
//! - The run report
//! - The terminal summary

mod csv;
mod json;
mod report;
pub mod stats;
mod text;
mod traits;

pub use csv::CsvWriter;
pub use json::JsonWriter;
pub use report::{report_path, ReportWriter};
pub use stats::print_run_summary;
pub use text::TextWriter;
pub use traits::{OutputError, OutputResult, ResultWriter};

use crate::config::OutputConfig;
use crate::results::{ResultTable, RunSummary};
use std::path::{Path, PathBuf};

/// Writes every output the configuration asks for
///
/// # Arguments
///
/// * `config` - Which files to produce
/// * `table` - The finalized result table
/// * `summary` - The run summary
/// * `config_hash` - Hash of the config file, shown in the report
///
/// # Returns
///
/// * `Ok(Vec<(&str, PathBuf)>)` - Format name and path of each file written
/// * `Err(OutputError)` - A file could not be written; earlier files remain
pub fn write_outputs(
    config: &OutputConfig,
    table: &ResultTable,
    summary: &RunSummary,
    config_hash: Option<String>,
) -> OutputResult<Vec<(&'static str, PathBuf)>> {
    let mut written = Vec::new();

    let exports: [(Option<&PathBuf>, &dyn ResultWriter); 3] = [
        (config.text_path.as_ref(), &TextWriter),
        (config.csv_path.as_ref(), &CsvWriter),
        (config.json_path.as_ref(), &JsonWriter),
    ];

    for (path, writer) in exports {
        if let Some(path) = path {
            writer.write_to(path, table, summary)?;
            written.push((writer.name(), path.clone()));
        }
    }

    if config.report {
        let dir = config.report_dir.as_deref().unwrap_or(Path::new("."));
        let path = report_path(dir, &summary.finished_at);
        ReportWriter::new(config_hash).write_to(&path, table, summary)?;
        written.push(("report", path));
    }

    Ok(written)
}
