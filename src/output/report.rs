//! Run report generation
//!
//! A short human-readable report: when the run finished, how many URLs were
//! scanned, how many failed and how many links each page yielded.

use crate::output::traits::{OutputResult, ResultWriter};
use crate::results::{ResultTable, RunSummary};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Writes the run report
#[derive(Debug, Clone, Default)]
pub struct ReportWriter {
    /// Hash of the config file the run was started with
    config_hash: Option<String>,
}

impl ReportWriter {
    /// Creates a report writer
    pub fn new(config_hash: Option<String>) -> Self {
        Self { config_hash }
    }
}

impl ResultWriter for ReportWriter {
    fn name(&self) -> &'static str {
        "report"
    }

    fn render(&self, table: &ResultTable, summary: &RunSummary) -> OutputResult<String> {
        let mut report = String::new();

        report.push_str("Link Harvest Report\n");
        report.push_str(&format!(
            "Date: {}\n",
            summary.finished_at.format("%Y-%m-%d %H:%M:%S")
        ));
        report.push_str(&format!("Total URLs scanned: {}\n", summary.total));
        report.push_str(&format!("Invalid URLs: {}\n", summary.failed));
        if let Some(hash) = &self.config_hash {
            report.push_str(&format!("Config hash: {}\n", hash));
        }

        report.push_str("Links found per URL:\n");
        for (url, links) in table.successes() {
            report.push_str(&format!("- {}: {} links\n", url, links.len()));
        }

        if summary.failed > 0 {
            report.push_str("Failed URLs:\n");
            for (url, error) in table.failures() {
                report.push_str(&format!("- {}: {}\n", url, error));
            }
        }

        Ok(report)
    }
}

/// Path of the report for a run finished at `finished_at`
///
/// The file is named `report_<YYYYmmdd_HHMMSS>.txt` inside `dir`.
pub fn report_path(dir: &Path, finished_at: &DateTime<Local>) -> PathBuf {
    dir.join(format!("report_{}.txt", finished_at.format("%Y%m%d_%H%M%S")))
}
