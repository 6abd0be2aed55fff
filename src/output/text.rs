//! Plain text output
//!
//! One block per successful URL: a `URL:` header line, one link per line,
//! then a blank line.

use crate::output::traits::{OutputResult, ResultWriter};
use crate::results::{ResultTable, RunSummary};

/// Writes links as plain text blocks
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWriter;

impl ResultWriter for TextWriter {
    fn name(&self) -> &'static str {
        "TXT"
    }

    fn render(&self, table: &ResultTable, _summary: &RunSummary) -> OutputResult<String> {
        let mut out = String::new();

        for (url, links) in table.successes() {
            out.push_str(&format!("URL: {}\n", url));
            for link in links {
                out.push_str(link);
                out.push('\n');
            }
            out.push('\n');
        }

        Ok(out)
    }
}
