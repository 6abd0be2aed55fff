//! CSV output
//!
//! Header row `URL,Links`, then one `<url>,<link>` row per link. Fields are
//! quoted only when they contain a comma, a double quote or a line break.

use crate::output::traits::{OutputResult, ResultWriter};
use crate::results::{ResultTable, RunSummary};
use std::borrow::Cow;

/// Writes one row per (URL, link) pair
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl ResultWriter for CsvWriter {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn render(&self, table: &ResultTable, _summary: &RunSummary) -> OutputResult<String> {
        let mut out = String::from("URL,Links\r\n");

        for (url, links) in table.successes() {
            let url = escape_field(url);
            for link in links {
                out.push_str(&url);
                out.push(',');
                out.push_str(&escape_field(link));
                out.push_str("\r\n");
            }
        }

        Ok(out)
    }
}

/// Quotes a field when it would otherwise break the row
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
