//! JSON output
//!
//! An object mapping each successful URL to the array of its links,
//! indented with four spaces.

use crate::output::traits::{OutputError, OutputResult, ResultWriter};
use crate::results::{ResultTable, RunSummary};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::BTreeMap;

/// Writes a URL -> links object
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonWriter;

impl ResultWriter for JsonWriter {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn render(&self, table: &ResultTable, _summary: &RunSummary) -> OutputResult<String> {
        let document: BTreeMap<&str, Vec<&str>> = table
            .successes()
            .map(|(url, links)| (url, links.iter().map(String::as_str).collect()))
            .collect();

        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        document
            .serialize(&mut serializer)
            .map_err(|e| OutputError::Format(e.to_string()))?;

        String::from_utf8(buffer).map_err(|e| OutputError::Format(e.to_string()))
    }
}
