//! Run results data model
//!
//! This module defines what a run produces:
//! - `LinkSet` and `FetchOutcome` for a single URL
//! - `ResultAggregator`, the synchronized sink workers record into
//! - `ResultTable` and `RunSummary`, the finalized read-only view

mod aggregator;
mod outcome;
mod table;

pub use aggregator::{ProgressObserver, ResultAggregator};
pub use outcome::{FetchOutcome, LinkSet};
pub use table::{ResultTable, RunSummary};
