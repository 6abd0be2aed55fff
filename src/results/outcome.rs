//! Per-URL outcome definitions

use crate::FetchError;
use std::collections::BTreeSet;

/// Distinct link targets found on one page, recorded verbatim
pub type LinkSet = BTreeSet<String>;

/// Terminal result of one fetch+extract task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was fetched and its anchors extracted
    Success(LinkSet),

    /// The fetch failed; no extraction took place
    Failure(FetchError),
}

impl FetchOutcome {
    /// Returns true if the page was fetched successfully
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns true if the fetch failed
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// The extracted links, if the task succeeded
    pub fn links(&self) -> Option<&LinkSet> {
        match self {
            Self::Success(links) => Some(links),
            Self::Failure(_) => None,
        }
    }

    /// The failure reason, if the task failed
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Number of links found (zero for failures)
    pub fn link_count(&self) -> usize {
        self.links().map_or(0, LinkSet::len)
    }
}

impl From<Result<LinkSet, FetchError>> for FetchOutcome {
    fn from(result: Result<LinkSet, FetchError>) -> Self {
        match result {
            Ok(links) => Self::Success(links),
            Err(error) => Self::Failure(error),
        }
    }
}
