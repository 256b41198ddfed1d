//! Effects - side effects declared by the reducer

use crate::state::EntitySummary;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Settle `query` after `delay_ms` unless newer input arrives first
    DebounceQuery {
        query: String,
        revision: u64,
        delay_ms: u64,
    },
    /// Fetch the full name catalog
    FetchCatalog { epoch: u64, url: String },
    /// Fetch details for `entries`, which start at `offset` in the matches
    FetchPage {
        epoch: u64,
        offset: usize,
        entries: Vec<EntitySummary>,
    },
    /// Scroll the grid to a freshly appended card
    RevealCard { index: usize },
}
