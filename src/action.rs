//! Actions: user intents and async results

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{EntityDetail, EntitySummary, FocusArea};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    Init,

    // ===== Search category =====
    /// Raw search bar text changed
    SearchInput(String),
    /// Clear the search bar
    SearchClear,

    // ===== Query category =====
    /// Debounce timer fired for the input recorded under `revision`
    QuerySettled { query: String, revision: u64 },

    // ===== Catalog category =====
    CatalogDidLoad { epoch: u64, catalog: Vec<EntitySummary> },
    CatalogDidError { epoch: u64, error: String },

    // ===== Page category =====
    PageDidLoad { epoch: u64, offset: usize, details: Vec<EntityDetail> },
    PageDidError { epoch: u64, offset: usize, error: String },

    /// Fetch the next window of matches
    LoadMore,

    // ===== Grid category =====
    GridSelect(usize),
    /// Post-append scroll target
    GridReveal(usize),

    // ===== Detail category =====
    DetailOpen,
    DetailClose,

    // ===== Focus category =====
    FocusNext,
    FocusSet(FocusArea),

    // ===== UI category =====
    UiTerminalResize(u16, u16),
    /// Force a re-render (cursor movement inside the input)
    UiRender,

    Tick,
    Quit,
}
