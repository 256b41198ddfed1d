//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_CATALOG_LIMIT: u32 = 1000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 600;

/// Number of details fetched for a freshly settled query.
pub const FIRST_PAGE_SIZE: usize = 8;
/// Number of details fetched per "load more".
pub const LOAD_MORE_SIZE: usize = 4;

/// Spinner animation tick.
pub const SPINNER_TICK_MS: u64 = 90;

/// One row of the name catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EntitySummary {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Sprites {
    pub front_default: Option<String>,
    pub back_default: Option<String>,
    pub front_shiny: Option<String>,
    pub back_shiny: Option<String>,
}

impl Sprites {
    /// Labels of the sprite variants the record provides.
    pub fn available(&self) -> Vec<&'static str> {
        [
            ("front", &self.front_default),
            ("back", &self.back_default),
            ("shiny", &self.front_shiny),
            ("shiny back", &self.back_shiny),
        ]
        .into_iter()
        .filter(|(_, url)| url.is_some())
        .map(|(label, _)| label)
        .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BaseStat {
    pub name: String,
    pub value: u16,
}

/// Full record for one entity. Keyed by `name` within a search session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EntityDetail {
    pub name: String,
    pub sprites: Sprites,
    pub types: Vec<String>,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    pub abilities: Vec<String>,
    pub stats: Vec<BaseStat>,
}

impl EntityDetail {
    pub fn primary_type(&self) -> Option<&str> {
        self.types.first().map(String::as_str)
    }

    pub fn height_label(&self) -> String {
        format!("{}m", tenths(self.height))
    }

    pub fn weight_label(&self) -> String {
        format!("{}kg", tenths(self.weight))
    }
}

fn tenths(value: u32) -> String {
    if value % 10 == 0 {
        (value / 10).to_string()
    } else {
        format!("{}.{}", value / 10, value % 10)
    }
}

/// Runtime settings the reducer needs to build effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchConfig {
    pub api_base: String,
    pub catalog_limit: u32,
    pub debounce_ms: u64,
}

impl SearchConfig {
    pub fn catalog_url(&self) -> String {
        format!(
            "{}/pokemon?limit={}",
            self.api_base.trim_end_matches('/'),
            self.catalog_limit
        )
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

/// State of the current search: what matched and how much of it has been
/// materialized into detail records.
///
/// `materialized` only ever grows by windows sliced from `matches` at
/// offset `materialized.len()`, so it never outgrows `matches`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchSession {
    pub query: String,
    pub matches: Vec<EntitySummary>,
    pub materialized: Vec<EntityDetail>,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
    /// Bumped on every settled query change; responses tagged with an older
    /// epoch are dropped.
    pub epoch: u64,
}

impl SearchSession {
    pub fn has_more(&self) -> bool {
        self.matches.len() > self.materialized.len()
    }

    /// Start over for `query` under a fresh epoch.
    pub fn restart(&mut self, query: String) {
        self.epoch = self.epoch.wrapping_add(1);
        self.query = query;
        self.matches.clear();
        self.materialized.clear();
        self.loading = false;
        self.loading_more = false;
        self.error = None;
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FocusArea {
    #[default]
    Search,
    Grid,
}

impl FocusArea {
    pub fn toggle(self) -> Self {
        match self {
            FocusArea::Search => FocusArea::Grid,
            FocusArea::Grid => FocusArea::Search,
        }
    }
}

/// The open detail overlay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailView {
    pub entity: EntityDetail,
    /// Focus to hand back when the overlay closes.
    pub return_focus: FocusArea,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub config: SearchConfig,
    /// Raw text in the search bar.
    pub input: String,
    pub input_revision: u64,
    pub session: SearchSession,
    pub focus: FocusArea,
    pub selected: usize,
    pub detail: Option<DetailView>,
    pub tick: u64,
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            input: String::new(),
            input_revision: 0,
            session: SearchSession::default(),
            focus: FocusArea::Search,
            selected: 0,
            detail: None,
            tick: 0,
            terminal_size: (80, 24),
        }
    }

    /// Seed the search bar, e.g. from `--query`.
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn selected_entity(&self) -> Option<&EntityDetail> {
        self.session.materialized.get(self.selected)
    }

    pub fn modal_open(&self) -> bool {
        self.detail.is_some()
    }

    /// True while the settled query lags behind what was typed.
    pub fn input_pending(&self) -> bool {
        self.input.trim() != self.session.query
    }

    pub fn is_animating(&self) -> bool {
        self.session.loading || self.session.loading_more
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Search")
                .entry("input", ron_string(&self.input))
                .entry("revision", ron_string(&self.input_revision))
                .entry("query", ron_string(&self.session.query))
                .entry("epoch", ron_string(&self.session.epoch)),
            DebugSection::new("Session")
                .entry("matches", ron_string(&self.session.matches.len()))
                .entry("materialized", ron_string(&self.session.materialized.len()))
                .entry("has_more", ron_string(&self.session.has_more()))
                .entry("loading", ron_string(&self.session.loading))
                .entry("loading_more", ron_string(&self.session.loading_more))
                .entry("error", ron_string(&self.session.error)),
            DebugSection::new("UI")
                .entry("focus", ron_string(&self.focus))
                .entry("selected", ron_string(&self.selected))
                .entry(
                    "detail",
                    ron_string(&self.detail.as_ref().map(|view| view.entity.name.clone())),
                )
                .entry("api_base", ron_string(&self.config.api_base)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(height: u32, weight: u32) -> EntityDetail {
        EntityDetail {
            name: "pikachu".into(),
            sprites: Sprites::default(),
            types: vec!["electric".into()],
            height,
            weight,
            abilities: Vec::new(),
            stats: Vec::new(),
        }
    }

    #[test]
    fn test_measurements_render_in_metric_units() {
        let pikachu = detail(4, 60);
        assert_eq!(pikachu.height_label(), "0.4m");
        assert_eq!(pikachu.weight_label(), "6kg");

        let onix = detail(88, 2105);
        assert_eq!(onix.height_label(), "8.8m");
        assert_eq!(onix.weight_label(), "210.5kg");
    }

    #[test]
    fn test_catalog_url_trims_trailing_slash() {
        let config = SearchConfig {
            api_base: "http://localhost:9000/api/v2/".into(),
            catalog_limit: 25,
            debounce_ms: 10,
        };
        assert_eq!(
            config.catalog_url(),
            "http://localhost:9000/api/v2/pokemon?limit=25"
        );
    }

    #[test]
    fn test_restart_bumps_epoch_and_clears_results() {
        let mut session = SearchSession {
            query: "old".into(),
            matches: vec![EntitySummary {
                name: "bulbasaur".into(),
                url: "u".into(),
            }],
            materialized: vec![detail(7, 69)],
            error: Some("boom".into()),
            epoch: 3,
            ..Default::default()
        };

        session.restart("new".into());

        assert_eq!(session.epoch, 4);
        assert_eq!(session.query, "new");
        assert!(session.matches.is_empty());
        assert!(session.materialized.is_empty());
        assert!(session.error.is_none());
        assert!(!session.has_more());
    }

    #[test]
    fn test_sprite_variants() {
        let sprites = Sprites {
            front_default: Some("f".into()),
            front_shiny: Some("s".into()),
            ..Default::default()
        };
        assert_eq!(sprites.available(), vec!["front", "shiny"]);
    }
}
