//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::search::{filter_catalog, page_window};
use crate::state::{AppState, DetailView, FIRST_PAGE_SIZE, LOAD_MORE_SIZE};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            if state.input.trim().is_empty() {
                return DispatchResult::unchanged();
            }
            // A seeded query skips the debounce.
            let query = state.input.clone();
            settle_query(state, &query)
        }

        // ===== Debounced input =====
        Action::SearchInput(input) => {
            if input == state.input {
                return DispatchResult::unchanged();
            }
            state.input = input;
            state.input_revision = state.input_revision.wrapping_add(1);
            DispatchResult::changed_with(Effect::DebounceQuery {
                query: state.input.clone(),
                revision: state.input_revision,
                delay_ms: state.config.debounce_ms,
            })
        }

        Action::SearchClear => {
            if state.input.is_empty() {
                return DispatchResult::unchanged();
            }
            reducer(state, Action::SearchInput(String::new()))
        }

        Action::QuerySettled { query, revision } => {
            if revision != state.input_revision {
                return DispatchResult::unchanged();
            }
            settle_query(state, &query)
        }

        // ===== Name index =====
        Action::CatalogDidLoad { epoch, catalog } => {
            if !state.session.is_current(epoch) || !state.session.loading {
                return DispatchResult::unchanged();
            }
            state.session.matches = filter_catalog(&catalog, &state.session.query);
            let window = page_window(state.session.matches.len(), 0, FIRST_PAGE_SIZE);
            if window.is_empty() {
                state.session.loading = false;
                return DispatchResult::changed();
            }
            DispatchResult::changed_with(Effect::FetchPage {
                epoch,
                offset: 0,
                entries: state.session.matches[window].to_vec(),
            })
        }

        Action::CatalogDidError { epoch, error } => {
            if !state.session.is_current(epoch) {
                return DispatchResult::unchanged();
            }
            state.session.matches.clear();
            state.session.loading = false;
            state.session.error = Some(error);
            DispatchResult::changed()
        }

        // ===== Pagination =====
        Action::LoadMore => {
            let session = &state.session;
            if !session.has_more() || session.loading_more || session.loading {
                return DispatchResult::unchanged();
            }
            let offset = session.materialized.len();
            let window = page_window(session.matches.len(), offset, LOAD_MORE_SIZE);
            let entries = session.matches[window].to_vec();
            let epoch = session.epoch;
            // Retrying a failed first page shows the full spinner again.
            if offset == 0 {
                state.session.loading = true;
            } else {
                state.session.loading_more = true;
            }
            state.session.error = None;
            DispatchResult::changed_with(Effect::FetchPage {
                epoch,
                offset,
                entries,
            })
        }

        Action::PageDidLoad {
            epoch,
            offset,
            details,
        } => {
            let session = &mut state.session;
            if !session.is_current(epoch) || offset != session.materialized.len() {
                return DispatchResult::unchanged();
            }
            let room = session.matches.len() - session.materialized.len();
            session.materialized.extend(details.into_iter().take(room));
            // At most one page is in flight, so whichever flag it set is cleared.
            session.loading = false;
            session.loading_more = false;
            if offset == 0 {
                state.selected = 0;
                return DispatchResult::changed();
            }
            DispatchResult::changed_with(Effect::RevealCard { index: offset })
        }

        Action::PageDidError {
            epoch,
            offset,
            error,
        } => {
            let session = &mut state.session;
            if !session.is_current(epoch) || offset != session.materialized.len() {
                return DispatchResult::unchanged();
            }
            session.loading = false;
            session.loading_more = false;
            session.error = Some(error);
            DispatchResult::changed()
        }

        // ===== Grid =====
        Action::GridSelect(index) => {
            let len = state.session.materialized.len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let bounded = index.min(len - 1);
            if bounded == state.selected {
                return DispatchResult::unchanged();
            }
            state.selected = bounded;
            DispatchResult::changed()
        }

        Action::GridReveal(index) => {
            if index >= state.session.materialized.len() || state.modal_open() {
                return DispatchResult::unchanged();
            }
            // Scroll target only; focus stays where the user put it.
            state.selected = index;
            DispatchResult::changed()
        }

        // ===== Detail overlay =====
        Action::DetailOpen => {
            if state.modal_open() {
                return DispatchResult::unchanged();
            }
            let Some(entity) = state.selected_entity().cloned() else {
                return DispatchResult::unchanged();
            };
            state.detail = Some(DetailView {
                entity,
                return_focus: state.focus,
            });
            DispatchResult::changed()
        }

        Action::DetailClose => {
            let Some(view) = state.detail.take() else {
                return DispatchResult::unchanged();
            };
            state.focus = view.return_focus;
            DispatchResult::changed()
        }

        // ===== Focus =====
        Action::FocusNext => {
            if state.modal_open() {
                return DispatchResult::unchanged();
            }
            state.focus = state.focus.toggle();
            DispatchResult::changed()
        }

        Action::FocusSet(area) => {
            if state.modal_open() || state.focus == area {
                return DispatchResult::unchanged();
            }
            state.focus = area;
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::UiRender => DispatchResult::changed(),

        Action::Tick => {
            if !state.is_animating() {
                return DispatchResult::unchanged();
            }
            state.tick = state.tick.wrapping_add(1);
            DispatchResult::changed()
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Replace the session for a settled query. Empty queries never hit the
/// network.
fn settle_query(state: &mut AppState, raw: &str) -> DispatchResult<Effect> {
    let query = raw.trim();
    if query == state.session.query && state.session.epoch > 0 {
        return DispatchResult::unchanged();
    }
    state.session.restart(query.to_string());
    state.selected = 0;
    state.detail = None;
    if query.is_empty() {
        return DispatchResult::changed();
    }
    state.session.loading = true;
    DispatchResult::changed_with(Effect::FetchCatalog {
        epoch: state.session.epoch,
        url: state.config.catalog_url(),
    })
}
