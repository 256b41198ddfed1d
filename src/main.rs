//! Pokemon search TUI - debounced search over the PokeAPI catalog

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame, Terminal,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokesearch::action::Action;
use pokesearch::api;
use pokesearch::components::{
    Component, DetailModal, DetailModalProps, ResultsView, ResultsViewProps, SearchBar,
    SearchBarProps, ACCENT_GOLD, BG_BASE,
};
use pokesearch::effect::Effect;
use pokesearch::reducer::reducer;
use pokesearch::state::{
    AppState, FocusArea, SearchConfig, DEFAULT_API_BASE, DEFAULT_CATALOG_LIMIT,
    DEFAULT_DEBOUNCE_MS, SPINNER_TICK_MS,
};

/// Delay between a load-more append and scrolling to the new card.
const REVEAL_DELAY: Duration = Duration::from_millis(100);

/// Pokemon search TUI
#[derive(Parser, Debug)]
#[command(name = "pokesearch")]
#[command(about = "Search Pokemon by name and browse their details")]
struct Args {
    /// Base URL of the PokeAPI service
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Number of catalog entries to fetch per search
    #[arg(long, default_value_t = DEFAULT_CATALOG_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    catalog_limit: u32,

    /// Quiet period before typed text becomes a search (milliseconds)
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    debounce_ms: u64,

    /// Initial search text
    #[arg(long, short)]
    query: Option<String>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum SearchComponentId {
    Search,
    Results,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum SearchContext {
    Search,
    Results,
    Detail,
}

impl EventRoutingState<SearchComponentId, SearchContext> for AppState {
    fn focused(&self) -> Option<SearchComponentId> {
        if self.modal_open() {
            return Some(SearchComponentId::Detail);
        }
        match self.focus {
            FocusArea::Search => Some(SearchComponentId::Search),
            FocusArea::Grid => Some(SearchComponentId::Results),
        }
    }

    fn modal(&self) -> Option<SearchComponentId> {
        if self.modal_open() {
            Some(SearchComponentId::Detail)
        } else {
            None
        }
    }

    fn binding_context(&self, id: SearchComponentId) -> SearchContext {
        match id {
            SearchComponentId::Search => SearchContext::Search,
            SearchComponentId::Results => SearchContext::Results,
            SearchComponentId::Detail => SearchContext::Detail,
        }
    }

    fn default_context(&self) -> SearchContext {
        SearchContext::Search
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_base,
        catalog_limit,
        debounce_ms,
        query,
        debug: debug_args,
    } = Args::parse();

    let debug = DebugSession::new(debug_args);

    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let config = SearchConfig {
        api_base,
        catalog_limit,
        debounce_ms,
    };
    let state = debug
        .load_state_or_else_async(move || async move {
            let state = AppState::new(config);
            Ok::<AppState, io::Error>(match query {
                Some(query) => state.with_input(query),
                None => state,
            })
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn is_quit_chord(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn respond(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

struct SearchUi {
    search_bar: SearchBar,
    results: ResultsView,
    detail: DetailModal,
    status_bar: StatusBar,
}

impl SearchUi {
    fn new() -> Self {
        Self {
            search_bar: SearchBar::new(),
            results: ResultsView::new(),
            detail: DetailModal::new(),
            status_bar: StatusBar::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<SearchComponentId>,
    ) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Pokemon Search",
                Style::default()
                    .fg(ACCENT_GOLD)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            chunks[0],
        );

        let focused = render_ctx.is_focused() && !state.modal_open();

        event_ctx.set_component_area(SearchComponentId::Search, chunks[1]);
        self.search_bar.render(
            frame,
            chunks[1],
            SearchBarProps {
                value: &state.input,
                is_focused: focused && state.focus == FocusArea::Search,
                pending: state.input_pending(),
            },
        );

        event_ctx.set_component_area(SearchComponentId::Results, chunks[2]);
        self.results.render(
            frame,
            chunks[2],
            ResultsViewProps {
                state,
                is_focused: focused && state.focus == FocusArea::Grid,
            },
        );

        self.render_status(frame, chunks[3], state);

        match &state.detail {
            Some(view) => {
                event_ctx.set_component_area(SearchComponentId::Detail, DetailModal::area(area));
                self.detail.render(
                    frame,
                    area,
                    DetailModalProps {
                        entity: &view.entity,
                        is_focused: render_ctx.is_focused(),
                    },
                );
            }
            None => {
                event_ctx.component_areas.remove(&SearchComponentId::Detail);
            }
        }
    }

    fn render_status(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let hints: Vec<StatusBarHint> = if state.modal_open() {
            vec![StatusBarHint::new("esc/x", "close")]
        } else {
            match state.focus {
                FocusArea::Search => vec![
                    StatusBarHint::new("type", "search"),
                    StatusBarHint::new("↓/enter", "results"),
                    StatusBarHint::new("esc", "clear"),
                    StatusBarHint::new("^c", "quit"),
                ],
                FocusArea::Grid => {
                    let mut hints = vec![
                        StatusBarHint::new("←↑↓→", "move"),
                        StatusBarHint::new("enter", "details"),
                    ];
                    if state.session.has_more() {
                        hints.push(StatusBarHint::new("m", "load more"));
                    }
                    hints.push(StatusBarHint::new("/", "search"));
                    hints.push(StatusBarHint::new("q", "quit"));
                    hints
                }
            }
        };
        let props = StatusBarProps {
            left: StatusBarSection::hints(&hints),
            center: StatusBarSection::empty(),
            right: StatusBarSection::empty(),
            style: StatusBarStyle::default(),
            is_focused: false,
        };
        <StatusBar as Component<Action>>::render(&mut self.status_bar, frame, area, props);
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = SearchBarProps {
            value: &state.input,
            is_focused: true,
            pending: state.input_pending(),
        };
        respond(
            self.search_bar
                .handle_event(event, props)
                .into_iter()
                .collect(),
        )
    }

    fn handle_results_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ResultsViewProps {
            state,
            is_focused: true,
        };
        respond(self.results.handle_event(event, props).into_iter().collect())
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(view) = &state.detail else {
            return HandlerResponse::ignored();
        };
        if let EventKind::Key(key) = event {
            if is_quit_chord(key) {
                return HandlerResponse::ignored();
            }
        }
        let props = DetailModalProps {
            entity: &view.entity,
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        // The overlay traps every other key, Tab included.
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(SearchUi::new()));
    let mut bus: EventBus<AppState, Action, SearchComponentId, SearchContext> = EventBus::new();
    let keybindings: Keybindings<SearchContext> = Keybindings::new();

    let ui_search = Rc::clone(&ui);
    bus.register(SearchComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    let ui_results = Rc::clone(&ui);
    bus.register(SearchComponentId::Results, move |event, state| {
        ui_results
            .borrow_mut()
            .handle_results_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(SearchComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) if is_quit_chord(&key) => HandlerResponse::action(Action::Quit),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::DebounceQuery {
            query,
            revision,
            delay_ms,
        } => {
            ctx.tasks()
                .debounce("query", Duration::from_millis(delay_ms), async move {
                    Action::QuerySettled { query, revision }
                });
        }
        Effect::FetchCatalog { epoch, url } => {
            ctx.tasks().cancel(&TaskKey::new("page"));
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match api::fetch_catalog(&url).await {
                    Ok(catalog) => Action::CatalogDidLoad { epoch, catalog },
                    Err(error) => Action::CatalogDidError {
                        epoch,
                        error: api::error_message(&error),
                    },
                }
            });
        }
        Effect::FetchPage {
            epoch,
            offset,
            entries,
        } => {
            ctx.tasks().spawn(TaskKey::new("page"), async move {
                match api::fetch_page(&entries).await {
                    Ok(details) => Action::PageDidLoad {
                        epoch,
                        offset,
                        details,
                    },
                    Err(error) => Action::PageDidError {
                        epoch,
                        offset,
                        error: api::error_message(&error),
                    },
                }
            });
        }
        Effect::RevealCard { index } => {
            ctx.tasks().spawn(TaskKey::new("reveal"), async move {
                tokio::time::sleep(REVEAL_DELAY).await;
                Action::GridReveal(index)
            });
        }
    }
}
