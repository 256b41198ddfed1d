//! Results region: exactly one of spinner, error, cards, welcome or not-found

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;

use super::{
    spinner_frame, CardGrid, CardGridProps, Component, ACCENT_BLUE, ACCENT_GOLD, ACCENT_RED,
    BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{AppState, FocusArea};

/// Which body the results region shows. Checked in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultsMode {
    Searching,
    Failed,
    Cards,
    Welcome,
    NotFound,
}

impl ResultsMode {
    pub fn of(state: &AppState) -> Self {
        let session = &state.session;
        if session.loading && !session.loading_more {
            ResultsMode::Searching
        } else if session.error.is_some() {
            ResultsMode::Failed
        } else if !session.materialized.is_empty() {
            ResultsMode::Cards
        } else if session.query.is_empty() {
            ResultsMode::Welcome
        } else {
            ResultsMode::NotFound
        }
    }
}

pub struct ResultsViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct ResultsView {
    grid: CardGrid,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    fn grid_props<'a>(state: &'a AppState, is_focused: bool) -> CardGridProps<'a> {
        CardGridProps {
            cards: &state.session.materialized,
            selected: state.selected,
            is_focused,
            on_select: Action::GridSelect,
        }
    }

    fn render_message(frame: &mut Frame, area: Rect, text: Text<'static>) {
        let height = (text.lines.len() as u16).min(area.height);
        let top = area.y + area.height.saturating_sub(height) / 2;
        let centered = Rect {
            x: area.x,
            y: top,
            width: area.width,
            height,
        };
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            centered,
        );
    }

    fn render_load_more(frame: &mut Frame, area: Rect, state: &AppState) {
        let label = if state.session.loading_more {
            Line::from(vec![
                Span::styled(
                    spinner_frame(state.tick),
                    Style::default().fg(ACCENT_GOLD),
                ),
                Span::raw(" Loading..."),
            ])
        } else {
            Line::from(vec![
                Span::styled(
                    "Load More Pokemon",
                    Style::default()
                        .fg(ACCENT_GOLD)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (m)", Style::default().fg(TEXT_DIM)),
            ])
        };
        let width = (label.width() as u16 + 4).min(area.width);
        let button = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y,
            width,
            height: area.height.min(3),
        };
        let border = if state.session.loading_more {
            Style::default().fg(TEXT_DIM)
        } else {
            Style::default().fg(ACCENT_GOLD)
        };
        frame.render_widget(
            Paragraph::new(label).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border),
            ),
            button,
        );
    }
}

impl Component<Action> for ResultsView {
    type Props<'a> = ResultsViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        let state = props.state;
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/') => {
                return vec![Action::FocusSet(FocusArea::Search)]
            }
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('m') => {
                if state.session.has_more() && !state.session.loading_more {
                    return vec![Action::LoadMore];
                }
                return Vec::new();
            }
            _ => {}
        }

        if ResultsMode::of(state) != ResultsMode::Cards {
            return Vec::new();
        }
        self.grid
            .handle_event(event, Self::grid_props(state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let border = if props.is_focused {
            Style::default().fg(ACCENT_GOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let session = &state.session;
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .title(" Results ");
        if !session.matches.is_empty() {
            block = block.title_top(
                Line::from(format!(
                    " {} of {} ",
                    session.materialized.len(),
                    session.matches.len()
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match ResultsMode::of(state) {
            ResultsMode::Searching => Self::render_message(frame, inner, searching_text(state.tick)),
            ResultsMode::Failed => {
                let message = session.error.clone().unwrap_or_default();
                let retry = session.has_more();
                Self::render_message(frame, inner, error_text(message, retry));
            }
            ResultsMode::Cards => {
                if session.has_more() {
                    let chunks =
                        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(inner);
                    self.grid
                        .render(frame, chunks[0], Self::grid_props(state, props.is_focused));
                    Self::render_load_more(frame, chunks[1], state);
                } else {
                    self.grid
                        .render(frame, inner, Self::grid_props(state, props.is_focused));
                }
            }
            ResultsMode::Welcome => Self::render_message(frame, inner, welcome_text()),
            ResultsMode::NotFound => Self::render_message(frame, inner, not_found_text()),
        }
    }
}

fn searching_text(tick: u64) -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(
            spinner_frame(tick),
            Style::default().fg(ACCENT_GOLD),
        )),
        Line::from(Span::styled(
            "Searching for Pokemon...",
            Style::default().fg(TEXT_DIM),
        )),
    ])
}

fn error_text(message: String, retry: bool) -> Text<'static> {
    let mut lines = vec![
        Line::from(Span::styled(
            message,
            Style::default()
                .fg(ACCENT_RED)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Try searching for a different Pokemon!",
            Style::default().fg(TEXT_DIM),
        )),
    ];
    if retry {
        lines.push(Line::from(Span::styled(
            "or press m to retry",
            Style::default().fg(TEXT_DIM),
        )));
    }
    Text::from(lines)
}

fn welcome_text() -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(
            "Welcome to Pokemon Search!",
            Style::default()
                .fg(ACCENT_BLUE)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Start typing to search for your favorite Pokemon",
            Style::default().fg(TEXT_DIM),
        )),
    ])
}

fn not_found_text() -> Text<'static> {
    let dim = Style::default().fg(TEXT_DIM);
    Text::from(vec![
        Line::from(Span::styled(
            "No Pokemon Found!",
            Style::default()
                .fg(ACCENT_BLUE)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Looks like this Pokemon is still in Professor Oak's lab!",
            dim,
        )),
        Line::from(""),
        Line::from(Span::styled("Try searching for:", Style::default().fg(ACCENT_GOLD))),
        Line::from(Span::styled("Pikachu (the most famous one!)", dim)),
        Line::from(Span::styled("Charizard (if you're feeling fiery)", dim)),
        Line::from(Span::styled("Bulbasaur (the OG starter)", dim)),
    ])
}
