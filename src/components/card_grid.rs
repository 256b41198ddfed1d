//! Grid of entity cards with keyboard navigation

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;

use super::{
    format_name, Component, ACCENT_BLUE, ACCENT_GOLD, BG_HIGHLIGHT, BG_PANEL, TEXT_DIM, TEXT_MAIN,
};
use crate::action::Action;
use crate::state::{EntityDetail, FocusArea};

pub const CARD_WIDTH: u16 = 24;
pub const CARD_HEIGHT: u16 = 6;

/// Keeps the column count and scroll offset from the last render so
/// navigation matches what is on screen.
pub struct CardGrid {
    columns: usize,
    scroll_row: usize,
}

pub struct CardGridProps<'a> {
    pub cards: &'a [EntityDetail],
    pub selected: usize,
    pub is_focused: bool,
    pub on_select: fn(usize) -> Action,
}

impl Default for CardGrid {
    fn default() -> Self {
        Self {
            columns: 1,
            scroll_row: 0,
        }
    }
}

impl CardGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn columns_for(width: u16) -> usize {
        (width / CARD_WIDTH).max(1) as usize
    }

    fn step(&self, props: &CardGridProps<'_>, code: KeyCode) -> Option<Action> {
        let last = props.cards.len().checked_sub(1)?;
        let current = props.selected.min(last);
        let columns = self.columns.max(1);
        let next = match code {
            KeyCode::Left | KeyCode::Char('h') => current.checked_sub(1)?,
            KeyCode::Right | KeyCode::Char('l') => (current + 1).min(last),
            KeyCode::Down | KeyCode::Char('j') => (current + columns).min(last),
            KeyCode::Up | KeyCode::Char('k') => match current.checked_sub(columns) {
                Some(index) => index,
                None => return Some(Action::FocusSet(FocusArea::Search)),
            },
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return None,
        };
        if next == current {
            return None;
        }
        Some((props.on_select)(next))
    }

    fn render_card(frame: &mut Frame, area: Rect, card: &EntityDetail, highlighted: bool) {
        let border = if highlighted {
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ACCENT_BLUE)
        };
        let bg = if highlighted { BG_HIGHLIGHT } else { BG_PANEL };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .style(Style::default().bg(bg).fg(TEXT_MAIN));
        if let Some(kind) = card.primary_type() {
            block = block.title_top(
                Line::from(Span::styled(
                    format!(" {kind} "),
                    Style::default().fg(ACCENT_GOLD),
                ))
                .right_aligned(),
            );
        }

        let lines = vec![
            Line::from(Span::styled(
                format_name(&card.name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Height {}", card.height_label()),
                Style::default().fg(TEXT_DIM),
            )),
            Line::from(Span::styled(
                format!("Weight {}", card.weight_label()),
                Style::default().fg(TEXT_DIM),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }
}

impl Component<Action> for CardGrid {
    type Props<'a> = CardGridProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused || props.cards.is_empty() {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Enter => Some(Action::DetailOpen),
            code => self.step(&props, code),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.columns = Self::columns_for(area.width);
        if props.cards.is_empty() || area.height == 0 {
            return;
        }

        let columns = self.columns;
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let selected = props.selected.min(props.cards.len() - 1);
        let selected_row = selected / columns;
        if selected_row < self.scroll_row {
            self.scroll_row = selected_row;
        } else if selected_row >= self.scroll_row + visible_rows {
            self.scroll_row = selected_row + 1 - visible_rows;
        }
        let total_rows = props.cards.len().div_ceil(columns);
        self.scroll_row = self.scroll_row.min(total_rows.saturating_sub(visible_rows));

        let card_width = area.width / columns as u16;
        let first = self.scroll_row * columns;
        let last = (first + visible_rows * columns).min(props.cards.len());
        for (offset, card) in props.cards[first..last].iter().enumerate() {
            let row = (offset / columns) as u16;
            let col = (offset % columns) as u16;
            let cell = Rect {
                x: area.x + col * card_width,
                y: area.y + row * CARD_HEIGHT,
                width: card_width,
                height: CARD_HEIGHT.min(area.height.saturating_sub(row * CARD_HEIGHT)),
            };
            let highlighted = props.is_focused && first + offset == selected;
            Self::render_card(frame, cell, card, highlighted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sprites;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn card(name: &str) -> EntityDetail {
        EntityDetail {
            name: name.to_string(),
            sprites: Sprites::default(),
            types: vec!["grass".into(), "poison".into()],
            height: 7,
            weight: 69,
            abilities: Vec::new(),
            stats: Vec::new(),
        }
    }

    fn arrow(code: KeyCode) -> EventKind {
        EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn props(cards: &[EntityDetail], selected: usize) -> CardGridProps<'_> {
        CardGridProps {
            cards,
            selected,
            is_focused: true,
            on_select: Action::GridSelect,
        }
    }

    #[test]
    fn test_render_lays_out_columns() {
        let cards: Vec<_> = ["bulbasaur", "ivysaur", "venusaur"]
            .into_iter()
            .map(card)
            .collect();
        let mut grid = CardGrid::new();
        let mut render = RenderHarness::new(CARD_WIDTH * 2, CARD_HEIGHT * 2);
        let output = render.render_to_string_plain(|frame| {
            grid.render(frame, frame.area(), props(&cards, 0));
        });

        assert_eq!(grid.columns(), 2);
        assert!(output.contains("Bulbasaur"));
        assert!(output.contains("Venusaur"));
        assert!(output.contains("grass"));
        assert!(output.contains("Height 0.7m"));
        assert!(output.contains("Weight 6.9kg"));
    }

    #[test]
    fn test_navigation_uses_rendered_columns() {
        let cards: Vec<_> = (0..6).map(|i| card(&format!("mon{i}"))).collect();
        let mut grid = CardGrid::new();
        let mut render = RenderHarness::new(CARD_WIDTH * 3, CARD_HEIGHT * 2);
        render.render_to_string_plain(|frame| {
            grid.render(frame, frame.area(), props(&cards, 1));
        });

        let down: Vec<_> = grid
            .handle_event(&arrow(KeyCode::Down), props(&cards, 1))
            .into_iter()
            .collect();
        down.assert_first(Action::GridSelect(4));

        let right: Vec<_> = grid
            .handle_event(&EventKind::Key(key("l")), props(&cards, 1))
            .into_iter()
            .collect();
        right.assert_first(Action::GridSelect(2));
    }

    #[test]
    fn test_up_from_first_row_returns_to_search() {
        let cards = vec![card("mew")];
        let mut grid = CardGrid::new();
        let actions: Vec<_> = grid
            .handle_event(&arrow(KeyCode::Up), props(&cards, 0))
            .into_iter()
            .collect();
        actions.assert_first(Action::FocusSet(FocusArea::Search));
    }

    #[test]
    fn test_enter_opens_detail() {
        let cards = vec![card("mew")];
        let mut grid = CardGrid::new();
        let actions: Vec<_> = grid
            .handle_event(&arrow(KeyCode::Enter), props(&cards, 0))
            .into_iter()
            .collect();
        actions.assert_first(Action::DetailOpen);
    }

    #[test]
    fn test_render_scrolls_to_selection() {
        let cards: Vec<_> = (0..12).map(|i| card(&format!("mon{i}"))).collect();
        let mut grid = CardGrid::new();
        let mut render = RenderHarness::new(CARD_WIDTH * 2, CARD_HEIGHT * 2);
        let output = render.render_to_string_plain(|frame| {
            grid.render(frame, frame.area(), props(&cards, 10));
        });
        assert!(output.contains("Mon10"));
        assert!(!output.contains("Mon0"));
    }
}
