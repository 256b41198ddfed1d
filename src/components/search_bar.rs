//! Search bar input with pending marker

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, ACCENT_GOLD, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::FocusArea;

const PLACEHOLDER: &str = "Search for a Pokemon...";

pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub value: &'a str,
    pub is_focused: bool,
    /// Typed text has not settled into a query yet
    pub pending: bool,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        placeholder_style: Some(Style::default().fg(TEXT_DIM)),
        cursor_style: None,
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

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

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Vec::new();
        }

        match key.code {
            KeyCode::Esc => return vec![Action::SearchClear],
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                return vec![Action::FocusSet(FocusArea::Grid)]
            }
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.value,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: input_style(),
            on_change: Action::SearchInput,
            on_submit: |_| Action::FocusSet(FocusArea::Grid),
            on_cursor_move: Some(|_| Action::UiRender),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let border = if props.is_focused {
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        let mut title = vec![Span::styled(" 🔍 Search ", border)];
        if props.pending {
            title.push(Span::styled("… ", Style::default().fg(TEXT_DIM)));
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
            .title(Line::from(title));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let input_props = TextInputProps {
            value: props.value,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: Action::SearchInput,
            on_submit: |_| Action::FocusSet(FocusArea::Grid),
            on_cursor_move: Some(|_| Action::UiRender),
        };
        self.input.render(frame, inner, input_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::testing::*;

    fn props(value: &str, is_focused: bool) -> SearchBarProps<'_> {
        SearchBarProps {
            value,
            is_focused,
            pending: false,
        }
    }

    #[test]
    fn test_typing_emits_input() {
        let mut bar = SearchBar::new();
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("p")), props("", true))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchInput("p".into()));
    }

    #[test]
    fn test_escape_clears() {
        let mut bar = SearchBar::new();
        let esc = EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let actions: Vec<_> = bar
            .handle_event(&esc, props("pika", true))
            .into_iter()
            .collect();
        actions.assert_first(Action::SearchClear);
    }

    #[test]
    fn test_down_moves_to_grid() {
        let mut bar = SearchBar::new();
        let down = EventKind::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        let actions: Vec<_> = bar
            .handle_event(&down, props("pika", true))
            .into_iter()
            .collect();
        actions.assert_first(Action::FocusSet(FocusArea::Grid));
    }

    #[test]
    fn test_unfocused_ignores() {
        let mut bar = SearchBar::new();
        let actions: Vec<_> = bar
            .handle_event(&EventKind::Key(key("p")), props("", false))
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_placeholder() {
        let mut render = RenderHarness::new(40, 3);
        let mut bar = SearchBar::new();
        let output = render.render_to_string_plain(|frame| {
            bar.render(frame, frame.area(), props("", true));
        });
        assert!(output.contains("Search"));
    }
}
