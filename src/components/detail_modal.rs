//! Detail overlay for the selected entity

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, BorderStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::{format_name, Component, ACCENT_BLUE, ACCENT_GOLD, BG_PANEL, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::state::{BaseStat, EntityDetail};

const MODAL_WIDTH: u16 = 56;
const MODAL_HEIGHT: u16 = 22;
const STAT_BAR_WIDTH: usize = 20;
/// Stat value that fills the whole bar.
const STAT_BAR_MAX: u16 = 255;

pub struct DetailModalProps<'a> {
    pub entity: &'a EntityDetail,
    pub is_focused: bool,
}

pub struct DetailModal {
    modal: Modal,
}

impl Default for DetailModal {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl DetailModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(area: Rect) -> Rect {
        centered_rect(
            MODAL_WIDTH.min(area.width),
            MODAL_HEIGHT.min(area.height),
            area,
        )
    }
}

fn modal_style() -> ModalStyle {
    ModalStyle {
        dim_factor: 0.6,
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_GOLD)),
            }),
            padding: Padding::all(1),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
    }
}

fn detail_close() -> Action {
    Action::DetailClose
}

fn stat_bar(stat: &BaseStat) -> Line<'static> {
    let filled = (stat.value.min(STAT_BAR_MAX) as usize * STAT_BAR_WIDTH)
        .div_ceil(STAT_BAR_MAX as usize);
    Line::from(vec![
        Span::styled(
            format!("{:<16}", format_name(&stat.name)),
            Style::default().fg(TEXT_DIM),
        ),
        Span::raw(format!("{:>3} ", stat.value)),
        Span::styled("█".repeat(filled), Style::default().fg(ACCENT_BLUE)),
        Span::styled(
            "░".repeat(STAT_BAR_WIDTH - filled),
            Style::default().fg(TEXT_DIM),
        ),
    ])
}

fn detail_lines(entity: &EntityDetail) -> Vec<Line<'static>> {
    let label = Style::default().fg(ACCENT_GOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Types  ", label),
            Span::raw(
                entity
                    .types
                    .iter()
                    .map(|kind| format_name(kind))
                    .collect::<Vec<_>>()
                    .join(" / "),
            ),
        ]),
        Line::from(vec![
            Span::styled("Height ", label),
            Span::raw(entity.height_label()),
            Span::styled("   Weight ", label),
            Span::raw(entity.weight_label()),
        ]),
    ];
    if !entity.abilities.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Abilities ", label),
            Span::raw(
                entity
                    .abilities
                    .iter()
                    .map(|ability| format_name(ability))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        ]));
    }
    let sprites = entity.sprites.available();
    if !sprites.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Sprites ", label),
            Span::styled(sprites.join(", "), Style::default().fg(TEXT_DIM)),
        ]));
    }
    if !entity.stats.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Base Stats", label)));
        lines.extend(entity.stats.iter().map(stat_bar));
    }
    lines
}

impl Component<Action> for DetailModal {
    type Props<'a> = DetailModalProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('x') => Some(Action::DetailClose),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let entity = props.entity;
        let modal_area = Self::area(area);
        let mut render_content = |frame: &mut Frame, inner: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

            let header = Layout::horizontal([Constraint::Min(1), Constraint::Length(5)])
                .split(chunks[0]);
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format_name(&entity.name),
                    Style::default()
                        .fg(ACCENT_GOLD)
                        .add_modifier(Modifier::BOLD),
                ))),
                header[0],
            );
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "[ × ]",
                    Style::default().fg(ACCENT_GOLD),
                )))
                .alignment(Alignment::Right),
                header[1],
            );

            frame.render_widget(
                Paragraph::new(detail_lines(entity)).wrap(Wrap { trim: false }),
                chunks[2],
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: modal_style(),
                behavior: ModalBehavior {
                    close_on_esc: true,
                    close_on_backdrop: false,
                },
                on_close: detail_close,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Sprites;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn pikachu() -> EntityDetail {
        EntityDetail {
            name: "pikachu".into(),
            sprites: Sprites {
                front_default: Some("f".into()),
                ..Default::default()
            },
            types: vec!["electric".into()],
            height: 4,
            weight: 60,
            abilities: vec!["static".into(), "lightning-rod".into()],
            stats: vec![
                BaseStat {
                    name: "hp".into(),
                    value: 35,
                },
                BaseStat {
                    name: "speed".into(),
                    value: 90,
                },
            ],
        }
    }

    #[test]
    fn test_close_keys() {
        let entity = pikachu();
        let mut modal = DetailModal::new();
        for code in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('x')] {
            let event = EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE));
            let actions: Vec<_> = modal
                .handle_event(
                    &event,
                    DetailModalProps {
                        entity: &entity,
                        is_focused: true,
                    },
                )
                .into_iter()
                .collect();
            actions.assert_first(Action::DetailClose);
        }
    }

    #[test]
    fn test_other_keys_are_swallowed() {
        let entity = pikachu();
        let mut modal = DetailModal::new();
        let actions: Vec<_> = modal
            .handle_event(
                &EventKind::Key(key("q")),
                DetailModalProps {
                    entity: &entity,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }

    #[test]
    fn test_render_shows_record() {
        let entity = pikachu();
        let mut modal = DetailModal::new();
        let mut render = RenderHarness::new(70, 26);
        let output = render.render_to_string_plain(|frame| {
            modal.render(
                frame,
                frame.area(),
                DetailModalProps {
                    entity: &entity,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains("Pikachu"));
        assert!(output.contains("Electric"));
        assert!(output.contains("0.4m"));
        assert!(output.contains("Lightning Rod"));
        assert!(output.contains("Speed"));
        assert!(output.contains("front"));
    }
}
