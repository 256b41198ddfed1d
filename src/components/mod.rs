pub mod card_grid;
pub mod detail_modal;
pub mod results_view;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card_grid::{CardGrid, CardGridProps, CARD_HEIGHT, CARD_WIDTH};
pub use detail_modal::{DetailModal, DetailModalProps};
pub use results_view::{ResultsView, ResultsViewProps};
pub use search_bar::{SearchBar, SearchBarProps};

use ratatui::style::Color;

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_BLUE: Color = Color::Rgb(59, 76, 202);
pub const ACCENT_GOLD: Color = Color::Rgb(255, 203, 5);
pub const ACCENT_RED: Color = Color::Rgb(255, 98, 98);

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick % SPINNER_FRAMES.len() as u64) as usize]
}

/// `mr-mime` -> `Mr Mime`
pub fn format_name(name: &str) -> String {
    name.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_name() {
        assert_eq!(format_name("pikachu"), "Pikachu");
        assert_eq!(format_name("mr-mime"), "Mr Mime");
        assert_eq!(format_name("special-attack"), "Special Attack");
    }

    #[test]
    fn test_spinner_wraps() {
        assert_eq!(spinner_frame(0), spinner_frame(10));
    }
}
