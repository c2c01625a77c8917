//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

/// Columns a button needs for `content`
pub fn button_width(content: &str) -> u16 {
    (content.chars().count() + 4) as u16
}

/// Render a single-row button as `[ content ]`
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
) {
    let text_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let paragraph = Paragraph::new(format!("[ {content} ]")).style(text_style);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_width_counts_characters() {
        assert_eq!(button_width("Odoslať"), 11);
        assert_eq!(button_width(""), 4);
    }
}
