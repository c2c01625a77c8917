//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Padding inside the borders, 2 chars on each side
const PADDING: u16 = 4;

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    /// Dialog title
    pub title: &'a str,
    /// Title color
    pub title_color: Color,
    /// Border color
    pub border_color: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Hint text shown at the bottom (e.g., "Esc: close")
    pub hint: Option<Vec<Span<'a>>>,
    /// Maximum width of the dialog
    pub max_width: u16,
}

impl Default for DialogConfig<'_> {
    fn default() -> Self {
        Self {
            title: "Dialog",
            title_color: Color::White,
            border_color: Color::White,
            message: "",
            hint: None,
            max_width: 60,
        }
    }
}

impl DialogConfig<'_> {
    fn wrapped_message(&self) -> Vec<String> {
        wrap_text(self.message, self.max_width.saturating_sub(PADDING + 2) as usize)
    }
}

/// Centered area a dialog occupies inside `bounds`
pub fn dialog_area(bounds: Rect, config: &DialogConfig) -> Rect {
    let wrapped_lines = config.wrapped_message();

    let content_width = wrapped_lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(config.title.chars().count()) as u16;
    let dialog_width = (content_width + PADDING + 2)
        .min(config.max_width)
        .min(bounds.width);

    // Height: title + blank + message lines + blank (if hint) + hint + borders
    let hint_lines = if config.hint.is_some() { 2 } else { 0 };
    let dialog_height = (2 + wrapped_lines.len() as u16 + hint_lines + 2)
        .max(5)
        .min(bounds.height);

    Rect {
        x: bounds.x + (bounds.width.saturating_sub(dialog_width)) / 2,
        y: bounds.y + (bounds.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width,
        height: dialog_height,
    }
}

/// Row of the hint line inside a dialog drawn at `area`
pub fn hint_row(area: Rect) -> u16 {
    area.y + area.height.saturating_sub(2)
}

/// Render a dialog into `area`, as computed by [`dialog_area`]
pub fn render_dialog(frame: &mut Frame, area: Rect, config: DialogConfig) {
    let wrapped_lines = config.wrapped_message();

    // Clear the area behind the dialog
    frame.render_widget(Clear, area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for line in wrapped_lines {
        content.push(Line::from(line));
    }

    if let Some(hint_spans) = config.hint {
        content.push(Line::from(""));
        content.push(Line::from(hint_spans));
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.border_color))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, area);
}

/// Wrap text to fit within a maximum width
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_width = current_line.chars().count();
            if current_width + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wrap_text_counts_characters() {
        assert_eq!(
            wrap_text("Zavolajte nám na číslo", 12),
            vec!["Zavolajte", "nám na číslo"]
        );
        assert_eq!(wrap_text("", 10), vec![String::new()]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_dialog_area_is_centered_with_hint_rows() {
        let bounds = Rect::new(0, 0, 80, 24);
        let config = DialogConfig {
            title: "Ponuka",
            message: "Krátka správa",
            hint: Some(vec![Span::raw("Esc")]),
            ..Default::default()
        };
        let area = dialog_area(bounds, &config);
        // title + blank + 1 line + blank + hint + 2 borders
        assert_eq!(area.height, 7);
        assert_eq!(area.width, 13 + PADDING + 2);
        assert_eq!(area.x, (80 - area.width) / 2);
        assert_eq!(area.y, (24 - 7) / 2);
        assert_eq!(hint_row(area), area.y + 5);
    }

    #[test]
    fn test_dialog_area_fits_small_bounds() {
        let bounds = Rect::new(0, 0, 10, 4);
        let config = DialogConfig {
            message: "Veľmi dlhá správa, ktorá sa nezmestí",
            ..Default::default()
        };
        let area = dialog_area(bounds, &config);
        assert!(area.width <= 10);
        assert!(area.height <= 4);
    }
}
