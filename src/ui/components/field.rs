//! Field rendering for the contact form controls

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Validation styling carried by a control's classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMark {
    Plain,
    Valid,
    Invalid,
}

impl FieldMark {
    fn color(self, is_active: bool) -> Color {
        match self {
            FieldMark::Invalid => Color::Red,
            FieldMark::Valid => Color::Green,
            FieldMark::Plain if is_active => Color::Cyan,
            FieldMark::Plain => Color::DarkGray,
        }
    }
}

/// Draw a text control. Multi-row areas show one value line per row.
pub fn draw_field(frame: &mut Frame, area: Rect, value: &str, mark: FieldMark, is_active: bool) {
    let frame_style = Style::default().fg(mark.color(is_active));
    let value_style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if is_active { "▌" } else { "" };

    let mut lines: Vec<Line> = if area.height > 1 {
        let mut lines: Vec<Line> = value
            .split('\n')
            .map(|l| {
                Line::from(vec![
                    Span::styled("│ ", frame_style),
                    Span::styled(l.to_string(), value_style),
                ])
            })
            .collect();
        // Keep the cursor line in view
        let overflow = lines.len().saturating_sub(area.height as usize);
        lines.drain(..overflow);
        lines
    } else {
        vec![Line::from(vec![
            Span::styled("[ ", frame_style),
            Span::styled(value.to_string(), value_style),
        ])]
    };

    if let Some(last) = lines.last_mut() {
        last.spans
            .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
    }
    if area.height == 1 {
        frame.render_widget(Paragraph::new(lines), area);
        let close = Rect {
            x: area.x + area.width.saturating_sub(1),
            width: 1.min(area.width),
            ..area
        };
        frame.render_widget(Paragraph::new(Span::styled("]", frame_style)), close);
        return;
    }
    while lines.len() < area.height as usize {
        lines.push(Line::from(Span::styled("│", frame_style)));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

/// Draw a checkbox as `[x] label`
pub fn draw_checkbox(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    checked: bool,
    mark: FieldMark,
    is_active: bool,
) {
    let check = if checked { "[x] " } else { "[ ] " };
    let label_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let line = Line::from(vec![
        Span::styled(check, Style::default().fg(mark.color(is_active))),
        Span::styled(label, label_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
