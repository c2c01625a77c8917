//! Status bar on the last terminal row

use crate::app::App;
use crate::browser::Browser;
use crate::state::forms::SubmitPhase;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const PAGE_HINTS: &str = "Tab:ďalší  ↑↓/PgUp/PgDn:posun  Enter/Space:aktivovať  Esc:zavrieť  F2:sieť";
const CONFIRMATION_HINTS: &str = "F2:sieť";

/// Scroll position as a percentage of the scrollable range
pub fn scroll_percent(scroll_y: f64, max_scroll: f64) -> u16 {
    if max_scroll <= 0.0 {
        return 100;
    }
    ((scroll_y / max_scroll) * 100.0).round().clamp(0.0, 100.0) as u16
}

pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Connection status
    let conn_status = if app.browser.is_online() {
        Span::styled(" ● online ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ offline ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    if app.has_navigated() {
        spans.push(Span::styled(CONFIRMATION_HINTS, Style::default().fg(Color::Gray)));
    } else {
        let doc = &app.document;
        spans.push(Span::styled(
            format!("{:>3}% ", scroll_percent(doc.viewport.scroll_y, doc.max_scroll())),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::styled(PAGE_HINTS, Style::default().fg(Color::Gray)));
    }

    if let Some(form) = app.site.form() {
        if form.phase().is_submitting() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("⏳", Style::default().fg(Color::Yellow)));
        } else if form.phase() == SubmitPhase::Submitted {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("✓", Style::default().fg(Color::Green)));
        }
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    // Quit hint on the right
    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(status, status_area);

    let quit_width = quit_hint.chars().count() as u16;
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_width),
        y: area.height.saturating_sub(1),
        width: quit_width.min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}
