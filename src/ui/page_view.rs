//! Page layout onto terminal cells
//!
//! [`PageView::plan`] decides where every visible element lands. Drawing
//! and mouse hit-testing read the same plan, so a click always hits what
//! is on screen. Later items sit on top of earlier ones.

use super::components::{
    button_width, dialog_area, draw_checkbox, draw_field, hint_row, render_button, render_dialog,
    DialogConfig, FieldMark,
};
use crate::app::App;
use crate::dom::style::{is_displayed, is_fixed, SCROLL_TOP_ATTR};
use crate::dom::{Document, Element, NodeId};
use crate::state::{px_to_row, px_to_rows};
use crate::widgets::COUNT_ATTR;
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::collections::HashMap;

/// Left margin of page content
const MARGIN: u16 = 2;
/// Space between elements sharing a row
const GAP: u16 = 2;
/// Width of text controls
const INPUT_WIDTH: u16 = 48;
const DIALOG_WIDTH: u16 = 56;
const DIALOG_HINT: &str = "Esc: zavrieť";

/// How a placed element is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacedKind {
    Heading,
    Text,
    Link,
    Button,
    Input,
    TextArea,
    Checkbox,
    Feedback,
    Counter,
    Alert,
    Overlay,
    Dialog,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placed {
    pub node: NodeId,
    pub rect: Rect,
    pub kind: PlacedKind,
    pub label: String,
}

/// The open modal, drawn as a dialog box
#[derive(Debug, Clone, PartialEq)]
struct ModalBox {
    title: String,
    message: String,
}

impl ModalBox {
    fn config(&self) -> DialogConfig<'_> {
        dialog_config(&self.title, &self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageView {
    items: Vec<Placed>,
    header_rows: u16,
    dropdown: Option<Rect>,
    modal: Option<ModalBox>,
}

impl PageView {
    /// Lay out the visible part of `doc` inside `area`
    pub fn plan(doc: &Document, area: Rect, breakpoint: f64) -> Self {
        let narrow = doc.viewport.width < breakpoint;
        let mut view = Self {
            header_rows: header_rows(doc).min(area.height),
            ..Self::default()
        };
        let mut cursors: HashMap<u16, u16> = HashMap::new();
        let mut pinned = Vec::new();

        for node in doc.walk() {
            let Some(kind) = kind_of(doc, node) else {
                continue;
            };
            if !is_displayed(doc, node, breakpoint) {
                continue;
            }
            if is_fixed(doc, node) {
                pinned.push((node, kind));
                continue;
            }
            let layout = doc.layout(node);
            let Some(row) = px_to_row(layout.top - doc.viewport.scroll_y) else {
                continue;
            };
            if row < view.header_rows || row >= area.height {
                continue;
            }
            let rows = match kind {
                PlacedKind::TextArea | PlacedKind::Text => px_to_rows(layout.height),
                _ => 1,
            };
            let height = rows.min(area.height - row);
            view.place_flow(doc, &mut cursors, area, node, kind, row, height);
        }

        let mut dropdown = Vec::new();
        let mut alerts = Vec::new();
        let mut scroll_top = None;
        for (node, kind) in pinned {
            if doc.closest(node, "modal").is_some() {
                continue;
            }
            if kind == PlacedKind::Alert {
                alerts.push(node);
            } else if doc.get(node).is_some_and(|e| e.attrs.contains_key(SCROLL_TOP_ATTR)) {
                scroll_top = Some(node);
            } else if doc.closest_tag(node, "header").is_some() {
                if is_nav_toggle(doc, node) {
                    if narrow {
                        let row = px_to_row(doc.layout(node).top).unwrap_or(0);
                        view.place_right(doc, area, node, kind, row);
                    }
                } else if narrow && doc.has_class(node, "nav-link") {
                    dropdown.push((node, kind));
                } else {
                    let row = px_to_row(doc.layout(node).top).unwrap_or(0);
                    if row < view.header_rows {
                        view.place_flow(doc, &mut cursors, area, node, kind, row, 1);
                    }
                }
            }
        }

        view.place_dropdown(doc, area, dropdown);
        if let Some(node) = scroll_top {
            let row = area.height.saturating_sub(1);
            view.place_right(doc, area, node, PlacedKind::Button, row);
        }
        for (row, node) in alerts.into_iter().enumerate() {
            if row as u16 >= area.height {
                break;
            }
            view.place_right(doc, area, node, PlacedKind::Alert, row as u16);
        }
        view.place_modal(doc, area, breakpoint);
        view
    }

    pub fn items(&self) -> &[Placed] {
        &self.items
    }

    /// Rows covered by the pinned header
    pub fn header_rows(&self) -> u16 {
        self.header_rows
    }

    /// Topmost element at a screen cell
    pub fn hit(&self, column: u16, row: u16) -> Option<NodeId> {
        self.items
            .iter()
            .rev()
            .find(|placed| placed.rect.contains(Position::new(column, row)))
            .map(|placed| placed.node)
    }

    /// Where `node` was placed, if it is on screen
    pub fn find(&self, node: NodeId) -> Option<&Placed> {
        self.items.iter().rev().find(|placed| placed.node == node)
    }

    #[allow(clippy::too_many_arguments)]
    fn place_flow(
        &mut self,
        doc: &Document,
        cursors: &mut HashMap<u16, u16>,
        area: Rect,
        node: NodeId,
        kind: PlacedKind,
        row: u16,
        height: u16,
    ) {
        let label = display_text(doc, node, kind);
        let cursor = cursors.entry(row).or_insert(MARGIN);
        let x = *cursor;
        let width = item_width(&label, kind, area).min(area.width.saturating_sub(x));
        if width == 0 {
            return;
        }
        *cursor = x + width + GAP;
        self.items.push(Placed {
            node,
            rect: Rect::new(area.x + x, area.y + row, width, height),
            kind,
            label,
        });
    }

    fn place_right(&mut self, doc: &Document, area: Rect, node: NodeId, kind: PlacedKind, row: u16) {
        let label = display_text(doc, node, kind);
        let width = item_width(&label, kind, area).min(area.width);
        let x = area.width.saturating_sub(width + MARGIN);
        self.items.push(Placed {
            node,
            rect: Rect::new(area.x + x, area.y + row, width, 1),
            kind,
            label,
        });
    }

    /// Navigation links of an open narrow menu, stacked below the header
    fn place_dropdown(&mut self, doc: &Document, area: Rect, links: Vec<(NodeId, PlacedKind)>) {
        if links.is_empty() {
            return;
        }
        let labels: Vec<String> = links
            .iter()
            .map(|(node, kind)| display_text(doc, *node, *kind))
            .collect();
        let inner = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
        let width = (inner + 4).min(area.width);
        let height = (links.len() as u16 + 1).min(area.height.saturating_sub(self.header_rows));
        let x = area.width.saturating_sub(width + MARGIN);
        let top = self.header_rows;
        self.dropdown = Some(Rect::new(area.x + x, area.y + top, width, height));

        for (i, ((node, kind), label)) in links.into_iter().zip(labels).enumerate() {
            let row = top + i as u16;
            if row >= top + height {
                break;
            }
            self.items.push(Placed {
                node,
                rect: Rect::new(area.x + x + 2, area.y + row, width.saturating_sub(4), 1),
                kind,
                label,
            });
        }
    }

    /// Overlay over the whole page, then the dialog and its close controls
    fn place_modal(&mut self, doc: &Document, area: Rect, breakpoint: f64) {
        let Some(modal) = active_modal(doc, breakpoint) else {
            return;
        };
        if let Some(overlay) = doc.by_class("modal-overlay").into_iter().next() {
            self.items.push(Placed {
                node: overlay,
                rect: area,
                kind: PlacedKind::Overlay,
                label: String::new(),
            });
        }

        let mut title = String::new();
        let mut message = Vec::new();
        let mut controls = Vec::new();
        for child in doc.children(modal) {
            let Some(element) = doc.get(*child) else {
                continue;
            };
            match element.tag.as_str() {
                "h5" | "h4" | "h3" if title.is_empty() => title = element.text.clone(),
                "button" | "a" => controls.push(*child),
                _ if !element.text.is_empty() => message.push(element.text.clone()),
                _ => {}
            }
        }
        let modal_box = ModalBox {
            title,
            message: message.join("\n"),
        };
        let rect = dialog_area(area, &modal_box.config());
        self.items.push(Placed {
            node: modal,
            rect,
            kind: PlacedKind::Dialog,
            label: modal_box.title.clone(),
        });

        let row = hint_row(rect);
        let mut right = rect.x + rect.width.saturating_sub(2);
        for control in controls.into_iter().rev() {
            let label = display_text(doc, control, PlacedKind::Button);
            let width = button_width(&label).min(right.saturating_sub(rect.x));
            right = right.saturating_sub(width);
            self.items.push(Placed {
                node: control,
                rect: Rect::new(right, row, width, 1),
                kind: PlacedKind::Button,
                label,
            });
            right = right.saturating_sub(1);
        }
        self.modal = Some(modal_box);
    }
}

fn dialog_config<'a>(title: &'a str, message: &'a str) -> DialogConfig<'a> {
    DialogConfig {
        title,
        title_color: Color::Yellow,
        border_color: Color::Cyan,
        message,
        hint: Some(vec![Span::styled(DIALOG_HINT, Style::default().fg(Color::DarkGray))]),
        max_width: DIALOG_WIDTH,
    }
}

fn header_rows(doc: &Document) -> u16 {
    doc.by_tag("header")
        .into_iter()
        .next()
        .map(|header| px_to_rows(doc.layout(header).height))
        .unwrap_or(0)
}

fn is_nav_toggle(doc: &Document, node: NodeId) -> bool {
    doc.has_class(node, "dr-nav-toggle") || doc.has_class(node, "navbar-toggler")
}

/// The shown modal dialog, if any
pub fn active_modal(doc: &Document, breakpoint: f64) -> Option<NodeId> {
    doc.by_class("modal")
        .into_iter()
        .find(|modal| is_displayed(doc, *modal, breakpoint))
}

fn kind_of(doc: &Document, node: NodeId) -> Option<PlacedKind> {
    let element = doc.get(node)?;
    if element.has_class("alert") {
        return Some(PlacedKind::Alert);
    }
    if element.has_class("invalid-feedback") {
        return (!element.text.is_empty()).then_some(PlacedKind::Feedback);
    }
    if element.attrs.contains_key(COUNT_ATTR) {
        return Some(PlacedKind::Counter);
    }
    let kind = match element.tag.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" => PlacedKind::Heading,
        "p" | "span" | "label" => PlacedKind::Text,
        "div" if element.has_class("accordion-collapse") => PlacedKind::Text,
        "a" => PlacedKind::Link,
        "button" => PlacedKind::Button,
        "textarea" => PlacedKind::TextArea,
        "input" if element.is_checkbox() => PlacedKind::Checkbox,
        "input" => PlacedKind::Input,
        _ => return None,
    };
    Some(kind)
}

fn display_text(doc: &Document, node: NodeId, kind: PlacedKind) -> String {
    let text = doc.text(node);
    match kind {
        PlacedKind::Button if doc.has_class(node, "accordion-button") => {
            let marker = if doc.attr(node, "aria-expanded") == Some("true") {
                '▾'
            } else {
                '▸'
            };
            format!("{marker} {text}")
        }
        PlacedKind::Checkbox => {
            let check = if doc.is_checked(node) { "[x]" } else { "[ ]" };
            format!("{check} {text}")
        }
        _ => text.to_string(),
    }
}

fn item_width(label: &str, kind: PlacedKind, area: Rect) -> u16 {
    let text = label.chars().count() as u16;
    match kind {
        PlacedKind::Input | PlacedKind::TextArea => {
            INPUT_WIDTH.min(area.width.saturating_sub(MARGIN * 2))
        }
        PlacedKind::Button => button_width(label),
        PlacedKind::Alert => text + 4,
        _ => text,
    }
}

/// Focusable elements reachable with Tab, in document order.
/// An open dialog keeps focus inside itself.
pub fn focus_order(doc: &Document, breakpoint: f64) -> Vec<NodeId> {
    let narrow = doc.viewport.width < breakpoint;
    let scope = active_modal(doc, breakpoint).unwrap_or_else(|| doc.body());
    doc.descendants(scope)
        .into_iter()
        .filter(|node| doc.get(*node).is_some_and(Element::is_focusable))
        .filter(|node| is_displayed(doc, *node, breakpoint))
        .filter(|node| narrow || !is_nav_toggle(doc, *node))
        .collect()
}

fn mark_of(doc: &Document, node: NodeId) -> FieldMark {
    if doc.has_class(node, "is-invalid") {
        FieldMark::Invalid
    } else if doc.has_class(node, "is-valid") {
        FieldMark::Valid
    } else {
        FieldMark::Plain
    }
}

/// Draw the page into `area`
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let doc = &app.document;
    let view = PageView::plan(doc, area, app.config.nav_breakpoint);

    if view.header_rows() > 0 {
        let header = Rect {
            height: view.header_rows(),
            ..area
        };
        frame.render_widget(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
            header,
        );
    }

    for placed in view.items() {
        if let Some(dropdown) = view.dropdown {
            // The menu panel goes under its first link
            if doc.has_class(placed.node, "nav-link") && placed.rect.y == dropdown.y {
                frame.render_widget(Clear, dropdown);
                frame.render_widget(
                    Block::default()
                        .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                        .border_style(Style::default().fg(Color::DarkGray)),
                    dropdown,
                );
            }
        }
        draw_placed(frame, app, &view, placed);
    }
}

fn draw_placed(frame: &mut Frame, app: &App, view: &PageView, placed: &Placed) {
    let doc = &app.document;
    let node = placed.node;
    let is_focused = app.focus.is_focused(node);
    let rect = placed.rect;

    match placed.kind {
        PlacedKind::Heading => {
            let style = if doc.closest_tag(node, "header").is_some() {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            };
            frame.render_widget(Paragraph::new(placed.label.as_str()).style(style), rect);
        }
        PlacedKind::Text => {
            let style = if doc.closest_tag(node, "footer").is_some() {
                Style::default().fg(Color::DarkGray)
            } else if doc.has_class(node, "dr-brand") {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            frame.render_widget(
                Paragraph::new(placed.label.as_str())
                    .style(style)
                    .wrap(Wrap { trim: true }),
                rect,
            );
        }
        PlacedKind::Link => {
            let mut style = Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED);
            if doc.has_class(node, "active") {
                style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            if is_focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
            frame.render_widget(Paragraph::new(placed.label.as_str()).style(style), rect);
        }
        PlacedKind::Button => {
            render_button(frame, rect, &placed.label, is_focused, !doc.is_disabled(node));
        }
        PlacedKind::Input | PlacedKind::TextArea => {
            draw_field(frame, rect, doc.value(node), mark_of(doc, node), is_focused);
        }
        PlacedKind::Checkbox => {
            draw_checkbox(
                frame,
                rect,
                doc.text(node),
                doc.is_checked(node),
                mark_of(doc, node),
                is_focused,
            );
        }
        PlacedKind::Feedback => {
            frame.render_widget(
                Paragraph::new(placed.label.as_str()).style(Style::default().fg(Color::Red)),
                rect,
            );
        }
        PlacedKind::Counter => {
            frame.render_widget(
                Paragraph::new(placed.label.as_str())
                    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                rect,
            );
        }
        PlacedKind::Alert => {
            let bg = if doc.has_class(node, "alert-success") {
                Color::Green
            } else {
                Color::Red
            };
            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(format!("  {}  ", placed.label))
                    .style(Style::default().bg(bg).fg(Color::White)),
                rect,
            );
        }
        PlacedKind::Overlay => {
            frame
                .buffer_mut()
                .set_style(rect, Style::default().add_modifier(Modifier::DIM));
        }
        PlacedKind::Dialog => {
            if let Some(modal) = &view.modal {
                render_dialog(frame, rect, modal.config());
            }
        }
    }
}
