//! Application state and core logic

use crate::browser::TerminalBrowser;
use crate::config::SiteConfig;
use crate::dom::style::is_fixed;
use crate::dom::{Document, NodeId, ScrollBehavior, Viewport};
use crate::page::contact_page;
use crate::site::Site;
use crate::state::forms::{SubmitOutcome, SUBMITTING_LABEL};
use crate::state::{viewport_px, FocusRing, UiArea, ROW_PX};
use crate::ui::{focus_order, PageView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Instant;

/// Rows moved by one mouse wheel step
const WHEEL_ROWS: f64 = 3.0;

/// What the keyboard focus is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    TextEntry { multiline: bool },
    Checkbox,
    Activatable,
}

/// Main application struct
pub struct App {
    /// The page and everything the behaviors changed on it
    pub document: Document,
    /// Behaviors bound to the page
    pub site: Site,
    /// Connectivity switch and navigation record
    pub browser: TerminalBrowser,
    pub config: SiteConfig,
    /// Keyboard focus
    pub focus: FocusRing,
    /// Whether the app should quit
    quit: bool,
    /// Last status message
    pub status_message: Option<String>,
    /// Terminal size (height, width)
    pub terminal_size: (u16, u16),
}

impl App {
    /// Create a new App for a terminal `(height, width)` cells large
    pub fn new(config: SiteConfig, terminal_size: (u16, u16), now: Instant) -> Self {
        let (height, width) = terminal_size;
        let (viewport_width, viewport_height) = viewport_px(width, height);
        let mut document = contact_page(Viewport::new(viewport_width, viewport_height));
        let site = Site::init(&mut document, &config, now);

        Self {
            document,
            site,
            browser: TerminalBrowser::new(),
            config,
            focus: FocusRing::new(),
            quit: false,
            status_message: None,
            terminal_size,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Screen area the page is drawn in
    pub fn page_area(&self) -> Rect {
        let (height, width) = self.terminal_size;
        Rect::new(0, 0, width, UiArea::page_height(height))
    }

    /// Lay out the page as it is drawn right now
    pub fn page_view(&self) -> PageView {
        PageView::plan(&self.document, self.page_area(), self.config.nav_breakpoint)
    }

    /// Whether the page was left for the confirmation location
    pub fn has_navigated(&self) -> bool {
        self.browser.location().is_some()
    }

    /// Terminal was resized to `(height, width)` cells
    pub fn resize(&mut self, terminal_size: (u16, u16), now: Instant) {
        if terminal_size == self.terminal_size {
            return;
        }
        self.terminal_size = terminal_size;
        let (height, width) = terminal_size;
        let (viewport_width, viewport_height) = viewport_px(width, height);
        self.document.viewport.width = viewport_width;
        self.document.viewport.height = viewport_height;
        // Re-clamp into the new scroll range
        let scroll_y = self.document.viewport.scroll_y;
        self.document.scroll_to(scroll_y, ScrollBehavior::Instant, now);
        self.site.scrolled(&mut self.document, now);
        tracing::debug!(width = viewport_width, height = viewport_height, "Viewport resized");
    }

    /// Drive timers. Records the submission result when one settles.
    pub fn tick(&mut self, now: Instant) {
        if let Some(result) = self.site.tick(&mut self.document, &mut self.browser, now) {
            self.status_message = Some(match result {
                Ok(()) => "Správa odoslaná".to_string(),
                Err(err) => err.to_string(),
            });
        }
        let order = focus_order(&self.document, self.config.nav_breakpoint);
        self.focus.retain(&order);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        // Clear any status messages on key press
        self.status_message = None;

        if key.code == KeyCode::F(2) {
            let online = self.browser.toggle_online();
            self.status_message = Some(if online { "Online" } else { "Offline" }.to_string());
            return;
        }
        if self.has_navigated() {
            return;
        }

        match key.code {
            KeyCode::Tab => self.move_focus(true, now),
            KeyCode::BackTab => self.move_focus(false, now),
            KeyCode::Esc => {
                if !self.site.escape(&mut self.document) {
                    self.blur_focused();
                }
                self.tick_focus();
            }
            KeyCode::Up => self.scroll_rows(-1.0, now),
            KeyCode::Down => self.scroll_rows(1.0, now),
            KeyCode::PageUp => self.scroll_pages(-1.0, now),
            KeyCode::PageDown => self.scroll_pages(1.0, now),
            KeyCode::Home => self.scroll_by(f64::MIN, now),
            KeyCode::End => self.scroll_by(f64::MAX, now),
            KeyCode::Enter => self.enter(now),
            KeyCode::Backspace => {
                if let Some((node, Control::TextEntry { .. })) = self.focused_control() {
                    let mut value = self.document.value(node).to_string();
                    value.pop();
                    self.edit(node, value);
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                match self.focused_control() {
                    Some((node, Control::TextEntry { .. })) => {
                        let mut value = self.document.value(node).to_string();
                        value.push(c);
                        self.edit(node, value);
                    }
                    Some((node, Control::Checkbox)) if c == ' ' => self.toggle_checkbox(node, now),
                    Some((node, Control::Activatable)) if c == ' ' => self.activate(node, now),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.has_navigated() {
            return;
        }
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_rows(-WHEEL_ROWS, now),
            MouseEventKind::ScrollDown => self.scroll_rows(WHEEL_ROWS, now),
            MouseEventKind::Down(MouseButton::Left) => {
                self.status_message = None;
                let (height, _) = self.terminal_size;
                if UiArea::at_row(mouse.row, height) == UiArea::StatusBar {
                    return;
                }
                let target = self
                    .page_view()
                    .hit(mouse.column, mouse.row)
                    .unwrap_or_else(|| self.document.body());
                self.click(target, now);
            }
            _ => {}
        }
    }

    /// Pointer click on `target`: focus moves there first, then the click fires
    fn click(&mut self, target: NodeId, now: Instant) {
        let focusable = self
            .document
            .get(target)
            .is_some_and(|element| element.is_focusable());
        if self.focus.current() != Some(target) {
            self.blur_focused();
            if focusable {
                self.focus.set(target);
            }
        }
        match self.control(target) {
            Some(Control::Checkbox) => self.toggle_checkbox(target, now),
            _ => self.activate(target, now),
        }
    }

    fn activate(&mut self, target: NodeId, now: Instant) {
        self.site.click(&mut self.document, target, now);
        if let Some(form) = self.site.form() {
            if form.submit_button() == Some(target) && form.phase().is_submitting() {
                self.status_message = Some(SUBMITTING_LABEL.to_string());
            }
        }
        self.tick_focus();
    }

    fn toggle_checkbox(&mut self, node: NodeId, now: Instant) {
        let checked = self.document.is_checked(node);
        self.document.set_checked(node, !checked);
        self.site.click(&mut self.document, node, now);
        self.site.input(&mut self.document, node);
    }

    fn enter(&mut self, now: Instant) {
        match self.focused_control() {
            Some((node, Control::TextEntry { multiline: true })) => {
                let mut value = self.document.value(node).to_string();
                value.push('\n');
                self.edit(node, value);
            }
            Some((node, Control::TextEntry { multiline: false } | Control::Checkbox)) => {
                if let Some(outcome) = self.site.submit_from(&mut self.document, node, now) {
                    self.status_message = match outcome {
                        SubmitOutcome::Started => Some(SUBMITTING_LABEL.to_string()),
                        SubmitOutcome::Rejected | SubmitOutcome::Ignored => None,
                    };
                }
            }
            Some((node, Control::Activatable)) => self.activate(node, now),
            None => {}
        }
    }

    fn edit(&mut self, node: NodeId, value: String) {
        self.document.set_value(node, value);
        self.site.input(&mut self.document, node);
    }

    fn blur_focused(&mut self) {
        if let Some(node) = self.focus.current() {
            self.focus.clear();
            self.site.blur(&mut self.document, node);
        }
    }

    fn move_focus(&mut self, forward: bool, now: Instant) {
        let order = focus_order(&self.document, self.config.nav_breakpoint);
        let previous = if forward {
            self.focus.next(&order)
        } else {
            self.focus.prev(&order)
        };
        if let Some(node) = previous.filter(|node| Some(*node) != self.focus.current()) {
            self.site.blur(&mut self.document, node);
        }
        if let Some(node) = self.focus.current() {
            self.scroll_into_view(node, now);
        }
    }

    /// Drop focus from elements that are no longer reachable
    fn tick_focus(&mut self) {
        let order = focus_order(&self.document, self.config.nav_breakpoint);
        self.focus.retain(&order);
    }

    fn control(&self, node: NodeId) -> Option<Control> {
        let element = self.document.get(node)?;
        if element.is_checkbox() {
            Some(Control::Checkbox)
        } else if element.is_text_entry() {
            Some(Control::TextEntry {
                multiline: element.tag == "textarea",
            })
        } else if element.is_focusable() {
            Some(Control::Activatable)
        } else {
            None
        }
    }

    fn focused_control(&self) -> Option<(NodeId, Control)> {
        let node = self.focus.current()?;
        self.control(node).map(|control| (node, control))
    }

    /// Bring a page-flow element below the pinned header
    fn scroll_into_view(&mut self, node: NodeId, now: Instant) {
        if is_fixed(&self.document, node) {
            return;
        }
        let layout = self.document.layout(node);
        let viewport = &self.document.viewport;
        let visible_top = viewport.scroll_y + self.config.header_height;
        if layout.top >= visible_top && layout.bottom() <= viewport.bottom() {
            return;
        }
        let target = layout.top - self.config.header_height - ROW_PX;
        self.document.scroll_to(target, ScrollBehavior::Instant, now);
        self.site.scrolled(&mut self.document, now);
    }

    fn scroll_rows(&mut self, rows: f64, now: Instant) {
        self.scroll_by(rows * ROW_PX, now);
    }

    fn scroll_pages(&mut self, pages: f64, now: Instant) {
        let page = (self.document.viewport.height - self.config.header_height).max(ROW_PX);
        self.scroll_by(pages * page, now);
    }

    fn scroll_by(&mut self, delta: f64, now: Instant) {
        if self.document.scroll_by(delta) {
            self.site.scrolled(&mut self.document, now);
        }
    }
}
