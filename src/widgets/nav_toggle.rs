//! Collapsible navigation panel

use crate::dom::{Document, NodeId, SCROLL_LOCK_CLASS};

/// Class names of one navigation markup flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NavMarkup {
    toggle: &'static str,
    panel: &'static str,
    open: &'static str,
    active: Option<&'static str>,
    /// Whether an open panel locks page scrolling
    lock_scroll: bool,
}

const HEADER_MARKUP: NavMarkup = NavMarkup {
    toggle: "dr-nav-toggle",
    panel: "dr-nav-panel",
    open: "dr-nav-panel-open",
    active: Some("dr-nav-toggle-active"),
    lock_scroll: false,
};

const NAVBAR_MARKUP: NavMarkup = NavMarkup {
    toggle: "navbar-toggler",
    panel: "navbar-collapse",
    open: "show",
    active: None,
    lock_scroll: true,
};

#[derive(Debug, Clone)]
pub struct NavToggle {
    toggle: NodeId,
    panel: NodeId,
    markup: NavMarkup,
    breakpoint: f64,
}

impl NavToggle {
    /// Bind to the header navigation, falling back to the navbar markup
    pub fn bind(doc: &Document, breakpoint: f64) -> Option<Self> {
        for markup in [HEADER_MARKUP, NAVBAR_MARKUP] {
            let toggle = doc.by_class(markup.toggle).into_iter().next();
            let panel = doc.by_class(markup.panel).into_iter().next();
            if let (Some(toggle), Some(panel)) = (toggle, panel) {
                tracing::debug!("Navigation toggle bound to .{}", markup.toggle);
                return Some(Self {
                    toggle,
                    panel,
                    markup,
                    breakpoint,
                });
            }
        }
        tracing::debug!("No navigation toggle found");
        None
    }

    pub fn toggle_node(&self) -> NodeId {
        self.toggle
    }

    pub fn panel(&self) -> NodeId {
        self.panel
    }

    pub fn is_open(&self, doc: &Document) -> bool {
        doc.has_class(self.panel, self.markup.open)
    }

    fn set_open(&self, doc: &mut Document, open: bool) {
        doc.set_class(self.panel, self.markup.open, open);
        if let Some(active) = self.markup.active {
            doc.set_class(self.toggle, active, open);
        }
        doc.set_attr(self.toggle, "aria-expanded", open.to_string());
        doc.set_attr(self.panel, "aria-hidden", (!open).to_string());
        if self.markup.lock_scroll {
            let body = doc.body();
            doc.set_class(body, SCROLL_LOCK_CLASS, open);
        }
    }

    /// Flip the panel. Returns the new open state.
    pub fn toggle(&self, doc: &mut Document) -> bool {
        let open = !self.is_open(doc);
        self.set_open(doc, open);
        open
    }

    pub fn close(&self, doc: &mut Document) {
        if self.is_open(doc) {
            self.set_open(doc, false);
        }
    }

    /// Click anywhere on the page. Returns true when the toggle itself was hit.
    pub fn click(&self, doc: &mut Document, target: NodeId) -> bool {
        if doc.contains(self.toggle, target) {
            self.toggle(doc);
            return true;
        }

        if doc.viewport.width >= self.breakpoint || !self.is_open(doc) {
            return false;
        }
        let on_link = doc.closest(target, "nav-link").is_some();
        let outside = !doc.contains(self.panel, target);
        if on_link || outside {
            self.close(doc);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Viewport};
    use pretty_assertions::assert_eq;

    struct Fixture {
        doc: Document,
        toggle: NodeId,
        panel: NodeId,
        link: NodeId,
        content: NodeId,
    }

    fn header(width: f64) -> Fixture {
        let mut doc = Document::new(Viewport::new(width, 600.0));
        let body = doc.body();
        let header = doc.append(body, Element::new("header").class("dr-header").at(0.0, 72.0));
        let toggle = doc.append(
            header,
            Element::new("button")
                .class("dr-nav-toggle")
                .attr("aria-expanded", "false")
                .at(20.0, 30.0),
        );
        let panel = doc.append(header, Element::new("nav").class("dr-nav-panel").at(72.0, 200.0));
        let link = doc.append(
            panel,
            Element::new("a").class("nav-link").attr("href", "#sluzby").at(80.0, 20.0),
        );
        let content = doc.append(body, Element::new("section").with_id("sluzby").at(300.0, 500.0));
        Fixture {
            doc,
            toggle,
            panel,
            link,
            content,
        }
    }

    #[test]
    fn test_bind_requires_toggle_and_panel() {
        let doc = Document::new(Viewport::new(1024.0, 600.0));
        assert!(NavToggle::bind(&doc, 768.0).is_none());

        let mut doc = Document::new(Viewport::new(1024.0, 600.0));
        let body = doc.body();
        doc.append(body, Element::new("button").class("dr-nav-toggle"));
        assert!(NavToggle::bind(&doc, 768.0).is_none());
    }

    #[test]
    fn test_toggle_mirrors_aria_and_classes() {
        let Fixture {
            mut doc,
            toggle,
            panel,
            ..
        } = header(1024.0);
        let nav = NavToggle::bind(&doc, 768.0).unwrap();

        assert!(nav.click(&mut doc, toggle));
        assert!(doc.has_class(panel, "dr-nav-panel-open"));
        assert!(doc.has_class(toggle, "dr-nav-toggle-active"));
        assert_eq!(doc.attr(toggle, "aria-expanded"), Some("true"));
        assert_eq!(doc.attr(panel, "aria-hidden"), Some("false"));

        assert!(nav.click(&mut doc, toggle));
        assert!(!doc.has_class(panel, "dr-nav-panel-open"));
        assert!(!doc.has_class(toggle, "dr-nav-toggle-active"));
        assert_eq!(doc.attr(toggle, "aria-expanded"), Some("false"));
        assert_eq!(doc.attr(panel, "aria-hidden"), Some("true"));
    }

    #[test]
    fn test_narrow_link_click_closes() {
        let Fixture {
            mut doc,
            toggle,
            link,
            ..
        } = header(480.0);
        let nav = NavToggle::bind(&doc, 768.0).unwrap();
        nav.click(&mut doc, toggle);

        assert!(!nav.click(&mut doc, link));
        assert!(!nav.is_open(&doc));
    }

    #[test]
    fn test_narrow_outside_click_closes() {
        let Fixture {
            mut doc,
            toggle,
            panel,
            content,
            ..
        } = header(480.0);
        let nav = NavToggle::bind(&doc, 768.0).unwrap();
        nav.click(&mut doc, toggle);

        nav.click(&mut doc, panel);
        assert!(nav.is_open(&doc));
        nav.click(&mut doc, content);
        assert!(!nav.is_open(&doc));
    }

    #[test]
    fn test_wide_clicks_leave_panel_open() {
        let Fixture {
            mut doc,
            toggle,
            link,
            content,
            ..
        } = header(1024.0);
        let nav = NavToggle::bind(&doc, 768.0).unwrap();
        nav.click(&mut doc, toggle);

        nav.click(&mut doc, link);
        nav.click(&mut doc, content);
        assert!(nav.is_open(&doc));
    }

    #[test]
    fn test_falls_back_to_navbar_markup() {
        let mut doc = Document::new(Viewport::new(1024.0, 600.0));
        let body = doc.body();
        let toggler = doc.append(body, Element::new("button").class("navbar-toggler"));
        let collapse = doc.append(body, Element::new("div").class("navbar-collapse"));
        let nav = NavToggle::bind(&doc, 768.0).unwrap();

        assert_eq!(nav.toggle_node(), toggler);
        nav.click(&mut doc, toggler);
        assert!(doc.has_class(collapse, "show"));
        assert_eq!(doc.attr(toggler, "aria-expanded"), Some("true"));
    }

    #[test]
    fn test_navbar_panel_locks_scrolling_while_open() {
        let mut doc = Document::new(Viewport::new(480.0, 600.0));
        let body = doc.body();
        let toggler = doc.append(body, Element::new("button").class("navbar-toggler"));
        doc.append(body, Element::new("div").class("navbar-collapse"));
        let content = doc.append(body, Element::new("section").at(300.0, 500.0));
        let nav = NavToggle::bind(&doc, 768.0).unwrap();

        nav.click(&mut doc, toggler);
        assert!(doc.is_scroll_locked());
        nav.click(&mut doc, content);
        assert!(!doc.is_scroll_locked());
    }

    #[test]
    fn test_header_panel_leaves_scrolling_alone() {
        let Fixture {
            mut doc, toggle, ..
        } = header(480.0);
        let nav = NavToggle::bind(&doc, 768.0).unwrap();

        nav.click(&mut doc, toggle);
        assert!(nav.is_open(&doc));
        assert!(!doc.is_scroll_locked());
    }
}
