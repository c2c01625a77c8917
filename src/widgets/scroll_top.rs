//! Scroll-to-top control

use crate::dom::style::SCROLL_TOP_ATTR;
use crate::dom::{Document, NodeId, ScrollBehavior};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct ScrollToTop {
    button: NodeId,
    threshold: f64,
}

impl ScrollToTop {
    pub fn bind(doc: &Document, threshold: f64) -> Option<Self> {
        let button = doc.with_attr(SCROLL_TOP_ATTR).into_iter().next()?;
        Some(Self { button, threshold })
    }

    pub fn button(&self) -> NodeId {
        self.button
    }

    /// Show the control once the page is scrolled past the threshold
    pub fn update(&self, doc: &mut Document) {
        let visible = doc.viewport.scroll_y > self.threshold;
        doc.set_class(self.button, "visible", visible);
    }

    /// Click on `target`. Returns true if it hit the control.
    pub fn click(&self, doc: &mut Document, target: NodeId, now: Instant) -> bool {
        if !doc.contains(self.button, target) {
            return false;
        }
        doc.scroll_to(0.0, ScrollBehavior::Smooth, now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Viewport};
    use std::time::Duration;

    fn page() -> (Document, NodeId) {
        let mut doc = Document::new(Viewport::new(1024.0, 400.0));
        let body = doc.body();
        doc.append(body, Element::new("main").at(0.0, 3000.0));
        let button = doc.append(body, Element::new("button").attr(SCROLL_TOP_ATTR, ""));
        (doc, button)
    }

    #[test]
    fn test_visibility_follows_threshold() {
        let (mut doc, button) = page();
        let control = ScrollToTop::bind(&doc, 300.0).unwrap();
        let now = Instant::now();

        doc.scroll_to(300.0, ScrollBehavior::Instant, now);
        control.update(&mut doc);
        assert!(!doc.has_class(button, "visible"));

        doc.scroll_to(301.0, ScrollBehavior::Instant, now);
        control.update(&mut doc);
        assert!(doc.has_class(button, "visible"));

        doc.scroll_to(120.0, ScrollBehavior::Instant, now);
        control.update(&mut doc);
        assert!(!doc.has_class(button, "visible"));
    }

    #[test]
    fn test_click_scrolls_to_top() {
        let (mut doc, button) = page();
        let control = ScrollToTop::bind(&doc, 300.0).unwrap();
        let now = Instant::now();
        doc.scroll_to(1500.0, ScrollBehavior::Instant, now);

        assert!(control.click(&mut doc, button, now));
        doc.advance(now + Duration::from_secs(1));
        assert_eq!(doc.viewport.scroll_y, 0.0);
    }

    #[test]
    fn test_missing_control_binds_nothing() {
        let doc = Document::new(Viewport::new(1024.0, 400.0));
        assert!(ScrollToTop::bind(&doc, 300.0).is_none());
    }
}
