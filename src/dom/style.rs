//! Presentation rules standing in for the site stylesheet
//!
//! Only the rules that decide whether an element is shown at all and
//! whether it is pinned to the viewport are modelled.

use super::{Document, NodeId};

/// Attribute marking the scroll-to-top control
pub const SCROLL_TOP_ATTR: &str = "data-scroll-top";

/// Whether `node` is displayed given the current viewport width.
///
/// Hidden when the node or an ancestor is a collapsed accordion panel, a
/// closed modal, a hidden scroll-to-top control, or a closed navigation
/// panel on a narrow viewport.
pub fn is_displayed(doc: &Document, node: NodeId, breakpoint: f64) -> bool {
    if !doc.is_attached(node) {
        return false;
    }
    let narrow = doc.viewport.width < breakpoint;
    let mut current = Some(node);
    while let Some(candidate) = current {
        let Some(element) = doc.get(candidate) else {
            return false;
        };
        if element.has_class("accordion-collapse") && !element.has_class("show") {
            return false;
        }
        if element.has_class("modal") && !element.has_class("show") {
            return false;
        }
        if element.attrs.contains_key(SCROLL_TOP_ATTR) && !element.has_class("visible") {
            return false;
        }
        if narrow && element.has_class("dr-nav-panel") && !element.has_class("dr-nav-panel-open") {
            return false;
        }
        if narrow && element.has_class("navbar-collapse") && !element.has_class("show") {
            return false;
        }
        current = element.parent;
    }
    true
}

/// Whether `node` is rendered pinned to the viewport instead of in page flow
pub fn is_fixed(doc: &Document, node: NodeId) -> bool {
    let mut current = Some(node);
    while let Some(candidate) = current {
        let Some(element) = doc.get(candidate) else {
            return false;
        };
        if element.tag == "header"
            || element.has_class("modal")
            || element.has_class("modal-overlay")
            || element.has_class("alert")
            || element.attrs.contains_key(SCROLL_TOP_ATTR)
        {
            return true;
        }
        current = element.parent;
    }
    false
}
