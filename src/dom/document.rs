//! In-memory page document
//!
//! An element arena with the handful of queries and mutations the page
//! behaviors need. Removing an element frees its slot for the next append;
//! each slot carries a generation so handles to removed elements never
//! resolve to whatever later took their place.

use super::element::{Element, LayoutBox, NodeId};
use super::viewport::{ScrollBehavior, Viewport};
use std::time::Instant;

/// Class on `<body>` that blocks user scrolling
pub const SCROLL_LOCK_CLASS: &str = "u-no-scroll";

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    free: Vec<usize>,
    body: NodeId,
    pub viewport: Viewport,
}

impl Document {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            nodes: vec![Element::new("body")],
            free: Vec::new(),
            body: NodeId::new(0),
            viewport,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Append `element` as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        element.parent = Some(parent);
        element.children.clear();
        element.detached = false;
        let node = match self.free.pop() {
            Some(index) if index < self.nodes.len() => {
                element.generation = self.nodes[index].generation.wrapping_add(1);
                let node = NodeId {
                    index,
                    generation: element.generation,
                };
                self.nodes[index] = element;
                node
            }
            _ => {
                element.generation = 0;
                self.nodes.push(element);
                NodeId::new(self.nodes.len() - 1)
            }
        };
        if let Some(parent) = self.get_mut(parent) {
            parent.children.push(node);
        }
        node
    }

    /// Detach `node` and its subtree, freeing their slots
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body || !self.is_attached(node) {
            return;
        }
        if let Some(parent) = self.parent(node) {
            if let Some(parent) = self.get_mut(parent) {
                parent.children.retain(|child| *child != node);
            }
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.get_mut(current) {
                element.detached = true;
                stack.append(&mut element.children);
                self.free.push(current.index);
            }
        }
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes
            .get(node.index)
            .filter(|e| e.generation == node.generation && !e.detached)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes
            .get_mut(node.index)
            .filter(|e| e.generation == node.generation && !e.detached)
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|e| e.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.get(node).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    /// All attached elements in document (pre-)order, body first
    pub fn walk(&self) -> Vec<NodeId> {
        self.descendants_inclusive(self.body)
    }

    /// `node` followed by its descendants in document order
    pub fn descendants_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_attached(node) {
            return out;
        }
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut all = self.descendants_inclusive(node);
        if !all.is_empty() {
            all.remove(0);
        }
        all
    }

    /// Inclusive containment, like `Node.contains`
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return self.is_attached(candidate);
            }
            current = self.parent(candidate);
        }
        false
    }

    /// Nearest inclusive ancestor carrying `class`
    pub fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.has_class(candidate, class) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Nearest inclusive ancestor with tag `tag`
    pub fn closest_tag(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.get(candidate).is_some_and(|e| e.tag == tag) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Nearest inclusive ancestor carrying attribute `name`
    pub fn closest_attr(&self, node: NodeId, name: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.attr(candidate, name).is_some() {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    // Queries

    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|node| self.get(*node).and_then(|e| e.id.as_deref()) == Some(id))
    }

    /// Resolve a `#id` fragment; anything else yields `None`
    pub fn by_fragment(&self, href: &str) -> Option<NodeId> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        self.by_id(id)
    }

    pub fn by_class(&self, class: &str) -> Vec<NodeId> {
        self.filter(|e| e.has_class(class))
    }

    pub fn by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.filter(|e| e.tag == tag)
    }

    pub fn with_attr(&self, name: &str) -> Vec<NodeId> {
        self.filter(|e| e.attrs.contains_key(name))
    }

    /// Elements whose attribute `name` starts with `prefix`, like `[name^="prefix"]`
    pub fn with_attr_prefix(&self, name: &str, prefix: &str) -> Vec<NodeId> {
        self.filter(|e| e.get_attr(name).is_some_and(|v| v.starts_with(prefix)))
    }

    /// Descendants of `scope` matching `predicate`, in document order
    pub fn find_within(&self, scope: NodeId, predicate: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.get(*node).is_some_and(&predicate))
            .collect()
    }

    fn filter(&self, predicate: impl Fn(&Element) -> bool) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|node| self.get(*node).is_some_and(&predicate))
            .collect()
    }

    // Element state

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.get_mut(node) {
            element.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.get_mut(node) {
            element.classes.remove(class);
        }
    }

    /// Set or clear `class`, returning the resulting state
    pub fn set_class(&mut self, node: NodeId, class: &str, present: bool) -> bool {
        if present {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
        present
    }

    /// Flip `class`, returning true if it is now present
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        let present = !self.has_class(node, class);
        self.set_class(node, class, present)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get(node).and_then(|e| e.get_attr(name))
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.get_mut(node) {
            element.attrs.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.get_mut(node) {
            element.attrs.remove(name);
        }
    }

    pub fn text(&self, node: NodeId) -> &str {
        self.get(node).map(|e| e.text.as_str()).unwrap_or("")
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        if let Some(element) = self.get_mut(node) {
            element.text = text.into();
        }
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.get(node).map(|e| e.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        if let Some(element) = self.get_mut(node) {
            element.value = value.into();
        }
    }

    pub fn is_checked(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|e| e.checked)
    }

    pub fn set_checked(&mut self, node: NodeId, checked: bool) {
        if let Some(element) = self.get_mut(node) {
            element.checked = checked;
        }
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|e| e.disabled)
    }

    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(element) = self.get_mut(node) {
            element.disabled = disabled;
        }
    }

    pub fn layout(&self, node: NodeId) -> LayoutBox {
        self.get(node).map(|e| e.layout).unwrap_or_default()
    }

    // Viewport

    /// Total document height: the lowest layout edge of any element
    pub fn height(&self) -> f64 {
        self.walk()
            .into_iter()
            .filter_map(|node| self.get(node))
            .map(|e| e.layout.bottom())
            .fold(0.0, f64::max)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.height() - self.viewport.height).max(0.0)
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.has_class(self.body, SCROLL_LOCK_CLASS)
    }

    /// Programmatic scroll (`window.scrollTo`), not affected by the scroll lock
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior, now: Instant) {
        let max = self.max_scroll();
        self.viewport.scroll_to(top, max, behavior, now);
    }

    /// User scroll by `delta` pixels. Returns true if the position changed.
    pub fn scroll_by(&mut self, delta: f64) -> bool {
        if self.is_scroll_locked() {
            return false;
        }
        let before = self.viewport.scroll_y;
        let target = (before + delta).clamp(0.0, self.max_scroll());
        self.viewport.jump(target);
        self.viewport.scroll_y != before
    }

    /// Advance a running smooth scroll
    pub fn advance(&mut self, now: Instant) -> bool {
        self.viewport.advance(now)
    }

    /// Fraction of the element's box inside the viewport, in `[0, 1]`
    pub fn visible_ratio(&self, node: NodeId) -> f64 {
        let layout = self.layout(node);
        let view_top = self.viewport.scroll_y;
        let view_bottom = self.viewport.bottom();
        if layout.height <= 0.0 {
            return if layout.top >= view_top && layout.top <= view_bottom {
                1.0
            } else {
                0.0
            };
        }
        let overlap = layout.bottom().min(view_bottom) - layout.top.max(view_top);
        (overlap / layout.height).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new(Viewport::new(1024.0, 400.0));
        let body = doc.body();
        let section = doc.append(
            body,
            Element::new("section").with_id("about").class("band").at(0.0, 600.0),
        );
        let link = doc.append(
            section,
            Element::new("a").class("nav-link").attr("href", "#contact").at(10.0, 18.0),
        );
        let contact = doc.append(
            body,
            Element::new("section").with_id("contact").at(600.0, 900.0),
        );
        (doc, section, link, contact)
    }

    mod tree {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_walk_is_document_order() {
            let (doc, section, link, contact) = sample();
            assert_eq!(doc.walk(), vec![doc.body(), section, link, contact]);
        }

        #[test]
        fn test_contains_is_inclusive() {
            let (doc, section, link, contact) = sample();
            assert!(doc.contains(section, section));
            assert!(doc.contains(section, link));
            assert!(!doc.contains(contact, link));
        }

        #[test]
        fn test_remove_detaches_subtree() {
            let (mut doc, section, link, contact) = sample();
            doc.remove(section);
            assert!(!doc.is_attached(section));
            assert!(!doc.is_attached(link));
            assert_eq!(doc.walk(), vec![doc.body(), contact]);
            assert!(doc.by_class("nav-link").is_empty());
        }

        #[test]
        fn test_removed_slots_are_reused() {
            let (mut doc, section, _, _) = sample();
            let slots = doc.nodes.len();
            for _ in 0..50 {
                let body = doc.body();
                let alert = doc.append(body, Element::new("div").class("alert"));
                doc.remove(alert);
            }
            assert_eq!(doc.nodes.len(), slots + 1);

            doc.remove(section);
            let body = doc.body();
            let banner = doc.append(body, Element::new("div").class("alert"));
            assert_eq!(doc.nodes.len(), slots + 1);
            assert!(doc.is_attached(banner));
            assert!(!doc.is_attached(section));
            assert_ne!(banner, section);
        }

        #[test]
        fn test_removing_twice_frees_once() {
            let (mut doc, section, link, contact) = sample();
            doc.remove(section);
            doc.remove(link);
            doc.remove(section);
            let body = doc.body();
            let first = doc.append(body, Element::new("p"));
            let second = doc.append(body, Element::new("p"));
            let third = doc.append(body, Element::new("p"));

            assert_ne!(first, second);
            assert_eq!(doc.walk(), vec![body, contact, first, second, third]);
            assert_eq!(doc.nodes.len(), 5);
        }

        #[test]
        fn test_remove_body_is_ignored() {
            let (mut doc, ..) = sample();
            let body = doc.body();
            doc.remove(body);
            assert!(doc.is_attached(body));
        }

        #[test]
        fn test_closest_includes_self() {
            let (doc, section, link, _) = sample();
            assert_eq!(doc.closest(link, "band"), Some(section));
            assert_eq!(doc.closest(section, "band"), Some(section));
            assert_eq!(doc.closest(link, "missing"), None);
        }
    }

    mod queries {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_by_id_and_fragment() {
            let (doc, _, _, contact) = sample();
            assert_eq!(doc.by_id("contact"), Some(contact));
            assert_eq!(doc.by_fragment("#contact"), Some(contact));
            assert_eq!(doc.by_fragment("#"), None);
            assert_eq!(doc.by_fragment("contact"), None);
            assert_eq!(doc.by_fragment("#nowhere"), None);
        }

        #[test]
        fn test_attr_prefix() {
            let (doc, _, link, _) = sample();
            assert_eq!(doc.with_attr_prefix("href", "#"), vec![link]);
            assert!(doc.with_attr_prefix("href", "http").is_empty());
        }

        #[test]
        fn test_closest_attr_walks_up() {
            let (doc, section, link, contact) = sample();
            assert_eq!(doc.closest_attr(link, "href"), Some(link));
            assert_eq!(doc.closest_attr(section, "href"), None);
            assert_eq!(doc.closest_attr(contact, "data-modal"), None);
        }

        #[test]
        fn test_toggle_class() {
            let (mut doc, section, ..) = sample();
            assert!(doc.toggle_class(section, "open"));
            assert!(doc.has_class(section, "open"));
            assert!(!doc.toggle_class(section, "open"));
            assert!(!doc.has_class(section, "open"));
        }
    }

    mod scrolling {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_height_and_max_scroll() {
            let (doc, ..) = sample();
            assert_eq!(doc.height(), 1500.0);
            assert_eq!(doc.max_scroll(), 1100.0);
        }

        #[test]
        fn test_scroll_by_is_clamped() {
            let (mut doc, ..) = sample();
            assert!(doc.scroll_by(5000.0));
            assert_eq!(doc.viewport.scroll_y, 1100.0);
            assert!(!doc.scroll_by(10.0));
        }

        #[test]
        fn test_scroll_lock_blocks_user_scroll() {
            let (mut doc, ..) = sample();
            let body = doc.body();
            doc.add_class(body, SCROLL_LOCK_CLASS);
            assert!(!doc.scroll_by(100.0));
            assert_eq!(doc.viewport.scroll_y, 0.0);

            doc.scroll_to(200.0, ScrollBehavior::Instant, Instant::now());
            assert_eq!(doc.viewport.scroll_y, 200.0);
        }

        #[test]
        fn test_visible_ratio() {
            let (mut doc, section, _, contact) = sample();
            assert_eq!(doc.visible_ratio(section), 400.0 / 600.0);
            assert_eq!(doc.visible_ratio(contact), 0.0);

            doc.scroll_by(600.0);
            assert_eq!(doc.visible_ratio(section), 0.0);
            assert_eq!(doc.visible_ratio(contact), 400.0 / 900.0);
        }
    }
}
