//! Single-open accordion groups
//!
//! Group membership is resolved once at bind time from each button's
//! closest `.accordion` container; toggling never re-queries the page.

use crate::dom::{Document, NodeId};
use std::collections::HashMap;

const TARGET_ATTR: &str = "data-bs-target";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccordionItem {
    pub button: NodeId,
    pub panel: NodeId,
    pub group: usize,
}

#[derive(Debug, Clone)]
pub struct Accordion {
    items: Vec<AccordionItem>,
    groups: Vec<Vec<usize>>,
}

impl Accordion {
    pub fn bind(doc: &Document) -> Option<Self> {
        let mut items = Vec::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut group_of_container: HashMap<NodeId, usize> = HashMap::new();

        for button in doc.by_class("accordion-button") {
            let Some(panel) = doc.attr(button, TARGET_ATTR).and_then(|t| doc.by_fragment(t)) else {
                tracing::debug!("Accordion button without a resolvable target skipped");
                continue;
            };
            let group = match doc.closest(button, "accordion") {
                Some(container) => *group_of_container.entry(container).or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                }),
                None => {
                    groups.push(Vec::new());
                    groups.len() - 1
                }
            };
            groups[group].push(items.len());
            items.push(AccordionItem {
                button,
                panel,
                group,
            });
        }

        if items.is_empty() {
            return None;
        }
        tracing::debug!("Accordion bound: {} items in {} groups", items.len(), groups.len());
        Some(Self { items, groups })
    }

    pub fn items(&self) -> &[AccordionItem] {
        &self.items
    }

    pub fn is_open(&self, doc: &Document, index: usize) -> bool {
        self.items
            .get(index)
            .is_some_and(|item| doc.attr(item.button, "aria-expanded") == Some("true"))
    }

    /// Click on `target`. Returns true if it hit an accordion button.
    pub fn click(&self, doc: &mut Document, target: NodeId) -> bool {
        let Some(button) = doc.closest(target, "accordion-button") else {
            return false;
        };
        match self.items.iter().position(|item| item.button == button) {
            Some(index) => {
                self.toggle(doc, index);
                true
            }
            None => false,
        }
    }

    /// Close an open item; otherwise close its open siblings and open it
    pub fn toggle(&self, doc: &mut Document, index: usize) {
        let Some(item) = self.items.get(index).copied() else {
            return;
        };
        if self.is_open(doc, index) {
            Self::close(doc, item);
            return;
        }
        for sibling in &self.groups[item.group] {
            let other = self.items[*sibling];
            if *sibling != index && !doc.has_class(other.button, "collapsed") {
                Self::close(doc, other);
            }
        }
        Self::open(doc, item);
    }

    fn open(doc: &mut Document, item: AccordionItem) {
        doc.remove_class(item.button, "collapsed");
        doc.set_attr(item.button, "aria-expanded", "true");
        doc.add_class(item.panel, "show");
    }

    fn close(doc: &mut Document, item: AccordionItem) {
        doc.add_class(item.button, "collapsed");
        doc.set_attr(item.button, "aria-expanded", "false");
        doc.remove_class(item.panel, "show");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Viewport};
    use pretty_assertions::assert_eq;

    /// Adds an item; `open` items start expanded
    fn item(doc: &mut Document, parent: NodeId, id: &str, open: bool) -> (NodeId, NodeId) {
        let mut button = Element::new("button")
            .class("accordion-button")
            .attr(TARGET_ATTR, format!("#{id}"))
            .attr("aria-expanded", open.to_string());
        let mut panel = Element::new("div").with_id(id).class("accordion-collapse collapse");
        if open {
            panel = panel.class("show");
        } else {
            button = button.class("collapsed");
        }
        (doc.append(parent, button), doc.append(parent, panel))
    }

    fn open_panels(doc: &Document) -> Vec<NodeId> {
        doc.by_class("accordion-collapse")
            .into_iter()
            .filter(|panel| doc.has_class(*panel, "show"))
            .collect()
    }

    #[test]
    fn test_opening_closes_every_open_sibling() {
        let mut doc = Document::new(Viewport::new(1024.0, 600.0));
        let body = doc.body();
        let group = doc.append(body, Element::new("div").class("accordion"));
        let (first, _) = item(&mut doc, group, "faq1", true);
        let (second, _) = item(&mut doc, group, "faq2", false);
        let (third, third_panel) = item(&mut doc, group, "faq3", false);
        // Two open at once, as server-rendered markup may have it
        doc.remove_class(second, "collapsed");
        let second_panel = doc.by_id("faq2").unwrap();
        doc.add_class(second_panel, "show");
        let accordion = Accordion::bind(&doc).unwrap();

        assert!(accordion.click(&mut doc, third));

        assert_eq!(open_panels(&doc), vec![third_panel]);
        assert!(doc.has_class(first, "collapsed"));
        assert!(doc.has_class(second, "collapsed"));
        assert_eq!(doc.attr(first, "aria-expanded"), Some("false"));
        assert_eq!(doc.attr(third, "aria-expanded"), Some("true"));
        assert!(!doc.has_class(third, "collapsed"));
    }

    #[test]
    fn test_toggling_open_item_closes_it() {
        let mut doc = Document::new(Viewport::new(1024.0, 600.0));
        let body = doc.body();
        let group = doc.append(body, Element::new("div").class("accordion"));
        let (first, _) = item(&mut doc, group, "faq1", true);
        item(&mut doc, group, "faq2", false);
        let accordion = Accordion::bind(&doc).unwrap();

        accordion.click(&mut doc, first);
        assert!(open_panels(&doc).is_empty());
        assert!(!accordion.is_open(&doc, 0));
    }

    #[test]
    fn test_groups_are_independent() {
        let mut doc = Document::new(Viewport::new(1024.0, 600.0));
        let body = doc.body();
        let left = doc.append(body, Element::new("div").class("accordion"));
        let right = doc.append(body, Element::new("div").class("accordion"));
        let (_, left_panel) = item(&mut doc, left, "a1", true);
        let (right_button, right_panel) = item(&mut doc, right, "b1", false);
        let accordion = Accordion::bind(&doc).unwrap();
        assert_eq!(accordion.groups.len(), 2);

        accordion.click(&mut doc, right_button);
        assert_eq!(open_panels(&doc), vec![left_panel, right_panel]);
    }

    #[test]
    fn test_ungrouped_item_stands_alone() {
        let mut doc = Document::new(Viewport::new(1024.0, 600.0));
        let body = doc.body();
        let (lone, lone_panel) = item(&mut doc, body, "solo", false);
        let group = doc.append(body, Element::new("div").class("accordion"));
        let (_, grouped_panel) = item(&mut doc, group, "faq1", true);
        let accordion = Accordion::bind(&doc).unwrap();

        accordion.click(&mut doc, lone);
        assert_eq!(open_panels(&doc), vec![lone_panel, grouped_panel]);
    }

    #[test]
    fn test_unresolvable_targets_are_skipped() {
        let mut doc = Document::new(Viewport::new(1024.0, 600.0));
        let body = doc.body();
        doc.append(
            body,
            Element::new("button").class("accordion-button").attr(TARGET_ATTR, "#nikde"),
        );
        assert!(Accordion::bind(&doc).is_none());
    }
}
