//! Current-section highlighting in the navigation

use crate::dom::{Document, NodeId};

#[derive(Debug, Clone)]
pub struct ScrollSpy {
    sections: Vec<NodeId>,
    links: Vec<NodeId>,
    offset: f64,
    current: Option<NodeId>,
}

impl ScrollSpy {
    /// Bind to `section[id]` and `.nav-link[href^="#"]`, then mark the current section
    pub fn bind(doc: &mut Document, offset: f64) -> Option<Self> {
        let sections: Vec<NodeId> = doc
            .by_tag("section")
            .into_iter()
            .filter(|node| doc.get(*node).is_some_and(|e| e.id.is_some()))
            .collect();
        let links: Vec<NodeId> = doc
            .with_attr_prefix("href", "#")
            .into_iter()
            .filter(|node| doc.has_class(*node, "nav-link"))
            .collect();
        if sections.is_empty() || links.is_empty() {
            tracing::debug!("Scroll spy disabled: {} sections, {} links", sections.len(), links.len());
            return None;
        }

        let mut spy = Self {
            sections,
            links,
            offset,
            current: None,
        };
        spy.update(doc);
        Some(spy)
    }

    /// Section last marked as current
    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    /// Re-evaluate after a scroll. Later matches win; no match keeps the previous link.
    pub fn update(&mut self, doc: &mut Document) {
        let position = doc.viewport.scroll_y + self.offset;
        let matched = self
            .sections
            .iter()
            .copied()
            .filter(|section| doc.layout(*section).contains(position))
            .last();
        if let Some(section) = matched {
            self.set_active(doc, section);
        }
    }

    fn set_active(&mut self, doc: &mut Document, section: NodeId) {
        let href = doc
            .get(section)
            .and_then(|e| e.id.as_deref())
            .map(|id| format!("#{id}"))
            .unwrap_or_default();
        for link in &self.links {
            doc.remove_class(*link, "active");
            doc.remove_attr(*link, "aria-current");
            if doc.attr(*link, "href") == Some(href.as_str()) {
                doc.add_class(*link, "active");
                doc.set_attr(*link, "aria-current", "page");
            }
        }
        self.current = Some(section);
    }
}
