//! Animated in-page anchor navigation

use crate::dom::{Document, NodeId, ScrollBehavior};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    links: Vec<NodeId>,
    header_height: f64,
}

impl SmoothScroll {
    /// Bind to every `a[href^="#"]`
    pub fn bind(doc: &Document, header_height: f64) -> Option<Self> {
        let links: Vec<NodeId> = doc
            .with_attr_prefix("href", "#")
            .into_iter()
            .filter(|node| doc.get(*node).is_some_and(|e| e.tag == "a"))
            .collect();
        if links.is_empty() {
            return None;
        }
        tracing::debug!("Smooth scroll bound to {} links", links.len());
        Some(Self {
            links,
            header_height,
        })
    }

    /// Scroll destination for a click on `link`, `None` when the default action should run
    pub fn destination(&self, doc: &Document, link: NodeId) -> Option<f64> {
        let href = doc.attr(link, "href")?;
        let target = doc.by_fragment(href)?;
        Some((doc.layout(target).top - self.header_height).max(0.0))
    }

    /// Click on `target`. Returns true if the default navigation was prevented.
    pub fn click(&self, doc: &mut Document, target: NodeId, now: Instant) -> bool {
        let Some(link) = doc.closest_tag(target, "a").filter(|a| self.links.contains(a)) else {
            return false;
        };
        match self.destination(doc, link) {
            Some(top) => {
                doc.scroll_to(top, ScrollBehavior::Smooth, now);
                true
            }
            None => false,
        }
    }
}
