//! Keyboard focus over the page's focusable elements

use crate::dom::NodeId;

/// Focused element, moved through whichever elements are focusable right now.
///
/// The candidate list is passed in on every move because what is focusable
/// changes as panels open and close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusRing {
    current: Option<NodeId>,
}

impl FocusRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn set(&mut self, node: NodeId) {
        self.current = Some(node);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn is_focused(&self, node: NodeId) -> bool {
        self.current == Some(node)
    }

    /// Move to the next candidate, wrapping around. Returns the element that lost focus.
    pub fn next(&mut self, candidates: &[NodeId]) -> Option<NodeId> {
        let previous = self.current;
        self.current = match self.position(candidates) {
            Some(index) => candidates.get((index + 1) % candidates.len()).copied(),
            None => candidates.first().copied(),
        };
        previous
    }

    /// Move to the previous candidate, wrapping around. Returns the element that lost focus.
    pub fn prev(&mut self, candidates: &[NodeId]) -> Option<NodeId> {
        let previous = self.current;
        self.current = match self.position(candidates) {
            Some(0) | None => candidates.last().copied(),
            Some(index) => candidates.get(index - 1).copied(),
        };
        previous
    }

    /// Drop focus if the focused element is no longer a candidate
    pub fn retain(&mut self, candidates: &[NodeId]) {
        if self.position(candidates).is_none() {
            self.current = None;
        }
    }

    fn position(&self, candidates: &[NodeId]) -> Option<usize> {
        let current = self.current?;
        candidates.iter().position(|node| *node == current)
    }
}
