//! Document element value objects

use std::collections::{BTreeMap, BTreeSet};

/// Handle to an element inside a [`Document`](super::Document) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: usize,
    /// Bumped each time the slot is reused so stale handles stop resolving
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            generation: 0,
        }
    }
}

/// Vertical layout box in page pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: `[top, top + height)`
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// A single element of the page
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub layout: LayoutBox,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) detached: bool,
    pub(crate) generation: u32,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more space-separated classes
    pub fn class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.classes.insert(class.to_string());
        }
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn at(mut self, top: f64, height: f64) -> Self {
        self.layout = LayoutBox::new(top, height);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// `<input type="checkbox">`
    pub fn is_checkbox(&self) -> bool {
        self.tag == "input" && self.get_attr("type") == Some("checkbox")
    }

    /// Element that accepts typed text (text-like inputs and textareas)
    pub fn is_text_entry(&self) -> bool {
        self.tag == "textarea" || (self.tag == "input" && !self.is_checkbox())
    }

    /// `<button type="submit">`, the default type for buttons inside forms is not inferred
    pub fn is_submit_button(&self) -> bool {
        self.tag == "button" && self.get_attr("type") == Some("submit")
    }

    pub fn is_focusable(&self) -> bool {
        matches!(self.tag.as_str(), "a" | "button" | "input" | "textarea") && !self.disabled
    }

    /// Whether the element currently carries user content (text or a check mark)
    pub fn has_content(&self) -> bool {
        if self.is_checkbox() {
            self.checked
        } else {
            !self.value.trim().is_empty()
        }
    }
}
