//! Modal dialogs with a shared dimming overlay

use crate::dom::{Document, Element, NodeId, SCROLL_LOCK_CLASS};

/// Trigger attribute naming the dialog to open
pub const MODAL_ATTR: &str = "data-modal";
/// Marks a control that closes the dialog it sits in
pub const MODAL_CLOSE_ATTR: &str = "data-modal-close";

const OVERLAY_CLASS: &str = "modal-overlay";

#[derive(Debug, Clone)]
pub struct Modal {
    triggers: Vec<NodeId>,
    active: Option<NodeId>,
    overlay: Option<NodeId>,
}

impl Modal {
    pub fn bind(doc: &Document) -> Option<Self> {
        let triggers = doc.with_attr(MODAL_ATTR);
        if triggers.is_empty() {
            return None;
        }
        tracing::debug!("Modal bound to {} triggers", triggers.len());
        Some(Self {
            triggers,
            active: None,
            overlay: None,
        })
    }

    /// The open dialog, if any
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    pub fn overlay(&self) -> Option<NodeId> {
        self.overlay
    }

    /// Open the dialog with id `modal_id`, closing any other first. Unknown ids do nothing.
    pub fn open(&mut self, doc: &mut Document, modal_id: &str) -> bool {
        let Some(modal) = doc.by_id(modal_id) else {
            tracing::debug!("Modal #{} not found", modal_id);
            return false;
        };
        self.close(doc);

        let body = doc.body();
        let overlay = doc.append(body, Element::new("div").class(OVERLAY_CLASS));
        self.overlay = Some(overlay);
        self.active = Some(modal);

        doc.add_class(modal, "show");
        doc.set_attr(modal, "aria-hidden", "false");
        doc.add_class(body, SCROLL_LOCK_CLASS);
        tracing::debug!("Modal #{} opened", modal_id);
        true
    }

    /// Close the open dialog. Returns false if none was open.
    pub fn close(&mut self, doc: &mut Document) -> bool {
        let was_open = self.active.is_some();
        if let Some(modal) = self.active.take() {
            doc.remove_class(modal, "show");
            doc.set_attr(modal, "aria-hidden", "true");
        }
        if let Some(overlay) = self.overlay.take() {
            doc.remove(overlay);
        }
        let body = doc.body();
        doc.remove_class(body, SCROLL_LOCK_CLASS);
        was_open
    }

    /// Click on `target`. Returns true if the click opened or closed a dialog.
    pub fn click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        if let Some(trigger) = doc
            .closest_attr(target, MODAL_ATTR)
            .filter(|trigger| self.triggers.contains(trigger))
        {
            let modal_id = doc.attr(trigger, MODAL_ATTR).unwrap_or_default().to_string();
            self.open(doc, &modal_id);
            return true;
        }

        if self.overlay.is_some_and(|overlay| doc.contains(overlay, target)) {
            return self.close(doc);
        }

        let closes_active = self.active.is_some_and(|modal| {
            doc.closest_attr(target, MODAL_CLOSE_ATTR)
                .is_some_and(|control| doc.contains(modal, control))
        });
        if closes_active {
            return self.close(doc);
        }
        false
    }
}
