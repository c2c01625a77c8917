//! Transient notification banners

use crate::dom::{Document, Element, NodeId};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
}

impl Severity {
    pub fn alert_class(self) -> &'static str {
        match self {
            Severity::Error => "alert-danger",
            Severity::Success => "alert-success",
        }
    }
}

/// A banner currently attached to the page
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub node: NodeId,
    pub message: String,
    pub severity: Severity,
    /// `None` when the lifetime runs past what `Instant` can represent
    pub expires_at: Option<Instant>,
}

/// Stack of live notifications. Nothing is deduplicated or capped.
#[derive(Debug, Clone)]
pub struct Notifications {
    active: Vec<Notification>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            active: Vec::new(),
            ttl,
        }
    }

    /// Append a banner to the body; it is removed `ttl` after `now`
    pub fn show(
        &mut self,
        doc: &mut Document,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> Uuid {
        let id = Uuid::new_v4();
        let message = message.into();
        let body = doc.body();
        let node = doc.append(
            body,
            Element::new("div")
                .class("alert")
                .class(severity.alert_class())
                .attr("role", "alert")
                .attr("data-notification-id", id.to_string())
                .text(message.clone()),
        );
        tracing::debug!(%id, ?severity, "Notification shown: {}", message);
        self.active.push(Notification {
            id,
            node,
            message,
            severity,
            expires_at: now.checked_add(self.ttl),
        });
        id
    }

    /// Remove every banner whose lifetime has elapsed. Returns how many went.
    pub fn expire(&mut self, doc: &mut Document, now: Instant) -> usize {
        let before = self.active.len();
        self.active.retain(|notification| {
            if notification.expires_at.is_some_and(|at| now >= at) {
                doc.remove(notification.node);
                false
            } else {
                true
            }
        });
        before - self.active.len()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.active.iter()
    }
}
