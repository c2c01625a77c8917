//! Contact form validation and submission

use super::field::{FieldKind, FormField, Validity, CONTACT_FIELDS};
use super::notification::{Notifications, Severity};
use super::rules::{self, FieldError};
use crate::browser::Browser;
use crate::config::SiteConfig;
use crate::dom::{Document, Element, NodeId};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Label shown on the submit button while a submission is in flight
pub const SUBMITTING_LABEL: &str = "Odosielam...";

const FEEDBACK_CLASS: &str = "invalid-feedback";
const FEEDBACK_HEIGHT: f64 = 18.0;

/// Submission phase of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    /// Waiting out the submission delay
    Submitting { since: Instant },
    /// Navigation to the confirmation page happened
    Submitted,
    /// Connectivity check failed, transient
    Failed,
}

impl SubmitPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitPhase::Submitting { .. })
    }

    pub fn can_transition_to(&self, next: &SubmitPhase) -> bool {
        matches!(
            (self, next),
            (SubmitPhase::Idle, SubmitPhase::Submitting { .. })
                | (SubmitPhase::Submitting { .. }, SubmitPhase::Submitted)
                | (SubmitPhase::Submitting { .. }, SubmitPhase::Failed)
                | (SubmitPhase::Failed, SubmitPhase::Idle)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid submission transition from {from:?} to {to:?}")]
pub struct TransitionError {
    pub from: SubmitPhase,
    pub to: SubmitPhase,
}

/// Why a submission did not go through. `Display` is the notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Prosím, opravte chyby vo formulári")]
    Invalid,
    #[error("Chyba spojenia, skúste neskôr")]
    Offline,
}

/// What a submit request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was not idle
    Ignored,
    /// Validation failed, errors are shown
    Rejected,
    /// The form is now submitting
    Started,
}

/// What triggered a field evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Blur,
    Submit,
}

/// Validation and submission controller bound to the contact form
#[derive(Debug)]
pub struct FormValidator {
    form: NodeId,
    submit_button: Option<NodeId>,
    submit_label: String,
    fields: Vec<FormField>,
    phase: SubmitPhase,
    attempted: bool,
    notifications: Notifications,
    submit_delay: Duration,
    confirmation_location: String,
}

impl FormValidator {
    /// Bind to the form named by `config.form_id`. Absent form means no validator.
    pub fn bind(doc: &Document, config: &SiteConfig) -> Option<Self> {
        let Some(form) = doc.by_id(&config.form_id) else {
            tracing::debug!("Form #{} not found, validation disabled", config.form_id);
            return None;
        };

        let fields: Vec<FormField> = CONTACT_FIELDS
            .iter()
            .filter_map(|(name, kind)| {
                let node = doc
                    .find_within(form, |e| e.id.as_deref() == Some(*name))
                    .into_iter()
                    .next();
                if node.is_none() {
                    tracing::debug!("Field #{} missing, skipped", name);
                }
                node.map(|node| FormField::new(*name, *kind, node))
            })
            .collect();

        let submit_button = doc
            .find_within(form, Element::is_submit_button)
            .into_iter()
            .next();
        let submit_label = submit_button
            .map(|button| doc.text(button).to_string())
            .unwrap_or_default();

        tracing::debug!(
            "Form #{} bound with {} fields",
            config.form_id,
            fields.len()
        );

        Some(Self {
            form,
            submit_button,
            submit_label,
            fields,
            phase: SubmitPhase::Idle,
            attempted: false,
            notifications: Notifications::new(config.notification_ttl()),
            submit_delay: config.submit_delay(),
            confirmation_location: config.confirmation_location.clone(),
        })
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    pub fn submit_button(&self) -> Option<NodeId> {
        self.submit_button
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_attempted(&self) -> bool {
        self.attempted
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, node: NodeId) -> Option<&FormField> {
        self.fields.iter().find(|field| field.node == node)
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    fn index_of(&self, node: NodeId) -> Option<usize> {
        self.fields.iter().position(|field| field.node == node)
    }

    /// Move to `next`, rejecting transitions the submission protocol forbids
    pub fn transition(&mut self, next: SubmitPhase) -> Result<(), TransitionError> {
        if !self.phase.can_transition_to(&next) {
            return Err(TransitionError {
                from: self.phase,
                to: next,
            });
        }
        tracing::info!("Form phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Blur on `node`. Returns the field's validity, or `None` if `node` is not a bound field.
    pub fn blur(&mut self, doc: &mut Document, node: NodeId) -> Option<bool> {
        let index = self.index_of(node)?;
        Some(self.evaluate(doc, index, Trigger::Blur))
    }

    /// Input on `node`: drop any shown error. Returns false if `node` is not a bound field.
    pub fn input(&mut self, doc: &mut Document, node: NodeId) -> bool {
        match self.index_of(node) {
            Some(index) => {
                self.clear_error(doc, index);
                true
            }
            None => false,
        }
    }

    /// Evaluate every bound field so all errors surface together
    pub fn validate_all(&mut self, doc: &mut Document) -> bool {
        let mut valid = true;
        for index in 0..self.fields.len() {
            valid &= self.evaluate(doc, index, Trigger::Submit);
        }
        valid
    }

    fn evaluate(&mut self, doc: &mut Document, index: usize, trigger: Trigger) -> bool {
        let field = &self.fields[index];
        let kind = field.kind;
        let value = field.value(doc);
        let silent = match kind {
            FieldKind::Phone => value.is_empty(),
            FieldKind::Consent => true,
            _ => false,
        };

        match rules::validate(kind, value) {
            Ok(()) => {
                if !silent {
                    self.clear_error(doc, index);
                }
                self.fields[index].validity = Validity::Valid;
                true
            }
            Err(err) => {
                if kind != FieldKind::Consent || trigger == Trigger::Submit {
                    self.show_error(doc, index, &err);
                }
                self.fields[index].validity = Validity::Invalid;
                false
            }
        }
    }

    /// Mark the field invalid and write `err` into its feedback slot
    fn show_error(&mut self, doc: &mut Document, index: usize, err: &FieldError) {
        let node = self.fields[index].node;
        doc.add_class(node, "is-invalid");
        doc.remove_class(node, "is-valid");
        if let Some(slot) = Self::feedback_slot(doc, node, true) {
            doc.set_text(slot, err.to_string());
        }
        tracing::debug!("Field {} invalid: {}", self.fields[index].name, err);
        self.fields[index].validity = Validity::Invalid;
    }

    /// Remove any error shown for the field. Calling it twice changes nothing.
    fn clear_error(&mut self, doc: &mut Document, index: usize) {
        let node = self.fields[index].node;
        doc.remove_class(node, "is-invalid");
        let has_content = doc.get(node).is_some_and(Element::has_content);
        doc.set_class(node, "is-valid", has_content);
        if let Some(slot) = Self::feedback_slot(doc, node, false) {
            doc.set_text(slot, "");
        }
        let field = &mut self.fields[index];
        if field.validity == Validity::Invalid {
            field.validity = Validity::Untouched;
        }
    }

    /// The `.invalid-feedback` element next to `node`, created on demand
    fn feedback_slot(doc: &mut Document, node: NodeId, create: bool) -> Option<NodeId> {
        let parent = doc.parent(node)?;
        if let Some(slot) = doc
            .find_within(parent, |e| e.has_class(FEEDBACK_CLASS))
            .into_iter()
            .next()
        {
            return Some(slot);
        }
        if !create {
            return None;
        }
        let top = doc.layout(node).bottom();
        Some(doc.append(
            parent,
            Element::new("div")
                .class(FEEDBACK_CLASS)
                .at(top, FEEDBACK_HEIGHT),
        ))
    }

    /// Submit request at `now`
    pub fn submit(&mut self, doc: &mut Document, now: Instant) -> SubmitOutcome {
        if self.phase != SubmitPhase::Idle {
            tracing::debug!("Submit ignored in phase {:?}", self.phase);
            return SubmitOutcome::Ignored;
        }

        self.attempted = true;
        doc.add_class(self.form, "was-validated");

        if !self.validate_all(doc) {
            let err = SubmitError::Invalid;
            tracing::debug!("Submit rejected: {}", err);
            self.notifications
                .show(doc, err.to_string(), Severity::Error, now);
            return SubmitOutcome::Rejected;
        }

        if let Err(err) = self.transition(SubmitPhase::Submitting { since: now }) {
            tracing::error!("{}", err);
            return SubmitOutcome::Ignored;
        }
        if let Some(button) = self.submit_button {
            doc.set_disabled(button, true);
            doc.set_text(button, SUBMITTING_LABEL);
        }
        SubmitOutcome::Started
    }

    /// Advance timers. Returns the submission result once the delay has elapsed.
    pub fn tick(
        &mut self,
        doc: &mut Document,
        browser: &mut dyn Browser,
        now: Instant,
    ) -> Option<Result<(), SubmitError>> {
        self.notifications.expire(doc, now);

        let SubmitPhase::Submitting { since } = self.phase else {
            return None;
        };
        let settled = since
            .checked_add(self.submit_delay)
            .is_some_and(|deadline| now >= deadline);
        if !settled {
            return None;
        }

        if browser.is_online() {
            if let Err(err) = self.transition(SubmitPhase::Submitted) {
                tracing::error!("{}", err);
                return None;
            }
            browser.navigate(&self.confirmation_location);
            return Some(Ok(()));
        }

        let err = SubmitError::Offline;
        tracing::warn!("Submission failed: {}", err);
        if let Err(transition) = self
            .transition(SubmitPhase::Failed)
            .and_then(|()| self.transition(SubmitPhase::Idle))
        {
            tracing::error!("{}", transition);
        }
        if let Some(button) = self.submit_button {
            doc.set_disabled(button, false);
            doc.set_text(button, self.submit_label.clone());
        }
        self.notifications
            .show(doc, err.to_string(), Severity::Error, now);
        Some(Err(err))
    }
}
