//! Contact form domain layer
//!
//! Field bindings, validation rules, notifications and the submission
//! state machine that ties them to the page document.

mod field;
mod notification;
mod rules;
mod validator;

pub use field::{FieldKind, FieldValue, FormField, Validity, CONTACT_FIELDS};
pub use notification::{Notification, Notifications, Severity};
pub use rules::{validate, FieldError, MESSAGE_MIN_CHARS};
pub use validator::{
    FormValidator, SubmitError, SubmitOutcome, SubmitPhase, TransitionError, SUBMITTING_LABEL,
};
