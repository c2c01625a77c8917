//! Form field value objects

use crate::dom::{Document, NodeId};

/// Semantic kind of a contact form field, selecting its validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    PersonalName,
    Email,
    Phone,
    /// Any non-empty text, e.g. the subject line
    RequiredText,
    LongMessage,
    Consent,
}

impl FieldKind {
    /// Message shown when a required field is left empty
    pub fn required_message(self) -> &'static str {
        match self {
            FieldKind::Email => "E-mail je povinný",
            FieldKind::LongMessage => "Správa je povinná",
            FieldKind::Consent => "Musíte súhlasiť so spracovaním údajov",
            FieldKind::PersonalName | FieldKind::Phone | FieldKind::RequiredText => {
                "Toto pole je povinné"
            }
        }
    }

    /// Message shown when a value does not match the field's pattern
    pub fn pattern_message(self) -> &'static str {
        match self {
            FieldKind::PersonalName => "Zadajte platné meno (2-50 znakov)",
            FieldKind::Email => "Zadajte platnú e-mailovú adresu",
            FieldKind::Phone => "Zadajte platné telefónne číslo",
            FieldKind::LongMessage => "Správa musí obsahovať aspoň 10 znakov",
            FieldKind::RequiredText | FieldKind::Consent => self.required_message(),
        }
    }
}

/// Field ids of the contact form and their kinds, in validation order
pub const CONTACT_FIELDS: &[(&str, FieldKind)] = &[
    ("firstName", FieldKind::PersonalName),
    ("lastName", FieldKind::PersonalName),
    ("email", FieldKind::Email),
    ("phone", FieldKind::Phone),
    ("subject", FieldKind::RequiredText),
    ("message", FieldKind::LongMessage),
    ("privacyConsent", FieldKind::Consent),
];

/// Type-safe field values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Checkbox(bool),
}

impl<'a> FieldValue<'a> {
    /// Trimmed text (empty for checkboxes)
    pub fn as_text(&self) -> &'a str {
        match *self {
            FieldValue::Text(s) => s.trim(),
            FieldValue::Checkbox(_) => "",
        }
    }

    /// Whether the raw value is empty, before trimming
    pub fn is_empty(&self) -> bool {
        match *self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Checkbox(checked) => !checked,
        }
    }

    /// Checked state; a text value counts as checked when non-blank
    pub fn is_checked(&self) -> bool {
        match *self {
            FieldValue::Checkbox(checked) => checked,
            FieldValue::Text(s) => !s.trim().is_empty(),
        }
    }
}

/// Validity of a bound field as last evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

/// A form field bound to its document element
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub node: NodeId,
    pub validity: Validity,
}

impl FormField {
    pub fn new(name: &'static str, kind: FieldKind, node: NodeId) -> Self {
        Self {
            name,
            kind,
            node,
            validity: Validity::Untouched,
        }
    }

    /// Read the current value from the document
    pub fn value<'d>(&self, doc: &'d Document) -> FieldValue<'d> {
        match doc.get(self.node) {
            Some(element) if element.is_checkbox() => FieldValue::Checkbox(element.checked),
            Some(element) => FieldValue::Text(&element.value),
            None => FieldValue::Text(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Viewport};

    #[test]
    fn test_contact_fields_cover_every_kind() {
        for kind in [
            FieldKind::PersonalName,
            FieldKind::Email,
            FieldKind::Phone,
            FieldKind::RequiredText,
            FieldKind::LongMessage,
            FieldKind::Consent,
        ] {
            assert!(CONTACT_FIELDS.iter().any(|(_, k)| *k == kind), "{kind:?}");
        }
    }

    #[test]
    fn test_field_value_as_text_trims() {
        assert_eq!(FieldValue::Text("  Ján ").as_text(), "Ján");
        assert_eq!(FieldValue::Checkbox(true).as_text(), "");
    }

    #[test]
    fn test_field_value_is_checked() {
        assert!(FieldValue::Checkbox(true).is_checked());
        assert!(!FieldValue::Checkbox(false).is_checked());
        assert!(FieldValue::Text("on").is_checked());
        assert!(!FieldValue::Text(" ").is_checked());
    }

    #[test]
    fn test_value_reads_checkbox_state() {
        let mut doc = Document::new(Viewport::new(1024.0, 600.0));
        let body = doc.body();
        let node = doc.append(
            body,
            Element::new("input").with_id("privacyConsent").attr("type", "checkbox"),
        );
        let field = FormField::new("privacyConsent", FieldKind::Consent, node);

        assert_eq!(field.value(&doc), FieldValue::Checkbox(false));
        doc.set_checked(node, true);
        assert_eq!(field.value(&doc), FieldValue::Checkbox(true));
    }

    #[test]
    fn test_new_field_is_untouched() {
        let mut doc = Document::new(Viewport::new(1024.0, 600.0));
        let body = doc.body();
        let node = doc.append(body, Element::new("input").with_id("email"));
        let field = FormField::new("email", FieldKind::Email, node);
        assert_eq!(field.validity, Validity::Untouched);
        assert_eq!(field.value(&doc), FieldValue::Text(""));
    }
}
