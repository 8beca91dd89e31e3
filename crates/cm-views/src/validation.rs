//! Validation messages
//!
//! Messages are declared per field as an ordered constraint → message table.
//! When a field fails several constraints, the first entry of its table that
//! matches a failed constraint is the one displayed.

use std::collections::BTreeMap;

use crate::form::{Constraint, ContactForm, Field};

/// Field → ordered (constraint, message) pairs
pub type MessageTable = &'static [(Field, &'static [(Constraint, &'static str)])];

/// Messages for the contact edit form
pub const CONTACT_VALIDATION_MESSAGES: MessageTable = &[
    (Field::ContactName, &[(Constraint::Required, "Name is required.")]),
    (Field::ContactAddress, &[(Constraint::Required, "Address is required.")]),
    (Field::ContactPhone, &[(Constraint::Required, "Phone is required.")]),
];

/// Top-level message shown when saving an invalid form
pub const VALIDATION_SUMMARY: &str = "Please correct the validation errors.";

/// Messages currently displayed, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayMessages(BTreeMap<Field, &'static str>);

impl DisplayMessages {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Turns form state into display messages using a message table
#[derive(Debug, Clone, Copy)]
pub struct GenericValidator {
    messages: MessageTable,
}

impl GenericValidator {
    pub fn new(messages: MessageTable) -> Self {
        Self { messages }
    }

    /// Messages for every invalid field the user has interacted with
    ///
    /// Fields that are neither dirty nor touched stay silent even when
    /// invalid, so a freshly loaded form shows no messages.
    pub fn process_messages(&self, form: &ContactForm) -> DisplayMessages {
        let mut display = BTreeMap::new();

        for (field, constraint_messages) in self.messages {
            let control = form.control(*field);
            if !(control.is_dirty() || control.is_touched()) {
                continue;
            }

            let errors = control.errors();
            if let Some((_, message)) = constraint_messages
                .iter()
                .find(|(constraint, _)| errors.contains(constraint))
            {
                display.insert(*field, *message);
            }
        }

        DisplayMessages(display)
    }
}

impl Default for GenericValidator {
    fn default() -> Self {
        Self::new(CONTACT_VALIDATION_MESSAGES)
    }
}
