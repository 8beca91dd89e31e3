//! Contact edit form model
//!
//! A form is a fixed set of controls, one per contact field. Each control
//! tracks its value, its declared validators and two interaction flags:
//! `dirty` (the user changed the value) and `touched` (the input lost focus).
//! Programmatic patches and resets never mark a control dirty.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use cm_core::Contact;
use thiserror::Error;

/// Editable contact fields, in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    ContactName,
    ContactAddress,
    ContactPhone,
    ContactEmail,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::ContactName,
        Field::ContactAddress,
        Field::ContactPhone,
        Field::ContactEmail,
    ];

    /// Control name, matching the JSON property
    pub fn key(&self) -> &'static str {
        match self {
            Field::ContactName => "contactName",
            Field::ContactAddress => "contactAddress",
            Field::ContactPhone => "contactPhone",
            Field::ContactEmail => "contactEmail",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Field::ContactName => "Name",
            Field::ContactAddress => "Address",
            Field::ContactPhone => "Phone",
            Field::ContactEmail => "Email",
        }
    }

    fn read(&self, contact: &Contact) -> Option<String> {
        match self {
            Field::ContactName => contact.contact_name.clone(),
            Field::ContactAddress => contact.contact_address.clone(),
            Field::ContactPhone => contact.contact_phone.clone(),
            Field::ContactEmail => contact.contact_email.clone(),
        }
    }

    fn write(&self, contact: &mut Contact, value: Option<String>) {
        match self {
            Field::ContactName => contact.contact_name = value,
            Field::ContactAddress => contact.contact_address = value,
            Field::ContactPhone => contact.contact_phone = value,
            Field::ContactEmail => contact.contact_email = value,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the control name or its short form (`name`, `address`, ...)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contactname" | "name" => Ok(Field::ContactName),
            "contactaddress" | "address" => Ok(Field::ContactAddress),
            "contactphone" | "phone" => Ok(Field::ContactPhone),
            "contactemail" | "email" => Ok(Field::ContactEmail),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// Constraint kinds a validator can fail with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    Required,
    MinLength,
    MaxLength,
}

impl Constraint {
    pub fn key(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::MinLength => "minlength",
            Constraint::MaxLength => "maxlength",
        }
    }
}

/// Declared field validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Value must be present and non-empty
    Required,
    /// At least `n` characters; empty values pass
    MinLength(usize),
    /// At most `n` characters; empty values pass
    MaxLength(usize),
}

impl Validator {
    pub fn constraint(&self) -> Constraint {
        match self {
            Validator::Required => Constraint::Required,
            Validator::MinLength(_) => Constraint::MinLength,
            Validator::MaxLength(_) => Constraint::MaxLength,
        }
    }

    /// Whether `value` satisfies this validator
    pub fn check(&self, value: Option<&str>) -> bool {
        let value = value.unwrap_or_default();
        match self {
            Validator::Required => !value.is_empty(),
            Validator::MinLength(min) => value.is_empty() || value.chars().count() >= *min,
            Validator::MaxLength(max) => value.chars().count() <= *max,
        }
    }
}

/// A single form control
#[derive(Debug, Clone, Default)]
pub struct FormControl {
    value: Option<String>,
    validators: Vec<Validator>,
    dirty: bool,
    touched: bool,
}

impl FormControl {
    /// Empty, pristine control checked by `validators`
    pub fn new(validators: Vec<Validator>) -> Self {
        Self {
            validators,
            ..Default::default()
        }
    }

    /// Current value; `None` until patched or edited
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Failed constraints, in validator declaration order
    pub fn errors(&self) -> Vec<Constraint> {
        self.validators
            .iter()
            .filter(|v| !v.check(self.value()))
            .map(Validator::constraint)
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.validators.iter().all(|v| v.check(self.value()))
    }

    /// User input: updates the value and marks the control dirty
    fn input(&mut self, value: String) {
        self.value = Some(value);
        self.dirty = true;
    }

    /// Programmatic update: flags are left alone
    fn patch(&mut self, value: Option<String>) {
        self.value = value;
    }

    fn reset(&mut self) {
        self.value = None;
        self.dirty = false;
        self.touched = false;
    }
}

/// The contact edit form
#[derive(Debug, Clone)]
pub struct ContactForm {
    controls: BTreeMap<Field, FormControl>,
}

impl ContactForm {
    /// Form with the contact validation rules
    ///
    /// Every field is required; the name must be 3 to 50 characters long.
    pub fn new() -> Self {
        Self::with_validators(|field| match field {
            Field::ContactName => vec![
                Validator::Required,
                Validator::MinLength(3),
                Validator::MaxLength(50),
            ],
            Field::ContactAddress | Field::ContactPhone | Field::ContactEmail => {
                vec![Validator::Required]
            }
        })
    }

    /// Form whose controls use the validators returned by `rules`
    pub fn with_validators(rules: impl Fn(Field) -> Vec<Validator>) -> Self {
        let controls = Field::ALL
            .into_iter()
            .map(|field| (field, FormControl::new(rules(field))))
            .collect();
        Self { controls }
    }

    /// The control bound to `field`
    pub fn control(&self, field: Field) -> &FormControl {
        &self.controls[&field]
    }

    pub fn controls(&self) -> impl Iterator<Item = (Field, &FormControl)> {
        self.controls.iter().map(|(field, control)| (*field, control))
    }

    pub fn value(&self, field: Field) -> Option<&str> {
        self.control(field).value()
    }

    pub fn is_valid(&self) -> bool {
        self.controls.values().all(FormControl::is_valid)
    }

    /// Whether the user changed any control since the last reset
    pub fn is_dirty(&self) -> bool {
        self.controls.values().any(FormControl::is_dirty)
    }

    pub fn is_touched(&self) -> bool {
        self.controls.values().any(FormControl::is_touched)
    }

    /// Apply user input to a control
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        self.control_mut(field).input(value.into());
    }

    /// Mark a control as touched (its input lost focus)
    pub fn touch(&mut self, field: Field) {
        self.control_mut(field).touched = true;
    }

    /// Copy every field of `contact` into the form without marking it dirty
    pub fn patch(&mut self, contact: &Contact) {
        for field in Field::ALL {
            self.control_mut(field).patch(field.read(contact));
        }
    }

    /// Clear values and interaction flags
    pub fn reset(&mut self) {
        self.controls.values_mut().for_each(FormControl::reset);
    }

    /// `contact` with every field replaced by the form value
    pub fn merge_into(&self, mut contact: Contact) -> Contact {
        for (field, control) in &self.controls {
            field.write(&mut contact, control.value.clone());
        }
        contact
    }

    fn control_mut(&mut self, field: Field) -> &mut FormControl {
        self.controls
            .entry(field)
            .or_insert_with(|| FormControl::new(Vec::new()))
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_null_and_empty() {
        assert!(!Validator::Required.check(None));
        assert!(!Validator::Required.check(Some("")));
        assert!(Validator::Required.check(Some(" ")));
    }

    #[test]
    fn test_length_validators_skip_empty_values() {
        assert!(Validator::MinLength(3).check(None));
        assert!(Validator::MinLength(3).check(Some("")));
        assert!(!Validator::MinLength(3).check(Some("Al")));
        assert!(Validator::MinLength(3).check(Some("Ada")));
        assert!(Validator::MaxLength(3).check(Some("Ada")));
        assert!(!Validator::MaxLength(3).check(Some("Adam")));
    }

    #[test]
    fn test_new_form_is_pristine_and_invalid() {
        let form = ContactForm::new();
        assert!(!form.is_dirty());
        assert!(!form.is_touched());
        assert!(!form.is_valid());
        assert_eq!(
            form.control(Field::ContactName).errors(),
            vec![Constraint::Required]
        );
    }

    #[test]
    fn test_errors_follow_declaration_order() {
        let mut form = ContactForm::new();
        form.input(Field::ContactName, "x".repeat(51));
        assert_eq!(
            form.control(Field::ContactName).errors(),
            vec![Constraint::MaxLength]
        );

        form.input(Field::ContactName, "Al");
        assert_eq!(
            form.control(Field::ContactName).errors(),
            vec![Constraint::MinLength]
        );
    }

    #[test]
    fn test_patch_does_not_dirty() {
        let mut form = ContactForm::new();
        let contact = Contact::new("Ada Lovelace")
            .with_id(1)
            .with_address("London")
            .with_phone("555")
            .with_email("ada@example.com");

        form.patch(&contact);
        assert!(!form.is_dirty());
        assert!(form.is_valid());
        assert_eq!(form.value(Field::ContactName), Some("Ada Lovelace"));
    }

    #[test]
    fn test_input_dirties_and_reset_clears() {
        let mut form = ContactForm::new();
        form.input(Field::ContactPhone, "555");
        form.touch(Field::ContactPhone);
        assert!(form.is_dirty());
        assert!(form.control(Field::ContactPhone).is_touched());

        form.reset();
        assert!(!form.is_dirty());
        assert!(!form.is_touched());
        assert_eq!(form.value(Field::ContactPhone), None);
    }

    #[test]
    fn test_merge_prefers_form_values() {
        let mut form = ContactForm::new();
        let original = Contact::new("Ada")
            .with_id(9)
            .with_address("Old address")
            .with_phone("555")
            .with_email("ada@example.com");
        form.patch(&original);
        form.input(Field::ContactAddress, "New address");

        let merged = form.merge_into(original.clone());
        assert_eq!(merged.id, 9);
        assert_eq!(merged.contact_address.as_deref(), Some("New address"));
        assert_eq!(merged.contact_name, original.contact_name);
    }

    #[test]
    fn test_parse_field_names() {
        assert_eq!("name".parse::<Field>(), Ok(Field::ContactName));
        assert_eq!("contactPhone".parse::<Field>(), Ok(Field::ContactPhone));
        assert_eq!("EMAIL".parse::<Field>(), Ok(Field::ContactEmail));
        assert!("birthday".parse::<Field>().is_err());
    }
}
