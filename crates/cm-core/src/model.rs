//! Contact data model

use serde::{Deserialize, Serialize};

/// Id carried by a contact that has never been persisted
pub const NEW_CONTACT_ID: u64 = 0;

/// Contact record as exchanged with the `contacts` resource
///
/// String fields are nullable on the wire: a blank contact has every field
/// set to `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Identifier, `0` until the backend assigns one
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: u64,
    /// Display name
    #[serde(default)]
    pub contact_name: Option<String>,
    /// Postal address
    #[serde(default)]
    pub contact_address: Option<String>,
    /// Phone number
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// Email address
    #[serde(default)]
    pub contact_email: Option<String>,
}

impl Contact {
    /// Create a new, unsaved contact with a name
    pub fn new(contact_name: impl Into<String>) -> Self {
        Self {
            contact_name: Some(contact_name.into()),
            ..Default::default()
        }
    }

    /// Blank contact used for the "add contact" flow
    pub fn blank() -> Self {
        Self::default()
    }

    /// Whether this contact has never been persisted
    pub fn is_new(&self) -> bool {
        self.id == NEW_CONTACT_ID
    }

    /// Name or empty string when unset
    pub fn name(&self) -> &str {
        self.contact_name.as_deref().unwrap_or_default()
    }

    /// Set the id
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    /// Set address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.contact_address = Some(address.into());
        self
    }

    /// Set phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    /// Set email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }
}

/// `null` ids (as sent on create) read back as the unsaved sentinel
fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(NEW_CONTACT_ID))
}
