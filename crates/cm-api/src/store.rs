//! In-memory contact store
//!
//! Records are kept in insertion order, which is the order `list` returns.

use std::path::Path;

use cm_core::Contact;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{ApiError, Result};

/// In-memory store backing the REST handlers
#[derive(Debug, Default)]
pub struct ContactStore {
    contacts: RwLock<Vec<Contact>>,
}

impl ContactStore {
    /// Create a store holding `contacts`
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RwLock::new(contacts),
        }
    }

    /// Create a store with the built-in sample contacts
    pub fn seeded() -> Self {
        Self::new(sample_contacts())
    }

    /// Load the initial contacts from a JSON array file
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(cm_core::Error::from)?;
        let contacts: Vec<Contact> =
            serde_json::from_str(&content).map_err(cm_core::Error::from)?;

        info!("Loaded {} seed contacts from {}", contacts.len(), path.display());
        Ok(Self::new(contacts))
    }

    pub async fn list(&self) -> Vec<Contact> {
        self.contacts.read().await.clone()
    }

    pub async fn get(&self, id: u64) -> Result<Contact> {
        self.contacts
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(ApiError::NotFound(id))
    }

    /// Insert a contact, assigning `max(id) + 1` to unsaved records
    pub async fn create(&self, mut contact: Contact) -> Result<Contact> {
        let mut contacts = self.contacts.write().await;

        if contact.is_new() {
            contact.id = contacts
                .iter()
                .map(|c| c.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or(ApiError::IdsExhausted)?;
        } else if contacts.iter().any(|c| c.id == contact.id) {
            return Err(ApiError::Conflict(contact.id));
        }

        contacts.push(contact.clone());
        Ok(contact)
    }

    /// Replace the contact stored under `id`
    pub async fn update(&self, id: u64, contact: Contact) -> Result<()> {
        if contact.id != id {
            return Err(ApiError::IdMismatch {
                path: id,
                body: contact.id,
            });
        }

        let mut contacts = self.contacts.write().await;
        let slot = contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ApiError::NotFound(id))?;
        *slot = contact;
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        let mut contacts = self.contacts.write().await;
        let index = contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(ApiError::NotFound(id))?;
        contacts.remove(index);
        Ok(())
    }
}

fn sample_contacts() -> Vec<Contact> {
    vec![
        Contact::new("Ada Lovelace")
            .with_id(1)
            .with_address("12 St James's Square, London")
            .with_phone("020 7946 0001")
            .with_email("ada@example.com"),
        Contact::new("Grace Hopper")
            .with_id(2)
            .with_address("1 Navy Yard, Arlington")
            .with_phone("703-555-0142")
            .with_email("grace@example.com"),
        Contact::new("Alan Turing")
            .with_id(3)
            .with_address("Bletchley Park, Milton Keynes")
            .with_phone("01908 640404")
            .with_email("alan@example.com"),
        Contact::new("Katherine Johnson")
            .with_id(4)
            .with_address("Langley Research Center, Hampton")
            .with_phone("757-555-0199")
            .with_email("katherine@example.com"),
        Contact::new("Edsger Dijkstra")
            .with_id(5)
            .with_address("Nuenen, Netherlands")
            .with_phone("+31 40 555 0123")
            .with_email("edsger@example.com"),
    ]
}
