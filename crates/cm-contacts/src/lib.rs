//! cm-contacts: HTTP client for the contacts resource
//!
//! ## Features
//!
//! - List, fetch, create, update and delete contacts over REST
//! - Blank contact for id `0` without a network call
//! - One normalized, display-ready error per failure
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cm_contacts::ContactService;
//! use cm_core::{ClientConfig, Contact};
//!
//! let service = ContactService::new(&ClientConfig::new("http://localhost:3000"))?;
//!
//! // Get all contacts
//! let contacts = service.get_contacts().await?;
//!
//! // Add contact
//! let contact = Contact::new("Ada Lovelace").with_email("ada@example.com");
//! let created = service.create_contact(&contact).await?;
//! ```

pub mod client;
pub mod error;

pub use client::ContactService;
pub use error::{Result, ServiceError};
