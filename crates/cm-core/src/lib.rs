//! cm-core: Contact Manager Core Library
//!
//! Shared contact model, configuration loading and core error types used by
//! the service client, the in-memory backend and the views.

pub mod config;
pub mod error;
pub mod model;

pub use config::{ApiConfig, ClientConfig, Config, ValidationConfig};
pub use error::{Error, Result};
pub use model::Contact;
