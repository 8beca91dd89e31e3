//! cm-api: In-memory contacts backend
//!
//! Serves the `contacts` REST resource from an in-memory store.
//! Built with axum for async HTTP handling.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod store;

pub use error::{ApiError, Result};
pub use server::{app, serve, start_server};
pub use store::ContactStore;
