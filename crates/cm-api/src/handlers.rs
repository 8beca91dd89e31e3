//! HTTP API handlers
//!
//! Request handlers for the `contacts` resource.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use tracing::{debug, info};

use cm_core::Contact;

use crate::error::{ApiError, Result};
use crate::server::AppState;

/// Contact id from the path; bad ids answer with a JSON error body
type ContactId = WithRejection<Path<u64>, ApiError>;

/// Contact from the request body; bad bodies answer with a JSON error body
type ContactBody = WithRejection<Json<Contact>, ApiError>;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// List every contact
pub async fn list_contacts(State(state): State<AppState>) -> Json<Vec<Contact>> {
    let contacts = state.store.list().await;
    debug!("Listing {} contacts", contacts.len());
    Json(contacts)
}

/// Get a single contact
pub async fn get_contact(
    State(state): State<AppState>,
    WithRejection(Path(id), _): ContactId,
) -> Result<Json<Contact>> {
    debug!("Get contact request: {}", id);
    Ok(Json(state.store.get(id).await?))
}

/// Create a contact; unsaved records receive a fresh id
pub async fn create_contact(
    State(state): State<AppState>,
    WithRejection(Json(contact), _): ContactBody,
) -> Result<(StatusCode, Json<Contact>)> {
    let created = state.store.create(contact).await?;
    info!("Created contact {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace a contact
pub async fn update_contact(
    State(state): State<AppState>,
    WithRejection(Path(id), _): ContactId,
    WithRejection(Json(contact), _): ContactBody,
) -> Result<StatusCode> {
    state.store.update(id, contact).await?;
    info!("Updated contact {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a contact
pub async fn delete_contact(
    State(state): State<AppState>,
    WithRejection(Path(id), _): ContactId,
) -> Result<StatusCode> {
    state.store.delete(id).await?;
    info!("Deleted contact {}", id);
    Ok(StatusCode::NO_CONTENT)
}
