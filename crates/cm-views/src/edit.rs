//! Contact edit view
//!
//! Owns the edit form for a single contact. User input and blur events feed a
//! debouncer; once the quiet window passes, validation messages are
//! recomputed. Saving and deleting go through [`ContactService`] and navigate
//! back to the list on success.

use std::sync::Arc;
use std::time::Duration;

use cm_contacts::ContactService;
use cm_core::Contact;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::confirm::Confirm;
use crate::debounce::Debouncer;
use crate::form::{ContactForm, Field};
use crate::route::{Navigator, Route};
use crate::validation::{DisplayMessages, GenericValidator, VALIDATION_SUMMARY};

/// Events that schedule a validation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// Any control value changed
    ValueChanged,
    /// An input lost focus
    Blur(Field),
}

/// Result of [`ContactEdit::save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Created or updated, then navigated to the list
    Saved,
    /// Nothing changed; navigated to the list without a request
    Unchanged,
    /// Form invalid; nothing sent
    Invalid,
    /// The service call failed; the form is left as is
    Failed,
}

/// Result of [`ContactEdit::delete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Deleted on the backend, then navigated to the list
    Deleted,
    /// The contact was never saved; navigated to the list without a request
    Discarded,
    /// The user declined the confirmation
    Declined,
    /// The service call failed
    Failed,
}

/// Edit form for one contact, new (id `0`) or existing
pub struct ContactEdit {
    service: ContactService,
    confirm: Arc<dyn Confirm>,
    navigator: Arc<dyn Navigator>,
    validator: GenericValidator,
    page_title: String,
    error_message: Option<String>,
    form: ContactForm,
    contact: Option<Contact>,
    display_message: DisplayMessages,
    events: Debouncer<FormEvent>,
    route: Option<watch::Receiver<Route>>,
}

impl ContactEdit {
    /// Unloaded view; validation waits `quiet_window` after the last event
    pub fn new(
        service: ContactService,
        confirm: Arc<dyn Confirm>,
        navigator: Arc<dyn Navigator>,
        quiet_window: Duration,
    ) -> Self {
        Self {
            service,
            confirm,
            navigator,
            validator: GenericValidator::default(),
            page_title: "Contact Edit".to_string(),
            error_message: None,
            form: ContactForm::new(),
            contact: None,
            display_message: DisplayMessages::default(),
            events: Debouncer::new(quiet_window),
            route: None,
        }
    }

    /// Replace the validation message table
    pub fn with_validator(mut self, validator: GenericValidator) -> Self {
        self.validator = validator;
        self
    }

    /// `Add Contact` or `Edit Contact: {name}` once loaded
    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    /// Last load, save or delete failure, or the validation summary
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Record as last loaded; form edits are not reflected here
    pub fn contact(&self) -> Option<&Contact> {
        self.contact.as_ref()
    }

    /// Messages from the last validation pass
    pub fn display_message(&self) -> &DisplayMessages {
        &self.display_message
    }

    /// Load a contact into the form; id `0` starts a new contact
    pub async fn load(&mut self, id: u64) {
        match self.service.get_contact(id).await {
            Ok(contact) => self.display_contact(contact),
            Err(e) => self.error_message = Some(e.to_string()),
        }
    }

    fn display_contact(&mut self, contact: Contact) {
        self.form.reset();

        self.page_title = if contact.is_new() {
            "Add Contact".to_string()
        } else {
            format!("Edit Contact: {}", contact.name())
        };

        self.form.patch(&contact);
        self.contact = Some(contact);
        self.events.push(FormEvent::ValueChanged);
    }

    /// User typed into `field`
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        self.form.input(field, value);
        self.events.push(FormEvent::ValueChanged);
    }

    /// `field` lost focus
    pub fn blur(&mut self, field: Field) {
        self.form.touch(field);
        self.events.push(FormEvent::Blur(field));
    }

    /// Whether a validation pass is waiting for its quiet window
    pub fn validation_pending(&self) -> bool {
        self.events.is_pending()
    }

    /// Wait for the pending burst of events to settle, then re-validate
    ///
    /// Cancel safe; never resolves while no event is pending.
    pub async fn next_validation(&mut self) -> &DisplayMessages {
        let event = self.events.settled().await;
        debug!(?event, "Re-validating contact form");
        self.display_message = self.validator.process_messages(&self.form);
        &self.display_message
    }

    /// Create or update the contact from the form, then go back to the list
    pub async fn save(&mut self) -> SaveOutcome {
        if !self.form.is_valid() {
            self.error_message = Some(VALIDATION_SUMMARY.to_string());
            return SaveOutcome::Invalid;
        }

        if !self.form.is_dirty() {
            self.on_save_complete();
            return SaveOutcome::Unchanged;
        }

        let original = self.contact.clone().unwrap_or_else(Contact::blank);
        let contact = self.form.merge_into(original);

        let result = if contact.is_new() {
            self.service.create_contact(&contact).await
        } else {
            self.service.update_contact(contact).await
        };

        match result {
            Ok(saved) => {
                info!("Saved contact {}", saved.id);
                self.on_save_complete();
                SaveOutcome::Saved
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                SaveOutcome::Failed
            }
        }
    }

    /// Delete the loaded contact after the user confirms
    pub async fn delete(&mut self) -> DeleteOutcome {
        let saved = self
            .contact
            .as_ref()
            .filter(|contact| !contact.is_new())
            .map(|contact| (contact.id, contact.name().to_string()));

        let Some((id, name)) = saved else {
            // Never saved, nothing to delete
            self.on_save_complete();
            return DeleteOutcome::Discarded;
        };

        let message = format!("Are you sure you want to delete {}?", name);
        if !self.confirm.confirm(&message).await {
            return DeleteOutcome::Declined;
        }

        match self.service.delete_contact(id).await {
            Ok(()) => {
                self.on_save_complete();
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                DeleteOutcome::Failed
            }
        }
    }

    /// Clear the form flags and go back to the list
    fn on_save_complete(&mut self) {
        self.form.reset();
        self.events.cancel();
        self.display_message = DisplayMessages::default();
        self.navigator.navigate(Route::List);
    }

    /// Follow route changes; edit routes reload the form
    ///
    /// The current route is loaded right away.
    pub async fn follow_route(&mut self, mut route: watch::Receiver<Route>) {
        let current = *route.borrow_and_update();
        self.route = Some(route);

        if let Route::Edit(id) = current {
            self.load(id).await;
        }
    }

    /// Wait for the next route change
    ///
    /// Returns `true` when the change reloaded the form. Returns `false`
    /// right away once the subscription is released or its sender is gone.
    pub async fn route_changed(&mut self) -> bool {
        let Some(route) = self.route.as_mut() else {
            return false;
        };

        if route.changed().await.is_err() {
            self.route = None;
            return false;
        }

        let current = *route.borrow_and_update();
        match current {
            Route::Edit(id) => {
                self.load(id).await;
                true
            }
            _ => false,
        }
    }

    /// Tear down: release the route subscription and pending validation
    pub fn destroy(&mut self) {
        if self.route.take().is_some() {
            debug!("Released route subscription");
        }
        self.events.cancel();
    }
}
