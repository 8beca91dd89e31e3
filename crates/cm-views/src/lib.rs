//! cm-views: Contact Manager view layer
//!
//! Front-end independent view state for the contact manager: the list with
//! its client-side filter, the read-only detail page and the edit form with
//! debounced validation, its save/delete flows and the unsaved-changes guard.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cm_views::{ContactEdit, ContactEditGuard, Field, Route, Router};
//!
//! let router = Arc::new(Router::new(Route::Edit(0)));
//! let mut edit = ContactEdit::new(service, confirm.clone(), router.clone(), quiet_window);
//! edit.follow_route(router.subscribe()).await;
//!
//! edit.input(Field::ContactName, "Ada Lovelace");
//! let messages = edit.next_validation().await;
//! ```

pub mod confirm;
pub mod debounce;
pub mod detail;
pub mod edit;
pub mod form;
pub mod guard;
pub mod list;
pub mod route;
pub mod validation;

#[cfg(test)]
mod testing;

pub use confirm::Confirm;
pub use debounce::Debouncer;
pub use detail::ContactDetail;
pub use edit::{ContactEdit, DeleteOutcome, FormEvent, SaveOutcome};
pub use form::{Constraint, ContactForm, Field, FormControl, Validator};
pub use guard::ContactEditGuard;
pub use list::ContactList;
pub use route::{Navigator, Route, Router};
pub use validation::{CONTACT_VALIDATION_MESSAGES, DisplayMessages, GenericValidator};
