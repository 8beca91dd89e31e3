//! Navigation guard for the edit view

use std::sync::Arc;

use tracing::debug;

use crate::confirm::Confirm;
use crate::edit::ContactEdit;
use crate::form::Field;

/// Asks before leaving an edit form with unsaved changes
pub struct ContactEditGuard {
    confirm: Arc<dyn Confirm>,
}

impl ContactEditGuard {
    pub fn new(confirm: Arc<dyn Confirm>) -> Self {
        Self { confirm }
    }

    /// Whether navigation away from `component` may proceed
    ///
    /// A clean form passes without prompting. Declining leaves the form
    /// untouched.
    pub async fn can_deactivate(&self, component: &ContactEdit) -> bool {
        if !component.form().is_dirty() {
            return true;
        }

        let name = component
            .form()
            .value(Field::ContactName)
            .filter(|name| !name.is_empty())
            .unwrap_or("New Contact");

        let message = format!(
            "Changes haven't been saved to {}. Are you sure you want to exit.",
            name
        );
        let accepted = self.confirm.confirm(&message).await;
        debug!(accepted, "Unsaved changes prompt answered");
        accepted
    }
}
