//! Interactive yes/no confirmation
//!
//! Used by the deactivation guard and the delete flow. Front-ends provide
//! their own implementation (terminal prompt, modal dialog, ...).

use async_trait::async_trait;

/// Ask the user to confirm an action
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Show `message` and resolve to `true` when the user accepts
    async fn confirm(&self, message: &str) -> bool;
}
