//! Error types (cm-app)

use cm_views::form::UnknownField;
use cm_views::route::UnknownRoute;
use thiserror::Error;

/// Problems with a command typed at the CLI prompt
///
/// These never end the session; they are printed and the prompt returns.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type help for the command list.")]
    Unknown(String),

    #[error(transparent)]
    Route(#[from] UnknownRoute),

    #[error(transparent)]
    Field(#[from] UnknownField),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{command}' is only available in the {view} view")]
    WrongView {
        command: &'static str,
        view: &'static str,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CommandError>;
