//! Error types for the address autocomplete session.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AutocompleteError {
    /// The picked place is not in the current suggestion list.
    #[error("Unknown suggestion: {0}")]
    UnknownSuggestion(u64),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AutocompleteError {
    fn from(msg: String) -> Self {
        AutocompleteError::ActorCommunicationError(msg)
    }
}
