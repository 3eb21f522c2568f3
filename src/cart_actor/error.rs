//! Error types for the guest cart actor.

use thiserror::Error;

/// Errors that can occur during guest cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// Quantities must be at least 1. Use `Remove` to drop a line.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// No line with this cart item id.
    #[error("Cart item not found: {0}")]
    ItemNotFound(String),

    /// The storage backend could not be read or written.
    #[error("Cart storage error: {0}")]
    Storage(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}

impl From<std::io::Error> for CartError {
    fn from(e: std::io::Error) -> Self {
        CartError::Storage(e.to_string())
    }
}
