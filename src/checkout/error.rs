use super::form::FormError;
use crate::geocoding::Rejection;
use thiserror::Error;

/// Why a checkout attempt stopped before an order existed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Address(#[from] Rejection),

    /// Backend refused or could not be reached. Carries the backend message.
    #[error("{0}")]
    OrderFailed(String),
}
