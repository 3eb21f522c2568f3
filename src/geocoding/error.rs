use crate::http::TransportError;

/// Errors raised by a [`Geocoder`](super::Geocoder) implementation.
///
/// These never reach the UI directly: the suggestion client turns them into
/// [`LookupOutcome::Failed`](super::LookupOutcome::Failed) and the validation gate into
/// [`Rejection::Unverifiable`](super::Rejection::Unverifiable).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodeError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("invalid coordinate '{0}'")]
    InvalidCoordinate(String),
}
