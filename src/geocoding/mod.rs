//! # Geocoding
//!
//! Address lookup against a third-party geocoding provider.
//!
//! - [`Geocoder`]: the provider seam (forward + reverse search).
//! - [`NominatimClient`]: the OpenStreetMap implementation over [`HttpTransport`](crate::http::HttpTransport).
//! - [`AddressSuggestionClient`]: typing-time lookups returning a [`LookupOutcome`].
//! - [`AddressValidationGate`]: the strict pre-order check returning a [`GeocodeResult`].

mod error;
mod model;
mod nominatim;
mod suggestion;
pub mod testing;
mod validation;

pub use error::GeocodeError;
pub use model::*;
pub use nominatim::NominatimClient;
pub use suggestion::AddressSuggestionClient;
pub use validation::AddressValidationGate;

use async_trait::async_trait;

/// A geocoding provider.
#[async_trait]
pub trait Geocoder: Send + Sync + 'static {
    /// Forward search for a free-text query, at most `limit` candidates, best first.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<AddressSuggestion>, GeocodeError>;

    /// Display name of the place at the given coordinates, if any.
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>, GeocodeError>;
}
