//! OpenStreetMap Nominatim provider.
//!
//! Forward search: `GET {base}/search?q=..&format=json&addressdetails=1&limit=..&countrycodes=..`
//! Reverse search: `GET {base}/reverse?lat=..&lon=..&format=json&addressdetails=1`
//! Both carry a fixed `Accept-Language` and `User-Agent`; no API key.

use super::error::GeocodeError;
use super::model::{AddressSuggestion, StructuredAddress};
use super::Geocoder;
use crate::config::GeocoderSettings;
use crate::http::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: u64,
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    address: Option<StructuredAddress>,
}

impl TryFrom<NominatimPlace> for AddressSuggestion {
    type Error = GeocodeError;

    fn try_from(place: NominatimPlace) -> Result<Self, Self::Error> {
        Ok(AddressSuggestion {
            place_id: place.place_id,
            latitude: parse_coordinate(&place.lat)?,
            longitude: parse_coordinate(&place.lon)?,
            label: place.display_name,
            address: place.address.unwrap_or_default(),
        })
    }
}

fn parse_coordinate(raw: &str) -> Result<f64, GeocodeError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::InvalidCoordinate(raw.to_string()))
}

#[derive(Debug, Deserialize)]
struct ReversePlace {
    #[serde(default)]
    display_name: Option<String>,
}

pub struct NominatimClient {
    transport: Arc<dyn HttpTransport>,
    settings: GeocoderSettings,
}

impl NominatimClient {
    pub fn new(transport: Arc<dyn HttpTransport>, settings: GeocoderSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    fn request(&self, endpoint: &str) -> HttpRequest {
        HttpRequest::get(format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            endpoint
        ))
        .header("Accept-Language", self.settings.accept_language.as_str())
        .header("User-Agent", self.settings.user_agent.as_str())
    }

    async fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, GeocodeError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(GeocodeError::Status(response.status));
        }
        Ok(response)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        let request = self
            .request("search")
            .query("q", query)
            .query("format", "json")
            .query("addressdetails", 1)
            .query("limit", limit)
            .query("countrycodes", self.settings.country_code.as_str());

        let places: Vec<NominatimPlace> = self.fetch(request).await?.parse()?;
        let total = places.len();
        let suggestions: Vec<AddressSuggestion> = places
            .into_iter()
            .filter_map(|place| match AddressSuggestion::try_from(place) {
                Ok(suggestion) => Some(suggestion),
                Err(e) => {
                    warn!(error = %e, "Dropping result");
                    None
                }
            })
            .collect();
        debug!(total, kept = suggestions.len(), "Search finished");
        Ok(suggestions)
    }

    #[instrument(skip(self))]
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>, GeocodeError> {
        let request = self
            .request("reverse")
            .query("lat", latitude)
            .query("lon", longitude)
            .query("format", "json")
            .query("addressdetails", 1);

        // Unresolvable points come back as `{"error": "..."}` with status 200.
        let place: ReversePlace = self.fetch(request).await?.parse()?;
        Ok(place.display_name)
    }
}
