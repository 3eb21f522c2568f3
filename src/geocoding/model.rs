//! Address data carried between the geocoder, the autocomplete session and checkout.

use serde::{Deserialize, Serialize};

/// Country appended to every free-text query.
pub const COUNTRY_SUFFIX: &str = "Vietnam";

/// Structured sub-fields of a provider result (`addressdetails=1`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredAddress {
    pub house_number: Option<String>,
    pub road: Option<String>,
    pub suburb: Option<String>,
    pub quarter: Option<String>,
    pub neighbourhood: Option<String>,
    pub village: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postcode: Option<String>,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl StructuredAddress {
    /// Street-level detail check: at least one of road, suburb or city.
    pub fn is_specific(&self) -> bool {
        present(&self.road).is_some()
            || present(&self.suburb).is_some()
            || present(&self.city).is_some()
    }

    /// House number and road, falling back to the most local area name.
    pub fn street_line(&self) -> Option<String> {
        match (present(&self.house_number), present(&self.road)) {
            (Some(number), Some(road)) => Some(format!("{} {}", number, road)),
            (None, Some(road)) => Some(road.to_string()),
            _ => self.local_area().map(str::to_string),
        }
    }

    pub fn ward(&self) -> Option<&str> {
        self.local_area().or_else(|| present(&self.village))
    }

    pub fn city_name(&self) -> Option<&str> {
        present(&self.city)
            .or_else(|| present(&self.town))
            .or_else(|| present(&self.county))
            .or_else(|| present(&self.state))
    }

    fn local_area(&self) -> Option<&str> {
        present(&self.suburb)
            .or_else(|| present(&self.quarter))
            .or_else(|| present(&self.neighbourhood))
    }
}

/// One candidate returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    /// Provider-assigned identifier.
    pub place_id: u64,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub address: StructuredAddress,
}

/// Free-text street plus optional administrative context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressQuery {
    pub street: String,
    pub ward: Option<String>,
    pub city: Option<String>,
}

impl AddressQuery {
    pub fn new(street: impl Into<String>) -> Self {
        Self {
            street: street.into(),
            ward: None,
            city: None,
        }
    }

    pub fn with_ward(mut self, ward: impl Into<String>) -> Self {
        self.ward = Some(ward.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Character count of the trimmed street.
    pub fn street_chars(&self) -> usize {
        self.street.trim().chars().count()
    }

    /// `"<street>, <ward>, <city>, Vietnam"` with absent or blank parts left out.
    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(4);
        for part in [
            Some(self.street.as_str()),
            self.ward.as_deref(),
            self.city.as_deref(),
        ]
        .into_iter()
        .flatten()
        {
            let part = part.trim();
            if !part.is_empty() {
                parts.push(part);
            }
        }
        parts.push(COUNTRY_SUFFIX);
        parts.join(", ")
    }
}

/// The suggestion the user explicitly picked, with the form fields derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedAddress {
    pub suggestion: AddressSuggestion,
    pub street: String,
    pub ward: Option<String>,
    pub city: Option<String>,
}

impl SelectedAddress {
    pub fn latitude(&self) -> f64 {
        self.suggestion.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.suggestion.longitude
    }

    pub fn label(&self) -> &str {
        &self.suggestion.label
    }
}

impl From<AddressSuggestion> for SelectedAddress {
    fn from(suggestion: AddressSuggestion) -> Self {
        let street = suggestion.address.street_line().unwrap_or_else(|| {
            suggestion
                .label
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string()
        });
        let ward = suggestion.address.ward().map(str::to_string);
        let city = suggestion.address.city_name().map(str::to_string);
        Self {
            suggestion,
            street,
            ward,
            city,
        }
    }
}

/// Result of a free-text lookup. Distinguishes "no matches" from "provider unreachable".
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Vec<AddressSuggestion>),
    Empty,
    Failed(String),
}

impl LookupOutcome {
    pub fn from_results(results: Vec<AddressSuggestion>) -> Self {
        if results.is_empty() {
            LookupOutcome::Empty
        } else {
            LookupOutcome::Found(results)
        }
    }

    /// Candidates, empty for `Empty` and `Failed`.
    pub fn suggestions(&self) -> &[AddressSuggestion] {
        match self {
            LookupOutcome::Found(list) => list,
            _ => &[],
        }
    }

    pub fn into_suggestions(self) -> Vec<AddressSuggestion> {
        match self {
            LookupOutcome::Found(list) => list,
            _ => Vec::new(),
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            LookupOutcome::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Why a final validation query rejected an address. `Display` is the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Please fill in the complete address")]
    Incomplete,
    #[error("Address not found. Please check the street name")]
    NotFound,
    #[error("Address is not specific enough. Please enter the house number and street name")]
    NotSpecific,
    #[error("Could not verify the address. Please try again")]
    Unverifiable,
}

/// Outcome of [`AddressValidationGate::validate`](super::AddressValidationGate::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub is_valid: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub formatted_address: Option<String>,
    pub rejection: Option<Rejection>,
}

impl GeocodeResult {
    pub fn valid(latitude: f64, longitude: f64, formatted_address: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            latitude: Some(latitude),
            longitude: Some(longitude),
            formatted_address: Some(formatted_address.into()),
            rejection: None,
        }
    }

    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            is_valid: false,
            latitude: None,
            longitude: None,
            formatted_address: None,
            rejection: Some(rejection),
        }
    }

    /// Human-readable rejection reason.
    pub fn message(&self) -> Option<String> {
        self.rejection.map(|r| r.to_string())
    }
}
