//! In-memory [`Geocoder`] for tests and offline demos.

use super::{AddressSuggestion, GeocodeError, Geocoder, StructuredAddress};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

type Answer = Result<Vec<AddressSuggestion>, GeocodeError>;

/// Answers searches from a script, falling back to a fixed default answer.
///
/// Every search is recorded before any configured delay elapses, so a lookup that is
/// later cancelled still shows up in [`StubGeocoder::searches`].
pub struct StubGeocoder {
    default: Answer,
    scripted: Mutex<VecDeque<Answer>>,
    delay: Option<Duration>,
    place_name: Option<String>,
    searches: Mutex<Vec<(String, usize)>>,
}

impl StubGeocoder {
    pub fn with_results(results: Vec<AddressSuggestion>) -> Self {
        Self {
            default: Ok(results),
            scripted: Mutex::new(VecDeque::new()),
            delay: None,
            place_name: None,
            searches: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: GeocodeError) -> Self {
        Self {
            default: Err(error),
            ..Self::with_results(Vec::new())
        }
    }

    /// Sleep this long inside every search.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Name returned by reverse lookups.
    pub fn with_place_name(mut self, name: impl Into<String>) -> Self {
        self.place_name = Some(name.into());
        self
    }

    /// Queue a one-off answer for the next search.
    pub fn push_answer(&self, answer: Answer) {
        self.scripted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(answer);
    }

    /// A street-level suggestion whose road is the first segment of `label`.
    pub fn suggestion(place_id: u64, label: &str) -> AddressSuggestion {
        AddressSuggestion {
            place_id,
            label: label.to_string(),
            latitude: 10.7769,
            longitude: 106.7009,
            address: StructuredAddress {
                road: label.split(',').next().map(|s| s.trim().to_string()),
                ..Default::default()
            },
        }
    }

    /// `(query, limit)` of every search, in call order.
    pub fn searches(&self) -> Vec<(String, usize)> {
        self.searches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn search_count(&self) -> usize {
        self.searches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<AddressSuggestion>, GeocodeError> {
        self.searches
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((query.to_string(), limit));
        let scripted = self
            .scripted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.unwrap_or_else(|| self.default.clone())
    }

    async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<String>, GeocodeError> {
        match &self.default {
            Err(e) => Err(e.clone()),
            Ok(_) => Ok(self.place_name.clone()),
        }
    }
}
