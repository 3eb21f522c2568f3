use super::model::{AddressQuery, LookupOutcome};
use super::Geocoder;
use crate::config::GeocoderSettings;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Free-text address lookup used while the user types.
///
/// Each call is independent. Short streets are answered locally with
/// [`LookupOutcome::Empty`]; provider failures come back as [`LookupOutcome::Failed`]
/// instead of an error, so a broken provider degrades to an empty list.
#[derive(Clone)]
pub struct AddressSuggestionClient {
    geocoder: Arc<dyn Geocoder>,
    limit: usize,
    min_chars: usize,
}

impl AddressSuggestionClient {
    pub fn new(geocoder: Arc<dyn Geocoder>, settings: &GeocoderSettings) -> Self {
        Self {
            geocoder,
            limit: settings.suggestion_limit,
            min_chars: settings.min_query_chars,
        }
    }

    /// Minimum trimmed street length that triggers a provider call.
    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    pub fn accepts(&self, query: &AddressQuery) -> bool {
        query.street_chars() >= self.min_chars
    }

    #[instrument(skip(self), fields(street = %query.street))]
    pub async fn suggest(&self, query: &AddressQuery) -> LookupOutcome {
        if !self.accepts(query) {
            debug!("Street too short, skipping lookup");
            return LookupOutcome::Empty;
        }

        match self
            .geocoder
            .search(&query.to_query_string(), self.limit)
            .await
        {
            Ok(results) => {
                debug!(count = results.len(), "Suggestions received");
                LookupOutcome::from_results(results)
            }
            Err(e) => {
                warn!(error = %e, "Suggestion lookup failed");
                LookupOutcome::Failed(e.to_string())
            }
        }
    }

    /// Display name for a coordinate pair, `None` if unknown or the provider failed.
    #[instrument(skip(self))]
    pub async fn reverse(&self, latitude: f64, longitude: f64) -> Option<String> {
        match self.geocoder.reverse(latitude, longitude).await {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "Reverse lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::geocoding::testing::StubGeocoder;
    use crate::geocoding::GeocodeError;
    use crate::http::TransportError;

    fn client(stub: &Arc<StubGeocoder>) -> AddressSuggestionClient {
        AddressSuggestionClient::new(stub.clone(), &Settings::default().geocoder)
    }

    #[tokio::test]
    async fn test_short_street_never_reaches_provider() {
        let stub = Arc::new(StubGeocoder::with_results(vec![StubGeocoder::suggestion(1, "x")]));
        let suggestions = client(&stub);

        for street in ["", "a", "ab", "  ab  "] {
            let outcome = suggestions.suggest(&AddressQuery::new(street)).await;
            assert_eq!(outcome, LookupOutcome::Empty);
        }
        assert_eq!(stub.search_count(), 0);
    }

    #[tokio::test]
    async fn test_query_includes_context_and_limit() {
        let stub = Arc::new(StubGeocoder::with_results(vec![StubGeocoder::suggestion(1, "x")]));
        let query = AddressQuery::new("12 Lê Lợi").with_ward("Bến Nghé").with_city("Hồ Chí Minh");

        let outcome = client(&stub).suggest(&query).await;

        assert_eq!(outcome.suggestions().len(), 1);
        assert_eq!(
            stub.searches(),
            vec![("12 Lê Lợi, Bến Nghé, Hồ Chí Minh, Vietnam".to_string(), 10)]
        );
    }

    #[tokio::test]
    async fn test_no_matches_is_empty_not_failure() {
        let stub = Arc::new(StubGeocoder::with_results(vec![]));
        let outcome = client(&stub).suggest(&AddressQuery::new("zzz")).await;
        assert_eq!(outcome, LookupOutcome::Empty);
    }

    #[tokio::test]
    async fn test_provider_error_is_reported_as_failed() {
        let stub = Arc::new(StubGeocoder::failing(GeocodeError::Transport(
            TransportError::Connect("refused".into()),
        )));
        let outcome = client(&stub).suggest(&AddressQuery::new("123 Nguyễn Huệ")).await;
        assert!(outcome.suggestions().is_empty());
        assert!(outcome.failure_reason().unwrap().contains("refused"));
    }

    #[tokio::test]
    async fn test_reverse_swallows_errors() {
        let stub = Arc::new(StubGeocoder::failing(GeocodeError::Status(500)));
        assert_eq!(client(&stub).reverse(1.0, 2.0).await, None);
    }
}
