use super::model::{AddressQuery, GeocodeResult, Rejection};
use super::Geocoder;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Final check of the assembled address right before an order is placed.
///
/// Runs one single-result query over the full street/ward/city triple and accepts it only
/// if the best match carries street-level detail (road, suburb or city). A whole province
/// resolving without any of those is rejected as too coarse.
#[derive(Clone)]
pub struct AddressValidationGate {
    geocoder: Arc<dyn Geocoder>,
}

impl AddressValidationGate {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    #[instrument(skip(self))]
    pub async fn validate(&self, street: &str, ward: &str, city: &str) -> GeocodeResult {
        if [street, ward, city].iter().any(|part| part.trim().is_empty()) {
            return GeocodeResult::rejected(Rejection::Incomplete);
        }

        let query = AddressQuery::new(street).with_ward(ward).with_city(city);
        let results = match self.geocoder.search(&query.to_query_string(), 1).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "Validation lookup failed");
                return GeocodeResult::rejected(Rejection::Unverifiable);
            }
        };

        let Some(best) = results.into_iter().next() else {
            info!("Address not found");
            return GeocodeResult::rejected(Rejection::NotFound);
        };

        if !best.address.is_specific() {
            info!(label = %best.label, "Address too coarse");
            return GeocodeResult::rejected(Rejection::NotSpecific);
        }

        info!(latitude = best.latitude, longitude = best.longitude, "Address verified");
        GeocodeResult::valid(best.latitude, best.longitude, best.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geocoding::testing::StubGeocoder;
    use crate::geocoding::{GeocodeError, StructuredAddress};
    use crate::http::TransportError;
    use rstest::rstest;

    fn gate(stub: &Arc<StubGeocoder>) -> AddressValidationGate {
        AddressValidationGate::new(stub.clone())
    }

    #[tokio::test]
    async fn test_result_with_road_is_valid() {
        let mut suggestion = StubGeocoder::suggestion(1, "123 Nguyễn Huệ, Bến Nghé, Hồ Chí Minh");
        suggestion.address = StructuredAddress {
            house_number: Some("123".into()),
            road: Some("Nguyễn Huệ".into()),
            ..Default::default()
        };
        let stub = Arc::new(StubGeocoder::with_results(vec![suggestion]));

        let result = gate(&stub)
            .validate("123 Nguyễn Huệ", "Bến Nghé", "Hồ Chí Minh")
            .await;

        assert!(result.is_valid);
        assert_eq!(
            result.formatted_address.as_deref(),
            Some("123 Nguyễn Huệ, Bến Nghé, Hồ Chí Minh")
        );
        assert!(result.latitude.is_some());
        assert_eq!(
            stub.searches(),
            vec![("123 Nguyễn Huệ, Bến Nghé, Hồ Chí Minh, Vietnam".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn test_province_only_result_is_not_specific() {
        let mut suggestion = StubGeocoder::suggestion(2, "Hồ Chí Minh, Việt Nam");
        suggestion.address = StructuredAddress {
            state: Some("Hồ Chí Minh".into()),
            country: Some("Việt Nam".into()),
            ..Default::default()
        };
        let stub = Arc::new(StubGeocoder::with_results(vec![suggestion]));

        let result = gate(&stub).validate("abc", "Bến Nghé", "Hồ Chí Minh").await;

        assert!(!result.is_valid);
        assert_eq!(result.rejection, Some(Rejection::NotSpecific));
        assert!(result.message().unwrap().contains("not specific enough"));
    }

    #[rstest]
    #[case("", "Bến Nghé", "Hồ Chí Minh")]
    #[case("12 Lê Lợi", " ", "Hồ Chí Minh")]
    #[case("12 Lê Lợi", "Bến Nghé", "")]
    #[tokio::test]
    async fn test_missing_part_is_rejected_without_lookup(
        #[case] street: &str,
        #[case] ward: &str,
        #[case] city: &str,
    ) {
        let stub = Arc::new(StubGeocoder::with_results(vec![]));
        let result = gate(&stub).validate(street, ward, city).await;
        assert_eq!(result.rejection, Some(Rejection::Incomplete));
        assert_eq!(stub.search_count(), 0);
    }

    #[tokio::test]
    async fn test_no_result_is_not_found() {
        let stub = Arc::new(StubGeocoder::with_results(vec![]));
        let result = gate(&stub).validate("1 Nowhere", "W", "C").await;
        assert_eq!(result.rejection, Some(Rejection::NotFound));
    }

    #[tokio::test]
    async fn test_provider_failure_is_unverifiable() {
        let stub = Arc::new(StubGeocoder::failing(GeocodeError::Transport(
            TransportError::Timeout("slow".into()),
        )));
        let result = gate(&stub).validate("1 Street", "W", "C").await;
        assert_eq!(result.rejection, Some(Rejection::Unverifiable));
    }
}
