use super::{BackendClient, Page};
use crate::http::{ApiResponse, Messages, Method};
use crate::model::{CreateRatingRequest, Rating, RatingFilter, UpdateRatingRequest};
use async_trait::async_trait;
use tracing::instrument;

const LIST: Messages<'static> = Messages::new("Ratings loaded", "Could not load ratings");
const AVERAGE: Messages<'static> = Messages::new("Average loaded", "Could not load the average rating");
const CREATE: Messages<'static> = Messages::new("Thanks for your rating", "Could not submit the rating");
const UPDATE: Messages<'static> = Messages::new("Rating updated", "Could not update the rating");
const STATUS: Messages<'static> = Messages::new("Rating status changed", "Could not change the rating status");
const DELETE: Messages<'static> = Messages::new("Rating deleted", "Could not delete the rating");

#[async_trait]
pub trait RatingApi: Send + Sync {
    async fn list_ratings(&self, page: Page) -> ApiResponse<Vec<Rating>>;
    async fn ratings_by_account(&self, account_id: &str, page: Page) -> ApiResponse<Vec<Rating>>;
    async fn ratings_by_product(&self, product_id: &str, page: Page) -> ApiResponse<Vec<Rating>>;
    async fn average_rating(&self, product_id: &str) -> ApiResponse<f64>;
    async fn create_rating(&self, request: &CreateRatingRequest) -> ApiResponse<Rating>;
    async fn update_rating(&self, rating_id: &str, request: &UpdateRatingRequest) -> ApiResponse<Rating>;

    /// Flip visibility. The backend decides the new status and returns the rating.
    async fn change_rating_status(&self, rating_id: &str) -> ApiResponse<Rating>;

    async fn delete_rating(&self, rating_id: &str) -> ApiResponse<()>;

    /// One page of ratings narrowed by `filter` on the client. Pagination counters
    /// still describe the unfiltered page.
    async fn filter_ratings(&self, filter: &RatingFilter, page: Page) -> ApiResponse<Vec<Rating>> {
        let response = self.list_ratings(page).await;
        ApiResponse {
            data: response
                .data
                .map(|ratings| ratings.into_iter().filter(|r| filter.matches(r)).collect()),
            ..response
        }
    }
}

#[async_trait]
impl RatingApi for BackendClient {
    #[instrument(skip(self))]
    async fn list_ratings(&self, page: Page) -> ApiResponse<Vec<Rating>> {
        self.call(page.apply(self.request(Method::GET, "/rating")), LIST).await
    }

    #[instrument(skip(self))]
    async fn ratings_by_account(&self, account_id: &str, page: Page) -> ApiResponse<Vec<Rating>> {
        let request = self.request(Method::GET, &format!("/rating/account/{account_id}"));
        self.call(page.apply(request), LIST).await
    }

    #[instrument(skip(self))]
    async fn ratings_by_product(&self, product_id: &str, page: Page) -> ApiResponse<Vec<Rating>> {
        let request = self.request(Method::GET, &format!("/rating/product/{product_id}"));
        self.call(page.apply(request), LIST).await
    }

    #[instrument(skip(self))]
    async fn average_rating(&self, product_id: &str) -> ApiResponse<f64> {
        let path = format!("/rating/product/{product_id}/average");
        self.call(self.request(Method::GET, &path), AVERAGE).await
    }

    #[instrument(skip(self, request))]
    async fn create_rating(&self, request: &CreateRatingRequest) -> ApiResponse<Rating> {
        self.call_json(self.request(Method::POST, "/rating"), request, CREATE)
            .await
    }

    #[instrument(skip(self, request))]
    async fn update_rating(&self, rating_id: &str, request: &UpdateRatingRequest) -> ApiResponse<Rating> {
        let path = format!("/rating/{rating_id}");
        self.call_json(self.request(Method::PUT, &path), request, UPDATE)
            .await
    }

    #[instrument(skip(self))]
    async fn change_rating_status(&self, rating_id: &str) -> ApiResponse<Rating> {
        let path = format!("/rating/{rating_id}/status");
        self.call(self.request(Method::PATCH, &path), STATUS).await
    }

    #[instrument(skip(self))]
    async fn delete_rating(&self, rating_id: &str) -> ApiResponse<()> {
        self.call_unit(self.request(Method::DELETE, &format!("/rating/{rating_id}")), DELETE)
            .await
    }
}
