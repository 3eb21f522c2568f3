use super::{BackendClient, Page};
use crate::http::{ApiResponse, Messages, Method};
use crate::model::{CreateDroneRequest, Drone, UpdateDroneRequest};
use async_trait::async_trait;
use tracing::instrument;

const LIST: Messages<'static> = Messages::new("Drones loaded", "Could not load drones");
const GET: Messages<'static> = Messages::new("Drone loaded", "Could not load the drone");
const CREATE: Messages<'static> = Messages::new("Drone registered", "Could not register the drone");
const UPDATE: Messages<'static> = Messages::new("Drone updated", "Could not update the drone");
const STATUS: Messages<'static> = Messages::new("Drone status changed", "Could not change the drone status");

#[async_trait]
pub trait DroneApi: Send + Sync {
    async fn drones_by_restaurant(&self, restaurant_id: &str, page: Page) -> ApiResponse<Vec<Drone>>;
    async fn get_drone(&self, drone_id: &str) -> ApiResponse<Drone>;
    async fn create_drone(&self, request: &CreateDroneRequest) -> ApiResponse<Drone>;
    async fn update_drone(&self, drone_id: &str, request: &UpdateDroneRequest) -> ApiResponse<Drone>;
    /// Server-side toggle, like the rating status.
    async fn change_drone_status(&self, drone_id: &str) -> ApiResponse<Drone>;
}

#[async_trait]
impl DroneApi for BackendClient {
    #[instrument(skip(self))]
    async fn drones_by_restaurant(&self, restaurant_id: &str, page: Page) -> ApiResponse<Vec<Drone>> {
        let request = self.request(Method::GET, &format!("/drones/restaurant/{restaurant_id}"));
        self.call(page.apply(request), LIST).await
    }

    #[instrument(skip(self))]
    async fn get_drone(&self, drone_id: &str) -> ApiResponse<Drone> {
        self.call(self.request(Method::GET, &format!("/drones/{drone_id}")), GET)
            .await
    }

    #[instrument(skip(self, request))]
    async fn create_drone(&self, request: &CreateDroneRequest) -> ApiResponse<Drone> {
        self.call_json(self.request(Method::POST, "/drones"), request, CREATE)
            .await
    }

    #[instrument(skip(self, request))]
    async fn update_drone(&self, drone_id: &str, request: &UpdateDroneRequest) -> ApiResponse<Drone> {
        let path = format!("/drones/{drone_id}");
        self.call_json(self.request(Method::PUT, &path), request, UPDATE)
            .await
    }

    #[instrument(skip(self))]
    async fn change_drone_status(&self, drone_id: &str) -> ApiResponse<Drone> {
        let path = format!("/drones/{drone_id}/status");
        self.call(self.request(Method::PATCH, &path), STATUS).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_restaurant_fleet_page() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json(
            200,
            json!({
                "content": [{
                    "droneId": "d1", "restaurantId": "r1", "model": "DJI",
                    "capacity": 2.5, "battery": 80, "status": "AVAILABLE",
                    "createdAt": [2024, 11, 15, 8, 0]
                }],
                "totalPages": 1,
                "totalElements": 1
            }),
        );
        let client = BackendClient::with_root(transport.clone(), "http://api/api");

        let drones = client
            .drones_by_restaurant("r1", Page::new(0, 20))
            .await
            .into_data()
            .unwrap();

        assert_eq!(drones[0].battery, 80.0);
        assert!(drones[0].created_at.is_some());
        assert_eq!(transport.requests()[0].query_value("size"), Some("20"));
    }
}
