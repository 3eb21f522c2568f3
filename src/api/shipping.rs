use super::{BackendClient, Page};
use crate::http::{ApiResponse, Messages, Method};
use crate::model::{Shipping, ShippingStatus};
use async_trait::async_trait;
use tracing::instrument;

const LIST: Messages<'static> = Messages::new("Shipments loaded", "Could not load shipments");
const GET: Messages<'static> = Messages::new("Shipment loaded", "Could not load the shipment");
const STATUS: Messages<'static> = Messages::new("Shipment status updated", "Could not update the shipment status");

#[async_trait]
pub trait ShippingApi: Send + Sync {
    async fn list_shipping(&self, page: Page) -> ApiResponse<Vec<Shipping>>;
    async fn get_shipping(&self, shipping_id: &str) -> ApiResponse<Shipping>;
    async fn shipping_by_order(&self, order_id: &str) -> ApiResponse<Shipping>;
    async fn shipping_by_account(&self, account_id: &str) -> ApiResponse<Vec<Shipping>>;
    async fn update_shipping_status(&self, shipping_id: &str, status: ShippingStatus) -> ApiResponse<Shipping>;
}

#[async_trait]
impl ShippingApi for BackendClient {
    #[instrument(skip(self))]
    async fn list_shipping(&self, page: Page) -> ApiResponse<Vec<Shipping>> {
        self.call(page.apply(self.request(Method::GET, "/shipping")), LIST)
            .await
    }

    #[instrument(skip(self))]
    async fn get_shipping(&self, shipping_id: &str) -> ApiResponse<Shipping> {
        self.call(self.request(Method::GET, &format!("/shipping/{shipping_id}")), GET)
            .await
    }

    #[instrument(skip(self))]
    async fn shipping_by_order(&self, order_id: &str) -> ApiResponse<Shipping> {
        self.call(self.request(Method::GET, &format!("/shipping/order/{order_id}")), GET)
            .await
    }

    #[instrument(skip(self))]
    async fn shipping_by_account(&self, account_id: &str) -> ApiResponse<Vec<Shipping>> {
        let path = format!("/shipping/account/{account_id}");
        self.call(self.request(Method::GET, &path), LIST).await
    }

    #[instrument(skip(self))]
    async fn update_shipping_status(&self, shipping_id: &str, status: ShippingStatus) -> ApiResponse<Shipping> {
        let request = self
            .request(Method::PUT, &format!("/shipping/{shipping_id}/status"))
            .query("status", status.code());
        self.call(request, STATUS).await
    }
}
