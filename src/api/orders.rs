use super::{BackendClient, Page};
use crate::http::{ApiResponse, Messages, Method};
use crate::model::{CreateOrderRequest, Order, OrderStatus, UpdateOrderRequest};
use async_trait::async_trait;
use tracing::{instrument, warn};

const LIST: Messages<'static> = Messages::new("Orders loaded", "Could not load orders");
const GET: Messages<'static> = Messages::new("Order loaded", "Could not load the order");
const CREATE: Messages<'static> = Messages::new("Order placed", "Could not place the order");
const UPDATE: Messages<'static> = Messages::new("Order updated", "Could not update the order");
const CANCEL: Messages<'static> = Messages::new("Order cancelled", "Could not cancel the order");
const CONFIRM: Messages<'static> = Messages::new("Order confirmed", "Could not confirm the order");
const COMPLETE: Messages<'static> = Messages::new("Order completed", "Could not complete the order");
const STATUS: Messages<'static> = Messages::new("Order status updated", "Could not update the order status");
const SEARCH: Messages<'static> = Messages::new("Orders found", "Could not search orders");

#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn list_orders(&self, page: Page) -> ApiResponse<Vec<Order>>;
    async fn get_order(&self, order_id: &str) -> ApiResponse<Order>;
    async fn create_order(&self, request: &CreateOrderRequest) -> ApiResponse<Order>;

    /// Partial update. A status change is checked against the current status first
    /// and refused locally when the transition is not allowed.
    async fn update_order(&self, order_id: &str, request: &UpdateOrderRequest) -> ApiResponse<Order>;

    async fn cancel_order(&self, order_id: &str) -> ApiResponse<Order>;
    async fn confirm_order(&self, order_id: &str) -> ApiResponse<Order>;
    async fn complete_order(&self, order_id: &str) -> ApiResponse<Order>;
    async fn update_status(&self, order_id: &str, status: OrderStatus) -> ApiResponse<Order>;
    async fn orders_by_account(&self, account_id: &str, page: Page) -> ApiResponse<Vec<Order>>;
    async fn orders_by_status(&self, status: OrderStatus, page: Page) -> ApiResponse<Vec<Order>>;
    async fn search_orders(&self, keyword: &str, page: Page) -> ApiResponse<Vec<Order>>;

    /// Hand the order to delivery.
    async fn ship_order(&self, order_id: &str) -> ApiResponse<Order> {
        self.update_status(order_id, OrderStatus::Shipping).await
    }
}

#[async_trait]
impl OrderApi for BackendClient {
    #[instrument(skip(self))]
    async fn list_orders(&self, page: Page) -> ApiResponse<Vec<Order>> {
        self.call(page.apply(self.request(Method::GET, "/order")), LIST).await
    }

    #[instrument(skip(self))]
    async fn get_order(&self, order_id: &str) -> ApiResponse<Order> {
        self.call(self.request(Method::GET, &format!("/order/{order_id}")), GET)
            .await
    }

    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    async fn create_order(&self, request: &CreateOrderRequest) -> ApiResponse<Order> {
        self.call_json(self.request(Method::POST, "/order"), request, CREATE)
            .await
    }

    #[instrument(skip(self, request))]
    async fn update_order(&self, order_id: &str, request: &UpdateOrderRequest) -> ApiResponse<Order> {
        if let Some(next) = request.status {
            if let Some(current) = self.get_order(order_id).await.into_data() {
                if !current.status.can_transition_to(next) {
                    warn!(from = %current.status, to = %next, "Refusing status transition");
                    return ApiResponse::failure(
                        format!("Cannot change status from {} to {}", current.status, next),
                        None,
                    );
                }
            }
        }
        self.call_json(
            self.request(Method::PUT, &format!("/order/{order_id}")),
            request,
            UPDATE,
        )
        .await
    }

    #[instrument(skip(self))]
    async fn cancel_order(&self, order_id: &str) -> ApiResponse<Order> {
        self.call(self.request(Method::PUT, &format!("/order/{order_id}/cancel")), CANCEL)
            .await
    }

    #[instrument(skip(self))]
    async fn confirm_order(&self, order_id: &str) -> ApiResponse<Order> {
        self.call(self.request(Method::PUT, &format!("/order/{order_id}/confirm")), CONFIRM)
            .await
    }

    #[instrument(skip(self))]
    async fn complete_order(&self, order_id: &str) -> ApiResponse<Order> {
        self.call(self.request(Method::PUT, &format!("/order/{order_id}/complete")), COMPLETE)
            .await
    }

    #[instrument(skip(self))]
    async fn update_status(&self, order_id: &str, status: OrderStatus) -> ApiResponse<Order> {
        let request = self
            .request(Method::PUT, &format!("/order/{order_id}/update-status"))
            .query("status", status);
        self.call(request, STATUS).await
    }

    #[instrument(skip(self))]
    async fn orders_by_account(&self, account_id: &str, page: Page) -> ApiResponse<Vec<Order>> {
        let request = self.request(Method::GET, &format!("/order/account/{account_id}"));
        self.call(page.apply(request), LIST).await
    }

    #[instrument(skip(self))]
    async fn orders_by_status(&self, status: OrderStatus, page: Page) -> ApiResponse<Vec<Order>> {
        let request = self.request(Method::GET, "/order/status").query("status", status);
        self.call(page.apply(request), LIST).await
    }

    #[instrument(skip(self))]
    async fn search_orders(&self, keyword: &str, page: Page) -> ApiResponse<Vec<Order>> {
        let request = self.request(Method::GET, "/order/search").query("keyword", keyword);
        self.call(page.apply(request), SEARCH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;
    use serde_json::json;
    use std::sync::Arc;

    fn order_json(status: &str) -> serde_json::Value {
        json!({
            "orderId": "o1",
            "customerId": "c1",
            "restaurantId": "r1",
            "deliveryAddress": "12 Lê Lợi",
            "status": status,
            "orderItems": []
        })
    }

    fn client() -> (BackendClient, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::new());
        (BackendClient::with_root(transport.clone(), "http://api/api"), transport)
    }

    #[tokio::test]
    async fn test_invalid_transition_is_refused_locally() {
        let (client, transport) = client();
        transport.respond_json(200, order_json("DELIVERED"));

        let response = client
            .update_order("o1", &UpdateOrderRequest::status(OrderStatus::Cancelled))
            .await;

        assert!(!response.success);
        assert_eq!(response.message, "Cannot change status from DELIVERED to CANCELLED");
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_valid_transition_is_sent() {
        let (client, transport) = client();
        transport.respond_json(200, order_json("PENDING"));
        transport.respond_json(200, order_json("CONFIRMED"));

        let response = client
            .update_order("o1", &UpdateOrderRequest::status(OrderStatus::Confirmed))
            .await;

        assert!(response.success);
        let requests = transport.requests();
        assert_eq!(requests[1].method, Method::PUT);
        assert_eq!(requests[1].body, Some(json!({"status": "CONFIRMED"})));
    }

    #[tokio::test]
    async fn test_ship_goes_through_update_status() {
        let (client, transport) = client();
        transport.respond_json(200, order_json("SHIPPING"));

        let response = client.ship_order("o1").await;

        assert_eq!(response.into_data().map(|o| o.status), Some(OrderStatus::Shipping));
        let request = &transport.requests()[0];
        assert_eq!(request.url, "http://api/api/order/o1/update-status");
        assert_eq!(request.query_value("status"), Some("SHIPPING"));
    }

    #[tokio::test]
    async fn test_page_of_orders() {
        let (client, transport) = client();
        transport.respond_json(
            200,
            json!({"content": [order_json("PENDING")], "totalPages": 3, "totalElements": 21}),
        );

        let response = client.orders_by_account("c1", Page::new(1, 10)).await;

        assert_eq!(response.total_pages, Some(3));
        assert_eq!(response.data.map(|orders| orders.len()), Some(1));
        assert_eq!(transport.requests()[0].query_value("page"), Some("1"));
    }

    #[tokio::test]
    async fn test_backend_message_is_surfaced() {
        let (client, transport) = client();
        transport.respond_json(400, json!({"message": "Restaurant is closed"}));

        let response = client.cancel_order("o1").await;

        assert!(!response.success);
        assert_eq!(response.message, "Restaurant is closed");
    }
}
