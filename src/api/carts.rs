use super::BackendClient;
use crate::http::{ApiResponse, Messages, Method};
use crate::model::{AddCartItemRequest, Cart, UpdateCartItemRequest};
use async_trait::async_trait;
use tracing::instrument;

const GET: Messages<'static> = Messages::new("Cart loaded", "Could not load the cart");
const ADD: Messages<'static> = Messages::new("Added to cart", "Could not add the item to the cart");
const UPDATE: Messages<'static> = Messages::new("Cart updated", "Could not update the cart item");
const REMOVE: Messages<'static> = Messages::new("Item removed", "Could not remove the cart item");
const CLEAR: Messages<'static> = Messages::new("Cart cleared", "Could not clear the cart");

/// Server-side cart of a signed-in account.
#[async_trait]
pub trait CartApi: Send + Sync {
    async fn get_cart(&self, account_id: &str) -> ApiResponse<Cart>;
    async fn add_item(&self, account_id: &str, request: &AddCartItemRequest) -> ApiResponse<Cart>;
    async fn update_item(&self, cart_item_id: &str, request: &UpdateCartItemRequest) -> ApiResponse<Cart>;
    async fn remove_item(&self, cart_item_id: &str) -> ApiResponse<()>;
    async fn clear_cart(&self, account_id: &str) -> ApiResponse<()>;
}

#[async_trait]
impl CartApi for BackendClient {
    #[instrument(skip(self))]
    async fn get_cart(&self, account_id: &str) -> ApiResponse<Cart> {
        self.call(self.request(Method::GET, &format!("/cart/account/{account_id}")), GET)
            .await
    }

    #[instrument(skip(self, request))]
    async fn add_item(&self, account_id: &str, request: &AddCartItemRequest) -> ApiResponse<Cart> {
        let path = format!("/cart/account/{account_id}/items");
        self.call_json(self.request(Method::POST, &path), request, ADD)
            .await
    }

    #[instrument(skip(self, request))]
    async fn update_item(&self, cart_item_id: &str, request: &UpdateCartItemRequest) -> ApiResponse<Cart> {
        let path = format!("/cart/items/{cart_item_id}");
        self.call_json(self.request(Method::PUT, &path), request, UPDATE)
            .await
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, cart_item_id: &str) -> ApiResponse<()> {
        self.call_unit(self.request(Method::DELETE, &format!("/cart/items/{cart_item_id}")), REMOVE)
            .await
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self, account_id: &str) -> ApiResponse<()> {
        let path = format!("/cart/account/{account_id}/clear");
        self.call_unit(self.request(Method::DELETE, &path), CLEAR).await
    }
}
