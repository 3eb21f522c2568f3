use super::BackendClient;
use crate::http::{ApiResponse, Messages, Method};
use crate::model::{CreatePaymentRequest, PaymentLink};
use async_trait::async_trait;
use tracing::instrument;

const CREATE: Messages<'static> = Messages::new("Payment link created", "Could not create the payment link");

#[async_trait]
pub trait PaymentApi: Send + Sync {
    /// Ask the backend for a gateway URL for `request.order_id`.
    async fn create_payment(&self, request: &CreatePaymentRequest) -> ApiResponse<PaymentLink>;
}

#[async_trait]
impl PaymentApi for BackendClient {
    #[instrument(skip(self, request), fields(order_id = %request.order_id, amount = request.amount))]
    async fn create_payment(&self, request: &CreatePaymentRequest) -> ApiResponse<PaymentLink> {
        self.call_json(self.request(Method::POST, "/payments/create"), request, CREATE)
            .await
    }
}
