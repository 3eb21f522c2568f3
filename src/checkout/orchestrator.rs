use super::error::CheckoutError;
use super::form::{CheckoutForm, FormError};
use super::state::{CheckoutOutcome, CheckoutReport, CheckoutStage, StageLog};
use crate::api::{CartApi, OrderApi, PaymentApi};
use crate::geocoding::{AddressValidationGate, Rejection, SelectedAddress};
use crate::model::{CartItem, CreateOrderRequest, CreatePaymentRequest, OrderItemRequest};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Everything one checkout attempt needs from the caller.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer_id: String,
    pub restaurant_id: String,
    pub form: CheckoutForm,
    pub items: Vec<CartItem>,
    pub selected: Option<SelectedAddress>,
}

impl CheckoutRequest {
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|item| item.total_price).sum()
    }

    /// Amount charged through the gateway: goods plus shipping.
    pub fn amount_due(&self) -> f64 {
        self.subtotal() + self.form.shipping_method.fee()
    }

    /// Address and coordinates both come from the picked suggestion.
    fn order_request(&self, selected: &SelectedAddress) -> CreateOrderRequest {
        let form = &self.form;
        CreateOrderRequest {
            customer_id: self.customer_id.clone(),
            restaurant_id: self.restaurant_id.clone(),
            receiver_name: form.receiver_name.trim().to_string(),
            receiver_email: form
                .receiver_email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            receiver_phone: form.receiver_phone.trim().to_string(),
            delivery_address: selected.street.trim().to_string(),
            ward: selected.ward.as_deref().unwrap_or(&form.ward).trim().to_string(),
            city: selected.city.as_deref().unwrap_or(&form.city).trim().to_string(),
            customer_latitude: Some(selected.latitude()),
            customer_longitude: Some(selected.longitude()),
            order_note: form.order_note.clone().filter(|n| !n.trim().is_empty()),
            shipping_fee: Some(form.shipping_method.fee()),
            order_items: self
                .items
                .iter()
                .map(|item| OrderItemRequest {
                    item_id: item.product_id.clone(),
                    quantity: item.quantity,
                    note: None,
                })
                .collect(),
        }
    }
}

/// Drives one checkout attempt from the filled form to a payment redirect.
///
/// `CollectingInfo → ValidatingAddress → CreatingOrder → CreatingPayment → Redirecting`.
/// Failures before the order exists send the caller back to the form. Once the order
/// is created it is never rolled back: a missing payment link sends the caller to the
/// order history instead.
#[derive(Clone)]
pub struct CheckoutOrchestrator {
    gate: AddressValidationGate,
    orders: Arc<dyn OrderApi>,
    payments: Arc<dyn PaymentApi>,
    carts: Arc<dyn CartApi>,
}

impl CheckoutOrchestrator {
    pub fn new(
        gate: AddressValidationGate,
        orders: Arc<dyn OrderApi>,
        payments: Arc<dyn PaymentApi>,
        carts: Arc<dyn CartApi>,
    ) -> Self {
        Self {
            gate,
            orders,
            payments,
            carts,
        }
    }

    #[instrument(skip(self, request), fields(customer_id = %request.customer_id))]
    pub async fn checkout(&self, request: &CheckoutRequest) -> CheckoutReport {
        let mut log = StageLog::start();

        if let Err(e) = request.form.ready(&request.items, request.selected.as_ref()) {
            info!(error = %e, "Checkout blocked");
            return log.reject(e.into());
        }
        let Some(selected) = request.selected.as_ref() else {
            return log.reject(FormError::NoSelectedAddress.into());
        };

        log.enter(CheckoutStage::ValidatingAddress);
        let form = &request.form;
        let verdict = self
            .gate
            .validate(&form.delivery_address, &form.ward, &form.city)
            .await;
        if !verdict.is_valid {
            let rejection = verdict.rejection.unwrap_or(Rejection::Unverifiable);
            return log.reject(rejection.into());
        }

        log.enter(CheckoutStage::CreatingOrder);
        let created = self.orders.create_order(&request.order_request(selected)).await;
        let message = created.message.clone();
        let Some(order) = created.into_data() else {
            warn!(%message, "Order creation failed");
            return log.reject(CheckoutError::OrderFailed(message));
        };
        info!(order_id = %order.order_id, "Order created");

        let cleared = self.carts.clear_cart(&request.customer_id).await;
        if !cleared.success {
            warn!(message = %cleared.message, "Server cart not cleared");
        }

        log.enter(CheckoutStage::CreatingPayment);
        let payment = self
            .payments
            .create_payment(&CreatePaymentRequest::new(&order.order_id, request.amount_due()))
            .await;
        let reason = payment.message.clone();
        match payment.into_data() {
            Some(link) if !link.payment_url.trim().is_empty() => {
                log.enter(CheckoutStage::Redirecting);
                info!(order_id = %order.order_id, "Redirecting to payment");
                log.finish(CheckoutOutcome::RedirectToPayment {
                    order_id: order.order_id,
                    url: link.payment_url,
                })
            }
            _ => {
                warn!(order_id = %order.order_id, %reason, "No payment link, order kept");
                log.finish(CheckoutOutcome::OrderHistory {
                    order_id: order.order_id,
                    reason,
                })
            }
        }
    }
}
