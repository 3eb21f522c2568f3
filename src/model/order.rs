use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Shipping,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::Shipping => "SHIPPING",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Statuses reachable in one step. Empty for terminal states.
    pub fn next_statuses(self) -> &'static [OrderStatus] {
        match self {
            Self::Pending => &[Self::Confirmed, Self::Cancelled],
            Self::Confirmed => &[Self::Preparing, Self::Cancelled],
            Self::Preparing => &[Self::Shipping],
            Self::Shipping => &[Self::Delivered],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.next_statuses().is_empty()
    }

    pub fn can_cancel(self) -> bool {
        self.can_transition_to(Self::Cancelled)
    }

    pub fn can_confirm(self) -> bool {
        self == Self::Pending
    }

    pub fn can_start_preparing(self) -> bool {
        self == Self::Confirmed
    }

    pub fn can_start_delivery(self) -> bool {
        self == Self::Preparing
    }

    pub fn can_complete(self) -> bool {
        self == Self::Shipping
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub item_id: String,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub restaurant_id: String,
    pub receiver_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_email: Option<String>,
    pub receiver_phone: String,
    pub delivery_address: String,
    pub ward: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_fee: Option<f64>,
    pub order_items: Vec<OrderItemRequest>,
}

/// Partial update. Only the populated fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_fee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

impl UpdateOrderRequest {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub order_item_id: Option<String>,
    pub item_id: String,
    #[serde(default, alias = "itemName")]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub sub_total: Option<f64>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    pub restaurant_id: String,
    #[serde(default)]
    pub receiver_name: Option<String>,
    #[serde(default)]
    pub receiver_email: Option<String>,
    #[serde(default)]
    pub receiver_phone: Option<String>,
    pub delivery_address: String,
    #[serde(default)]
    pub ward: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub customer_latitude: Option<f64>,
    #[serde(default)]
    pub customer_longitude: Option<f64>,
    #[serde(default)]
    pub order_note: Option<String>,
    #[serde(default)]
    pub shipping_fee: f64,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub final_amount: Option<f64>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub status: OrderStatus,
    #[serde(default, with = "crate::model::datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "crate::model::datetime")]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default, with = "crate::model::datetime")]
    pub payment_expires_at: Option<NaiveDateTime>,
}

impl Order {
    /// Amount due: the backend's final amount, or goods plus shipping when it is absent.
    pub fn amount_due(&self) -> f64 {
        self.final_amount
            .unwrap_or(self.total_price + self.shipping_fee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use OrderStatus::*;

    #[rstest]
    #[case(Pending, Confirmed, true)]
    #[case(Pending, Cancelled, true)]
    #[case(Pending, Shipping, false)]
    #[case(Confirmed, Preparing, true)]
    #[case(Confirmed, Cancelled, true)]
    #[case(Preparing, Shipping, true)]
    #[case(Preparing, Cancelled, false)]
    #[case(Shipping, Delivered, true)]
    #[case(Delivered, Cancelled, false)]
    #[case(Cancelled, Pending, false)]
    fn test_transition_table(#[case] from: OrderStatus, #[case] to: OrderStatus, #[case] allowed: bool) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[test]
    fn test_action_helpers() {
        assert!(Pending.can_cancel() && Confirmed.can_cancel());
        assert!(!Preparing.can_cancel());
        assert!(Pending.can_confirm());
        assert!(Confirmed.can_start_preparing());
        assert!(Preparing.can_start_delivery());
        assert!(Shipping.can_complete());
        assert!(Delivered.is_terminal() && Cancelled.is_terminal());
    }

    #[test]
    fn test_order_decodes_with_backend_dates() {
        let order: Order = serde_json::from_value(json!({
            "orderId": "o1",
            "customerId": "c1",
            "restaurantId": "r1",
            "deliveryAddress": "12 Lê Lợi",
            "status": "PENDING",
            "totalPrice": 90000,
            "shippingFee": 30000,
            "orderItems": [{"itemId": "p1", "itemName": "Burger", "quantity": 2, "price": 45000}],
            "createdAt": "15/11/2024"
        }))
        .unwrap();

        assert_eq!(order.status, Pending);
        assert_eq!(order.order_items[0].name.as_deref(), Some("Burger"));
        assert_eq!(order.amount_due(), 120000.0);
        assert!(order.created_at.is_some());
        assert!(order.updated_at.is_none());
    }

    #[test]
    fn test_update_request_sends_only_populated_fields() {
        let body = serde_json::to_value(UpdateOrderRequest::status(Shipping)).unwrap();
        assert_eq!(body, json!({"status": "SHIPPING"}));
    }
}
