use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Numeric shipping status carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ShippingStatus {
    Cancelled,
    Preparing,
    Delivering,
    Delivered,
}

impl ShippingStatus {
    pub fn code(self) -> i32 {
        match self {
            Self::Cancelled => 0,
            Self::Preparing => 1,
            Self::Delivering => 2,
            Self::Delivered => 3,
        }
    }
}

impl TryFrom<i32> for ShippingStatus {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Cancelled),
            1 => Ok(Self::Preparing),
            2 => Ok(Self::Delivering),
            3 => Ok(Self::Delivered),
            other => Err(format!("unknown shipping status {other}")),
        }
    }
}

impl From<ShippingStatus> for i32 {
    fn from(status: ShippingStatus) -> Self {
        status.code()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipping {
    pub shipping_id: String,
    #[serde(default)]
    pub order_id: Option<String>,
    pub account_id: String,
    #[serde(default)]
    pub account_name: Option<String>,
    pub receiver_name: String,
    pub receiver_phone: String,
    pub receiver_address: String,
    pub city: String,
    #[serde(default)]
    pub shipper_name: Option<String>,
    #[serde(default)]
    pub shipping_fee: Option<f64>,
    #[serde(default, with = "crate::model::datetime")]
    pub shipped_at: Option<NaiveDateTime>,
    pub status: ShippingStatus,
}
