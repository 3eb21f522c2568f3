//! Payment link creation and the gateway's return redirect.

use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const PAYMENT_METHOD: &str = "VNPay";
const SUCCESS_CODE: &str = "00";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub order_id: String,
    pub amount: f64,
    pub method: String,
}

impl CreatePaymentRequest {
    pub fn new(order_id: impl Into<String>, amount: f64) -> Self {
        Self {
            order_id: order_id.into(),
            amount,
            method: PAYMENT_METHOD.to_string(),
        }
    }
}

/// Where to send the customer to pay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub payment_url: String,
    #[serde(default)]
    pub payment_id: Option<String>,
}

/// Query parameters of the gateway's redirect back to the shop.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReturn {
    pub response_code: String,
    pub order_ref: String,
    /// In the shop's currency. The gateway sends it multiplied by 100.
    pub amount: Option<f64>,
    pub transaction_no: Option<String>,
    pub bank_code: Option<String>,
}

impl PaymentReturn {
    /// Parse a full return URL. `None` when the mandatory parameters are missing.
    pub fn from_url(url: &str) -> Option<Self> {
        let url = Url::parse(url).ok()?;
        let mut response_code = None;
        let mut order_ref = None;
        let mut amount = None;
        let mut transaction_no = None;
        let mut bank_code = None;

        for (key, value) in url.query_pairs() {
            let value = value.into_owned();
            match key.as_ref() {
                "vnp_ResponseCode" => response_code = Some(value),
                "vnp_TxnRef" => order_ref = Some(value),
                "vnp_Amount" => amount = value.parse::<f64>().ok().map(|raw| raw / 100.0),
                "vnp_TransactionNo" => transaction_no = Some(value),
                "vnp_BankCode" => bank_code = Some(value),
                _ => {}
            }
        }

        Some(Self {
            response_code: response_code?,
            order_ref: order_ref?,
            amount,
            transaction_no,
            bank_code,
        })
    }

    pub fn is_success(&self) -> bool {
        self.response_code == SUCCESS_CODE
    }
}
