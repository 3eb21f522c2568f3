use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drone {
    pub drone_id: String,
    pub restaurant_id: String,
    pub model: String,
    /// Payload in kilograms.
    pub capacity: f64,
    /// Charge, 0 to 100.
    pub battery: f64,
    pub status: String,
    #[serde(default, with = "crate::model::datetime")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, with = "crate::model::datetime")]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDroneRequest {
    pub restaurant_id: String,
    pub model: String,
    pub capacity: f64,
    pub battery: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDroneRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
