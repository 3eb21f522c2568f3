//! # Backend API
//!
//! One trait per backend service, all implemented by [`BackendClient`]. Every call
//! resolves to an [`ApiResponse`]: transport failures and non-2xx statuses come back
//! as `success == false` rather than as errors, so callers branch on one shape.
//!
//! | Trait | Resource |
//! |-------|----------|
//! | [`OrderApi`] | `/order` |
//! | [`CartApi`] | `/cart` (signed-in customers) |
//! | [`RatingApi`] | `/rating` |
//! | [`RoleApi`] | `/roles` |
//! | [`DroneApi`] | `/drones` |
//! | [`ShippingApi`] | `/shipping` |
//! | [`AccountApi`] | `/account` |
//! | [`PaymentApi`] | `/payments` |

mod accounts;
mod carts;
mod drones;
mod orders;
mod payments;
mod ratings;
mod roles;
mod shipping;

pub use accounts::AccountApi;
pub use carts::CartApi;
pub use drones::DroneApi;
pub use orders::OrderApi;
pub use payments::PaymentApi;
pub use ratings::RatingApi;
pub use roles::RoleApi;
pub use shipping::ShippingApi;

use crate::config::ApiSettings;
use crate::http::{ApiResponse, HttpRequest, HttpTransport, Messages, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Zero-based page request, as Spring expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub size: u32,
}

impl Page {
    pub const fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    fn apply(self, request: HttpRequest) -> HttpRequest {
        request.query("page", self.page).query("size", self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

/// HTTP client for the backend services rooted at `{base_url}/api`.
#[derive(Clone)]
pub struct BackendClient {
    transport: Arc<dyn HttpTransport>,
    root: String,
}

impl BackendClient {
    pub fn new(transport: Arc<dyn HttpTransport>, settings: &ApiSettings) -> Self {
        Self::with_root(transport, settings.api_root())
    }

    /// `root` is used verbatim as the prefix of every path.
    pub fn with_root(transport: Arc<dyn HttpTransport>, root: impl Into<String>) -> Self {
        Self {
            transport,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{}", self.root, path))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        messages: Messages<'_>,
    ) -> ApiResponse<T> {
        debug!(method = %request.method, url = %request.url, "Backend request");
        let exchange = self.transport.send(request).await;
        ApiResponse::from_exchange(exchange, messages)
    }

    async fn call_json<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        request: HttpRequest,
        body: &B,
        messages: Messages<'_>,
    ) -> ApiResponse<T> {
        match serde_json::to_value(body) {
            Ok(value) => self.call(request.json(value), messages).await,
            Err(e) => ApiResponse::failure(messages.failure, Some(e.to_string())),
        }
    }

    /// For endpoints whose payload the caller does not need.
    async fn call_unit(&self, request: HttpRequest, messages: Messages<'_>) -> ApiResponse<()> {
        self.call::<serde::de::IgnoredAny>(request, messages)
            .await
            .map(|_| ())
    }
}
