use crate::api::BackendClient;
use crate::cart_actor::{CartStorage, JsonFileStorage, MemoryStorage};
use crate::clients::{AutocompleteClient, GuestCartClient};
use crate::config::Settings;
use crate::autocomplete_actor::SessionContext;
use crate::checkout::CheckoutOrchestrator;
use crate::geocoding::{AddressSuggestionClient, AddressValidationGate, Geocoder, NominatimClient};
use crate::http::{DefaultHeaders, HttpTransport, ReqwestTransport, TransportError};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("HTTP client error: {0}")]
    Transport(#[from] TransportError),
}

/// The running client system.
///
/// `Storefront` is responsible for:
/// - **Lifecycle Management**: starting the guest cart actor and any autocomplete
///   sessions, and stopping them again
/// - **Dependency Wiring**: one backend client shared by the REST traits and checkout,
///   one geocoder shared by suggestions and validation
///
/// # Example
///
/// ```ignore
/// let store = Storefront::new(Settings::load()?)?;
///
/// store.cart.add(NewCartItem::new("p1", "Burger", 45_000.0), None).await?;
/// let session = store.open_autocomplete();
/// session.input("123 Nguyễn Huệ").await?;
///
/// store.shutdown().await?;
/// ```
pub struct Storefront {
    pub settings: Settings,

    /// Client for the guest cart actor
    pub cart: GuestCartClient,

    /// REST client for every backend service
    pub backend: BackendClient,

    pub suggestions: AddressSuggestionClient,

    pub gate: AddressValidationGate,

    pub checkout: CheckoutOrchestrator,

    cart_handle: JoinHandle<()>,
    session_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Storefront {
    /// Build the production wiring: reqwest for HTTP, Nominatim for geocoding, and a
    /// JSON file for the guest cart when `cart.storage_dir` is set (memory otherwise).
    pub fn new(settings: Settings) -> Result<Self, StartupError> {
        let http: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(settings.api.timeout())?);
        let backend_http: Arc<dyn HttpTransport> = match settings.api.bearer_token.as_deref() {
            Some(token) => Arc::new(DefaultHeaders::bearer(http.clone(), token)),
            None => http.clone(),
        };
        let geocoder: Arc<dyn Geocoder> =
            Arc::new(NominatimClient::new(http, settings.geocoder.clone()));
        let storage: Arc<dyn CartStorage> = match &settings.cart.storage_dir {
            Some(dir) => Arc::new(JsonFileStorage::new(dir.clone())),
            None => Arc::new(MemoryStorage::new()),
        };
        Ok(Self::with_parts(settings, backend_http, geocoder, storage))
    }

    /// Wire the system from explicit parts. Must be called inside a Tokio runtime.
    pub fn with_parts(
        settings: Settings,
        backend_http: Arc<dyn HttpTransport>,
        geocoder: Arc<dyn Geocoder>,
        storage: Arc<dyn CartStorage>,
    ) -> Self {
        let (cart_actor, cart) =
            crate::cart_actor::new(&settings.cart.storage_key, settings.actors.buffer_size);
        let cart_handle = tokio::spawn(cart_actor.run(storage));

        let backend = BackendClient::new(backend_http, &settings.api);
        let suggestions = AddressSuggestionClient::new(geocoder.clone(), &settings.geocoder);
        let gate = AddressValidationGate::new(geocoder);
        let shared = Arc::new(backend.clone());
        let checkout = CheckoutOrchestrator::new(gate.clone(), shared.clone(), shared.clone(), shared);

        info!(api = %backend.root(), "Storefront started");
        Self {
            settings,
            cart,
            backend,
            suggestions,
            gate,
            checkout,
            cart_handle,
            session_handles: Mutex::new(Vec::new()),
        }
    }

    /// Start an autocomplete session for one address form.
    ///
    /// The session ends when every clone of the returned client is dropped, or at
    /// [`Storefront::shutdown`].
    pub fn open_autocomplete(&self) -> AutocompleteClient {
        let (actor, client) = crate::autocomplete_actor::new(self.settings.actors.buffer_size);
        let handle = tokio::spawn(actor.run(SessionContext {
            suggestions: self.suggestions.clone(),
            debounce: self.settings.geocoder.debounce(),
        }));
        self.session_handles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(handle);
        client
    }

    /// Stop the cart actor after it drains its queue, and end any open sessions.
    ///
    /// Returns an error if the cart actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        let sessions = self
            .session_handles
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for handle in sessions {
            handle.abort();
        }

        // Dropping the last cart client closes the actor's channel.
        drop(self.cart);
        if let Err(e) = self.cart_handle.await {
            error!("Cart actor failed: {:?}", e);
            return Err(format!("Cart actor failed: {:?}", e));
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
