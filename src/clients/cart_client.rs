use crate::cart_actor::{CartCommand, CartError, CartOutput, CartSnapshot, GuestCart, NewCartItem};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, StateClient};
use crate::model::CartItem;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the guest cart actor.
#[derive(Clone)]
pub struct GuestCartClient {
    inner: StateClient<GuestCart>,
}

impl GuestCartClient {
    pub fn new(inner: StateClient<GuestCart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<GuestCart> for GuestCartClient {
    type Error = CartError;

    fn inner(&self) -> &StateClient<GuestCart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_state_error::<CartError>()
            .unwrap_or_else(|other| CartError::ActorCommunicationError(other.to_string()))
    }
}

fn unexpected(output: CartOutput) -> CartError {
    CartError::ActorCommunicationError(format!("unexpected reply: {output:?}"))
}

impl GuestCartClient {
    async fn send(&self, command: CartCommand) -> Result<CartOutput, CartError> {
        self.inner.ask(command).await.map_err(Self::map_error)
    }

    /// Add `quantity` units of a product (1 when `None`).
    #[instrument(skip(self, item), fields(product_id = %item.product_id))]
    pub async fn add(&self, item: NewCartItem, quantity: Option<u32>) -> Result<CartItem, CartError> {
        debug!("Sending request");
        match self
            .send(CartCommand::Add {
                item,
                quantity: quantity.unwrap_or(1),
            })
            .await?
        {
            CartOutput::Added(line) => Ok(line),
            other => Err(unexpected(other)),
        }
    }

    /// Set a line's quantity. Values below 1 are rejected here without reaching the actor.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, cart_item_id: &str, quantity: i64) -> Result<CartItem, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        debug!("Sending request");
        match self
            .send(CartCommand::UpdateQuantity {
                cart_item_id: cart_item_id.to_string(),
                quantity,
            })
            .await?
        {
            CartOutput::Updated(line) => Ok(line),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, cart_item_id: &str) -> Result<(), CartError> {
        debug!("Sending request");
        match self
            .send(CartCommand::Remove {
                cart_item_id: cart_item_id.to_string(),
            })
            .await?
        {
            CartOutput::Removed(_) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        debug!("Sending request");
        match self.send(CartCommand::Clear).await? {
            CartOutput::Cleared => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn items(&self) -> Result<Vec<CartItem>, CartError> {
        Ok(self.snapshot().await?.items)
    }

    pub async fn item_count(&self) -> Result<u32, CartError> {
        Ok(self.snapshot().await?.item_count())
    }

    pub async fn total_amount(&self) -> Result<f64, CartError> {
        Ok(self.snapshot().await?.total_amount())
    }

    /// Same as [`ActorClient::snapshot`], callable without importing the trait.
    pub async fn contents(&self) -> Result<CartSnapshot, CartError> {
        self.snapshot().await
    }
}
