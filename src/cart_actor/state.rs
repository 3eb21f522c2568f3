//! [`ActorState`] implementation for the guest cart.

use super::commands::{CartCommand, CartOutput, NewCartItem};
use super::error::CartError;
use super::storage::CartStorage;
use crate::framework::{ActorState, Mailbox};
use crate::model::CartItem;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Read-only view of the cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
}

impl CartSnapshot {
    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line totals.
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(|item| item.total_price).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The cart of a customer who is not signed in.
///
/// Every mutation is applied to a copy of the item list, written to storage, and only
/// then committed. A failed write leaves both the stored value and the in-memory
/// cart as they were.
///
/// Mutations are refused until the stored value has been read once, so an unreadable
/// store is never overwritten by a cart that only looks empty.
pub struct GuestCart {
    storage_key: String,
    items: Vec<CartItem>,
    loaded: bool,
}

impl GuestCart {
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            items: Vec::new(),
            loaded: false,
        }
    }

    /// Read the stored cart. A corrupt value counts as read and leaves the cart empty.
    async fn restore(&mut self, storage: &Arc<dyn CartStorage>) -> Result<(), CartError> {
        let raw = storage.load(&self.storage_key).await?;
        self.loaded = true;
        let Some(raw) = raw else {
            return Ok(());
        };
        match serde_json::from_str::<Vec<CartItem>>(&raw) {
            Ok(items) => {
                info!(key = %self.storage_key, lines = items.len(), "Cart restored");
                self.items = items;
            }
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "Stored cart is corrupt, starting empty");
            }
        }
        Ok(())
    }

    async fn persist(
        &mut self,
        items: Vec<CartItem>,
        storage: &Arc<dyn CartStorage>,
    ) -> Result<(), CartError> {
        let encoded = serde_json::to_string(&items).map_err(|e| CartError::Storage(e.to_string()))?;
        storage.save(&self.storage_key, &encoded).await?;
        self.items = items;
        Ok(())
    }

    fn position(&self, cart_item_id: &str) -> Result<usize, CartError> {
        self.items
            .iter()
            .position(|item| item.cart_item_id == cart_item_id)
            .ok_or_else(|| CartError::ItemNotFound(cart_item_id.to_string()))
    }
}

fn local_item_id(product_id: &str) -> String {
    format!("local_{}_{}", chrono::Utc::now().timestamp_millis(), product_id)
}

fn new_line(item: NewCartItem, quantity: u32) -> CartItem {
    CartItem {
        cart_item_id: local_item_id(&item.product_id),
        total_price: item.product_price * f64::from(quantity),
        product_id: item.product_id,
        product_name: item.product_name,
        product_price: item.product_price,
        quantity,
        images: item.images,
        discount: item.discount,
    }
}

#[async_trait]
impl ActorState for GuestCart {
    type Command = CartCommand;
    type Output = CartOutput;
    type Snapshot = CartSnapshot;
    type Context = Arc<dyn CartStorage>;
    type Error = CartError;

    async fn on_start(&mut self, storage: &Self::Context) -> Result<(), CartError> {
        self.restore(storage).await
    }

    async fn handle_command(
        &mut self,
        command: CartCommand,
        storage: &Self::Context,
        _mailbox: &Mailbox<Self>,
    ) -> Result<CartOutput, CartError> {
        if !self.loaded {
            warn!(key = %self.storage_key, "Stored cart not read yet, retrying");
            self.restore(storage).await?;
        }
        match command {
            CartCommand::Add { item, quantity } => {
                if quantity == 0 {
                    return Err(CartError::InvalidQuantity(0));
                }
                let mut items = self.items.clone();
                let line = match items.iter().position(|line| line.product_id == item.product_id) {
                    Some(index) => {
                        let merged = items[index].quantity.saturating_add(quantity);
                        items[index].set_quantity(merged);
                        items[index].clone()
                    }
                    None => {
                        let line = new_line(item, quantity);
                        items.push(line.clone());
                        line
                    }
                };
                self.persist(items, storage).await?;
                Ok(CartOutput::Added(line))
            }

            CartCommand::UpdateQuantity {
                cart_item_id,
                quantity,
            } => {
                let index = self.position(&cart_item_id)?;
                let quantity = u32::try_from(quantity)
                    .ok()
                    .filter(|q| *q > 0)
                    .ok_or(CartError::InvalidQuantity(quantity))?;
                let mut items = self.items.clone();
                items[index].set_quantity(quantity);
                let line = items[index].clone();
                self.persist(items, storage).await?;
                Ok(CartOutput::Updated(line))
            }

            CartCommand::Remove { cart_item_id } => {
                let index = self.position(&cart_item_id)?;
                let mut items = self.items.clone();
                items.remove(index);
                self.persist(items, storage).await?;
                Ok(CartOutput::Removed(cart_item_id))
            }

            CartCommand::Clear => {
                storage.remove(&self.storage_key).await?;
                self.items.clear();
                Ok(CartOutput::Cleared)
            }
        }
    }

    fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
        }
    }
}
