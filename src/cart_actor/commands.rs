//! Messages understood by the guest cart actor.

use crate::model::CartItem;

/// Product details needed to put a product into the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: String,
    pub product_name: String,
    pub product_price: f64,
    pub images: Vec<String>,
    pub discount: Option<f64>,
}

impl NewCartItem {
    pub fn new(product_id: impl Into<String>, product_name: impl Into<String>, product_price: f64) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            product_price,
            images: Vec::new(),
            discount: None,
        }
    }
}

/// Mutations of the guest cart.
#[derive(Debug, Clone)]
pub enum CartCommand {
    /// Add `quantity` units. Merges into the existing line of the same product.
    Add { item: NewCartItem, quantity: u32 },
    /// Replace the quantity of a line. Values below 1 are rejected.
    UpdateQuantity { cart_item_id: String, quantity: i64 },
    Remove { cart_item_id: String },
    Clear,
}

/// Results of [`CartCommand`]s, one variant per command.
#[derive(Debug, Clone, PartialEq)]
pub enum CartOutput {
    Added(CartItem),
    Updated(CartItem),
    Removed(String),
    Cleared,
}
