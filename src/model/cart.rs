use serde::{Deserialize, Serialize};

/// One line of a cart. The guest cart persists these as a JSON array under its storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub cart_item_id: String,
    pub product_id: String,
    pub product_name: String,
    pub product_price: f64,
    pub total_price: f64,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
}

impl CartItem {
    /// Set the quantity and keep `total_price` in step with it.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = self.product_price * f64::from(quantity);
    }
}

/// Server-side cart of an authenticated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub cart_id: String,
    pub account_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stored_record_uses_camel_case_keys() {
        let item: CartItem = serde_json::from_value(json!({
            "cartItemId": "local_1700000000000_p1",
            "productId": "p1",
            "productName": "Burger",
            "productPrice": 45000,
            "totalPrice": 90000,
            "quantity": 2
        }))
        .unwrap();
        assert_eq!(item.quantity, 2);
        assert!(item.images.is_empty());

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["cartItemId"], "local_1700000000000_p1");
        assert!(value.get("images").is_none());
    }

    #[test]
    fn test_set_quantity_recomputes_total() {
        let mut item = CartItem {
            cart_item_id: "c".into(),
            product_id: "p".into(),
            product_name: "Fries".into(),
            product_price: 25000.0,
            total_price: 25000.0,
            quantity: 1,
            images: vec![],
            discount: None,
        };
        item.set_quantity(3);
        assert_eq!(item.total_price, 75000.0);
    }
}
