//! Demo: fill a guest cart, look up an address, and print what checkout would charge.

use fastfood_client::cart_actor::NewCartItem;
use fastfood_client::checkout::ShippingMethod;
use fastfood_client::config::Settings;
use fastfood_client::geocoding::AddressQuery;
use fastfood_client::lifecycle::{setup_tracing, Storefront};
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings = Settings::load().map_err(|e| e.to_string())?;
    let store = Storefront::new(settings).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("guest_cart");
    let subtotal = async {
        let burger = NewCartItem::new("p1", "Burger bò", 45_000.0);
        store.cart.add(burger.clone(), None).await?;
        store.cart.add(burger, None).await?;
        store
            .cart
            .add(NewCartItem::new("p2", "Khoai tây chiên", 25_000.0), Some(1))
            .await?;
        info!(items = store.cart.item_count().await?, "Cart filled");
        store.cart.total_amount().await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let fee = ShippingMethod::default().fee();
    info!(subtotal, fee, total = subtotal + fee, "Amount due at checkout");

    let street = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "123 Nguyễn Huệ".to_string());
    let query = AddressQuery::new(street).with_city("Hồ Chí Minh");
    let outcome = store
        .suggestions
        .suggest(&query)
        .instrument(tracing::info_span!("address_lookup"))
        .await;
    match outcome.failure_reason() {
        Some(reason) => warn!(%reason, "Address lookup failed"),
        None => {
            for suggestion in outcome.suggestions() {
                info!(place_id = suggestion.place_id, label = %suggestion.label, "Suggestion");
            }
        }
    }

    store.cart.clear().await.map_err(|e| e.to_string())?;
    store.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
