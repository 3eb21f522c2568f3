use fastfood_client::api::BackendClient;
use fastfood_client::checkout::{
    CheckoutError, CheckoutForm, CheckoutOrchestrator, CheckoutOutcome, CheckoutRequest,
    CheckoutStage, FormError, ShippingMethod,
};
use fastfood_client::geocoding::testing::StubGeocoder;
use fastfood_client::geocoding::{AddressSuggestion, AddressValidationGate, Rejection, SelectedAddress, StructuredAddress};
use fastfood_client::http::mock::MockTransport;
use fastfood_client::http::Method;
use fastfood_client::model::CartItem;
use serde_json::json;
use std::sync::Arc;

use CheckoutStage::*;

fn street_level() -> AddressSuggestion {
    let mut suggestion = StubGeocoder::suggestion(1, "12 Lê Lợi, Bến Nghé, Hồ Chí Minh");
    suggestion.address = StructuredAddress {
        house_number: Some("12".into()),
        road: Some("Lê Lợi".into()),
        suburb: Some("Bến Nghé".into()),
        city: Some("Hồ Chí Minh".into()),
        ..Default::default()
    };
    suggestion
}

fn items() -> Vec<CartItem> {
    vec![
        CartItem {
            cart_item_id: "local_1_p1".into(),
            product_id: "p1".into(),
            product_name: "Burger bò".into(),
            product_price: 45_000.0,
            total_price: 90_000.0,
            quantity: 2,
            images: vec![],
            discount: None,
        },
        CartItem {
            cart_item_id: "local_2_p2".into(),
            product_id: "p2".into(),
            product_name: "Trà đào".into(),
            product_price: 25_000.0,
            total_price: 25_000.0,
            quantity: 1,
            images: vec![],
            discount: None,
        },
    ]
}

fn request() -> CheckoutRequest {
    let selected = SelectedAddress::from(street_level());
    let mut form = CheckoutForm {
        receiver_name: "Lan".into(),
        receiver_phone: "0901234567".into(),
        receiver_email: Some("lan@example.com".into()),
        shipping_method: ShippingMethod::Express4h,
        ..Default::default()
    };
    form.apply_selection(&selected);
    CheckoutRequest {
        customer_id: "c1".into(),
        restaurant_id: "r1".into(),
        form,
        items: items(),
        selected: Some(selected),
    }
}

fn order_json() -> serde_json::Value {
    json!({
        "orderId": "o42",
        "customerId": "c1",
        "restaurantId": "r1",
        "deliveryAddress": "12 Lê Lợi",
        "status": "PENDING",
        "orderItems": []
    })
}

struct Harness {
    orchestrator: CheckoutOrchestrator,
    backend: Arc<MockTransport>,
    geocoder: Arc<StubGeocoder>,
}

fn harness(geocoder: StubGeocoder) -> Harness {
    let backend = Arc::new(MockTransport::new());
    let geocoder = Arc::new(geocoder);
    let client = Arc::new(BackendClient::with_root(backend.clone(), "http://api/api"));
    let orchestrator = CheckoutOrchestrator::new(
        AddressValidationGate::new(geocoder.clone()),
        client.clone(),
        client.clone(),
        client,
    );
    Harness {
        orchestrator,
        backend,
        geocoder,
    }
}

/// Pattern 1: Full flow against scripted services.
#[tokio::test]
async fn test_happy_path_redirects_to_payment() {
    let h = harness(StubGeocoder::with_results(vec![street_level()]));
    h.backend.respond_json(201, order_json());
    h.backend.respond(204, "");
    h.backend.respond_json(200, json!({"paymentUrl": "https://pay.example/vnp?o=o42"}));

    let report = h.orchestrator.checkout(&request()).await;

    assert_eq!(
        report.outcome,
        CheckoutOutcome::RedirectToPayment {
            order_id: "o42".into(),
            url: "https://pay.example/vnp?o=o42".into(),
        }
    );
    assert_eq!(
        report.stages,
        vec![CollectingInfo, ValidatingAddress, CreatingOrder, CreatingPayment, Redirecting]
    );

    let requests = h.backend.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url, "http://api/api/order");
    assert_eq!(requests[1].url, "http://api/api/cart/account/c1/clear");
    assert_eq!(requests[2].url, "http://api/api/payments/create");

    let order = requests[0].body.as_ref().unwrap();
    assert_eq!(order["customerLatitude"], json!(10.7769));
    assert_eq!(order["deliveryAddress"], json!("12 Lê Lợi"));
    assert_eq!(order["ward"], json!("Bến Nghé"));
    assert_eq!(order["shippingFee"], json!(30000.0));
    assert_eq!(order["orderItems"][0]["quantity"], json!(2));

    // Goods plus shipping.
    let payment = requests[2].body.as_ref().unwrap();
    assert_eq!(payment["orderId"], json!("o42"));
    assert_eq!(payment["amount"], json!(145000.0));
}

#[tokio::test]
async fn test_missing_selection_blocks_before_any_call() {
    let h = harness(StubGeocoder::with_results(vec![street_level()]));
    let mut req = request();
    req.selected = None;

    let report = h.orchestrator.checkout(&req).await;

    assert_eq!(
        report.outcome,
        CheckoutOutcome::Rejected {
            stage: CollectingInfo,
            error: CheckoutError::Form(FormError::NoSelectedAddress),
        }
    );
    assert_eq!(
        report.outcome.message().as_deref(),
        Some("Please select an address from the suggestion list")
    );
    assert_eq!(report.stages, vec![CollectingInfo]);
    assert_eq!(h.geocoder.search_count(), 0);
    assert_eq!(h.backend.request_count(), 0);
}

#[tokio::test]
async fn test_edited_street_after_selection_blocks_order() {
    let h = harness(StubGeocoder::with_results(vec![street_level()]));
    let mut req = request();
    req.form.delivery_address = "999 Trần Hưng Đạo".into();

    let report = h.orchestrator.checkout(&req).await;

    assert_eq!(
        report.outcome,
        CheckoutOutcome::Rejected {
            stage: CollectingInfo,
            error: CheckoutError::Form(FormError::NoSelectedAddress),
        }
    );
    assert_eq!(h.geocoder.search_count(), 0);
    assert_eq!(h.backend.request_count(), 0);
}

#[tokio::test]
async fn test_edited_ward_after_selection_blocks_order() {
    let h = harness(StubGeocoder::with_results(vec![street_level()]));
    let mut req = request();
    req.form.ward = "Bến Thành".into();

    let report = h.orchestrator.checkout(&req).await;

    assert!(matches!(
        report.outcome,
        CheckoutOutcome::Rejected { error: CheckoutError::Form(FormError::NoSelectedAddress), .. }
    ));
    assert_eq!(h.backend.request_count(), 0);
}

#[tokio::test]
async fn test_empty_cart_is_blocked() {
    let h = harness(StubGeocoder::with_results(vec![street_level()]));
    let mut req = request();
    req.items.clear();

    let report = h.orchestrator.checkout(&req).await;

    assert!(matches!(
        report.outcome,
        CheckoutOutcome::Rejected { error: CheckoutError::Form(FormError::EmptyCart), .. }
    ));
    assert_eq!(h.backend.request_count(), 0);
}

/// Pattern 2: The validation gate stops coarse addresses.
#[tokio::test]
async fn test_province_only_address_is_rejected() {
    let mut province = StubGeocoder::suggestion(9, "Hồ Chí Minh, Việt Nam");
    province.address = StructuredAddress {
        state: Some("Hồ Chí Minh".into()),
        country: Some("Việt Nam".into()),
        ..Default::default()
    };
    let h = harness(StubGeocoder::with_results(vec![province]));

    let report = h.orchestrator.checkout(&request()).await;

    assert_eq!(
        report.outcome,
        CheckoutOutcome::Rejected {
            stage: ValidatingAddress,
            error: CheckoutError::Address(Rejection::NotSpecific),
        }
    );
    assert_eq!(report.stages, vec![CollectingInfo, ValidatingAddress, CollectingInfo]);
    assert_eq!(h.geocoder.searches()[0].1, 1);
    assert_eq!(h.backend.request_count(), 0);
}

#[tokio::test]
async fn test_unknown_address_is_rejected() {
    let h = harness(StubGeocoder::with_results(vec![]));

    let report = h.orchestrator.checkout(&request()).await;

    assert!(matches!(
        report.outcome,
        CheckoutOutcome::Rejected {
            error: CheckoutError::Address(Rejection::NotFound),
            ..
        }
    ));
    assert_eq!(h.backend.request_count(), 0);
}

/// Pattern 3: Backend failures.
#[tokio::test]
async fn test_order_failure_surfaces_backend_message() {
    let h = harness(StubGeocoder::with_results(vec![street_level()]));
    h.backend.respond_json(400, json!({"message": "Restaurant is closed"}));

    let report = h.orchestrator.checkout(&request()).await;

    assert_eq!(
        report.outcome,
        CheckoutOutcome::Rejected {
            stage: CreatingOrder,
            error: CheckoutError::OrderFailed("Restaurant is closed".into()),
        }
    );
    assert_eq!(report.outcome.order_id(), None);
    assert_eq!(h.backend.request_count(), 1);
}

#[tokio::test]
async fn test_payment_failure_keeps_the_order() {
    let h = harness(StubGeocoder::with_results(vec![street_level()]));
    h.backend.respond_json(201, order_json());
    h.backend.respond(204, "");
    h.backend.respond_json(502, json!({"message": "Gateway unavailable"}));

    let report = h.orchestrator.checkout(&request()).await;

    assert_eq!(
        report.outcome,
        CheckoutOutcome::OrderHistory {
            order_id: "o42".into(),
            reason: "Gateway unavailable".into(),
        }
    );
    assert_eq!(report.stages.last(), Some(&CreatingPayment));
}

#[tokio::test]
async fn test_cart_clear_failure_does_not_stop_checkout() {
    let h = harness(StubGeocoder::with_results(vec![street_level()]));
    h.backend.respond_json(201, order_json());
    h.backend.respond_json(500, json!({"message": "boom"}));
    h.backend.respond_json(200, json!({"paymentUrl": "https://pay.example/x"}));

    let report = h.orchestrator.checkout(&request()).await;

    assert_eq!(report.outcome.order_id(), Some("o42"));
    assert!(matches!(report.outcome, CheckoutOutcome::RedirectToPayment { .. }));
}

#[tokio::test]
async fn test_blank_payment_url_goes_to_order_history() {
    let h = harness(StubGeocoder::with_results(vec![street_level()]));
    h.backend.respond_json(201, order_json());
    h.backend.respond(204, "");
    h.backend.respond_json(200, json!({"paymentUrl": "  "}));

    let report = h.orchestrator.checkout(&request()).await;

    assert!(matches!(report.outcome, CheckoutOutcome::OrderHistory { .. }));
}

#[test]
fn test_amount_due_adds_shipping() {
    let mut req = request();
    assert_eq!(req.subtotal(), 115_000.0);
    assert_eq!(req.amount_due(), 145_000.0);

    req.form.shipping_method = ShippingMethod::SuperFast;
    assert_eq!(req.amount_due(), 165_000.0);
}
