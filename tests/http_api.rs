use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use opensase_storefront::config::AppConfig;
use opensase_storefront::http::{request_id::REQUEST_ID_HEADER, router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(AppConfig { max_line_quantity: 10, ..AppConfig::default() }))
}

async fn post(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn tee_product() -> Value {
    json!({
        "id": "P1",
        "name": "Linen Tee",
        "base_price": "100.00",
        "variants": [
            {"id": "v1", "product_id": "P1", "sku": "TEE-S-BLK", "size": "S", "color": "Black", "color_hex": "#000000", "stock_quantity": 5},
            {"id": "v2", "product_id": "P1", "sku": "TEE-S-RED", "size": "S", "color": "Red", "stock_quantity": 0},
            {"id": "v3", "product_id": "P1", "sku": "TEE-M-BLK", "size": "M", "color": "Black", "price": "120.00", "stock_quantity": 3, "reserved_stock": 1}
        ]
    })
}

#[tokio::test]
async fn health_reports_service() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn request_id_is_echoed() {
    let response = app()
        .oneshot(Request::builder().uri("/health").header(REQUEST_ID_HEADER, "req-42").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-42");
}

#[tokio::test]
async fn shipped_order_progress() {
    let (status, body) = post(
        app(),
        "/api/v1/orders/progress",
        json!({"id": "o1", "order_number": "ORD-1001", "status": "SHIPPED"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_label"], "Shipped");
    assert_eq!(body["progress"]["current"], "SHIPPED");
    let completed: Vec<bool> = body["progress"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["completed"].as_bool().unwrap())
        .collect();
    assert_eq!(completed, vec![true, true, true, true, false]);
    assert_eq!(body["progress"]["show_pay_button"], false);
}

#[tokio::test]
async fn cancelled_order_shows_terminal_indicator() {
    let (status, body) = post(
        app(),
        "/api/v1/orders/progress",
        json!({"id": "o2", "order_number": "ORD-1002", "status": "CANCELLED"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["progress"]["steps"], json!([]));
    assert_eq!(body["progress"]["terminal"]["label"], "Cancelled");
    assert_eq!(body["progress"]["current"], Value::Null);
}

#[tokio::test]
async fn unknown_order_status_degrades() {
    let (status, body) = post(
        app(),
        "/api/v1/orders/progress",
        json!({"id": "o3", "order_number": "ORD-1003", "status": "ON_HOLD"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status_label"], "Unknown");
    assert_eq!(body["progress"]["steps"].as_array().unwrap().len(), 5);
    assert_eq!(body["progress"]["terminal"], Value::Null);
}

#[tokio::test]
async fn size_only_selection_is_ambiguous() {
    let (status, body) = post(
        app(),
        "/api/v1/products/resolve",
        json!({"product": tee_product(), "selection": {"size": "S"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"], "ambiguous");
    assert_eq!(body["variant"], Value::Null);
    assert_eq!(body["available_stock"], 0);
    assert_eq!(body["display_price"], json!({"min": "100.00", "max": "120.00"}));
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["options"]["size"], json!(["S", "M"]));
    assert_eq!(body["options"]["color_swatches"]["Black"], "#000000");
    assert_eq!(
        body["availability"]["color"],
        json!([{"value": "Black", "available": true}, {"value": "Red", "available": false}])
    );
}

#[tokio::test]
async fn full_selection_resolves_sku() {
    let (status, body) = post(
        app(),
        "/api/v1/products/resolve",
        json!({"product": tee_product(), "selection": {"size": "M", "color": "Black"}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["match"], "matched");
    assert_eq!(body["variant"]["sku"], "TEE-M-BLK");
    assert_eq!(body["display_price"], "120.00");
    assert_eq!(body["available_stock"], 2);
}

#[tokio::test]
async fn simple_product_uses_base_price_and_stock() {
    let (status, body) = post(
        app(),
        "/api/v1/products/resolve",
        json!({"product": {"id": "P2", "base_price": "45.00", "currency": "EUR", "stock_quantity": 4}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requires_selection"], false);
    assert_eq!(body["match"], "not_found");
    assert_eq!(body["display_price"], "45.00");
    assert_eq!(body["currency"], "EUR");
    assert_eq!(body["available_stock"], 4);
    assert_eq!(body["availability"], json!({}));
}

#[tokio::test]
async fn resolve_rejects_negative_price() {
    let (status, body) = post(
        app(),
        "/api/v1/products/resolve",
        json!({"product": {"id": "P3", "base_price": "-1"}}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Validation failed"));
}

#[tokio::test]
async fn variant_availability_check() {
    let variant = json!({"id": "v1", "stock_quantity": 5, "reserved_stock": 2});
    let (status, body) = post(
        app(),
        "/api/v1/variants/availability",
        json!({"variant": variant, "quantity": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"available": true, "available_stock": 3}));

    let (_, body) = post(app(), "/api/v1/variants/availability", json!({"variant": variant, "quantity": 4})).await;
    assert_eq!(body["available"], false);
}

#[tokio::test]
async fn variant_availability_enforces_quantity_limits() {
    let variant = json!({"id": "v1", "stock_quantity": 50});
    let (status, _) = post(app(), "/api/v1/variants/availability", json!({"variant": variant, "quantity": 0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = post(app(), "/api/v1/variants/availability", json!({"variant": variant, "quantity": 11})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("exceeds the limit of 10"));
}

#[tokio::test]
async fn cart_totals_merge_lines() {
    let (status, body) = post(
        app(),
        "/api/v1/cart/totals",
        json!({
            "items": [
                {"product_id": "P1", "variant_id": "v1", "quantity": 2, "unit_price": "19.99"},
                {"product_id": "P1", "variant_id": "v1", "quantity": 1, "unit_price": "19.99"},
                {"product_id": "P2", "quantity": 1, "unit_price": "5.00"}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["item_count"], 4);
    assert_eq!(body["lines"].as_array().unwrap().len(), 2);
    assert_eq!(body["subtotal"]["amount"], "64.97");
}

#[tokio::test]
async fn cart_totals_reject_mixed_currency() {
    let (status, body) = post(
        app(),
        "/api/v1/cart/totals",
        json!({
            "currency": "USD",
            "items": [{"product_id": "P1", "quantity": 1, "unit_price": "10", "currency": "EUR"}]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("EUR"));
}

#[tokio::test]
async fn cart_totals_require_items() {
    let (status, _) = post(app(), "/api/v1/cart/totals", json!({"items": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cart_totals_reject_overflowing_price() {
    let (status, body) = post(
        app(),
        "/api/v1/cart/totals",
        json!({"items": [{"product_id": "P1", "quantity": 2, "unit_price": "79228162514264337593543950335"}]}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("too large"));

    let (status, _) = post(
        app(),
        "/api/v1/cart/totals",
        json!({
            "items": [
                {"product_id": "P1", "quantity": 1, "unit_price": "79228162514264337593543950335"},
                {"product_id": "P2", "quantity": 1, "unit_price": "1"}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
