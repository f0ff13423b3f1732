//! Integration tests for the cart and quote endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use delicious_bites_core::Money;
use delicious_bites_integration_tests::TestContext;

const MARGHERITA: i64 = 1;
const CAESAR_SALAD: i64 = 3;

fn money(value: &Value) -> Money {
    value.as_str().unwrap().parse::<Money>().unwrap()
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn test_cart_starts_empty() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/cart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["lines"], json!([]));
    assert_eq!(response.body["item_count"], 0);
    assert_eq!(money(&response.body["subtotal"]), Money::ZERO);
}

#[tokio::test]
async fn test_adding_same_item_twice_increments_one_line() {
    let ctx = TestContext::new().await;

    ctx.add_to_cart(MARGHERITA, 2).await;
    let response = ctx.get("/cart").await;

    let lines = response.body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[0]["name"], "Margherita Pizza");
    assert_eq!(response.body["item_count"], 2);
    assert_eq!(money(&response.body["subtotal"]), Money::from_cents(2598));
}

#[tokio::test]
async fn test_item_count_sums_quantities_across_lines() {
    let ctx = TestContext::new().await;

    ctx.add_to_cart(MARGHERITA, 3).await;
    ctx.add_to_cart(CAESAR_SALAD, 1).await;
    let response = ctx.get("/cart").await;

    assert_eq!(response.body["lines"].as_array().unwrap().len(), 2);
    assert_eq!(response.body["item_count"], 4);
    assert_eq!(money(&response.body["subtotal"]), Money::from_cents(3 * 1299 + 899));
}

#[tokio::test]
async fn test_update_to_zero_or_below_removes_line() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(MARGHERITA, 1).await;
    ctx.add_to_cart(CAESAR_SALAD, 1).await;

    let response = ctx
        .post("/cart/update", &json!({ "item_id": MARGHERITA, "quantity": 0 }))
        .await;
    assert_eq!(response.body["lines"].as_array().unwrap().len(), 1);

    let response = ctx
        .post("/cart/update", &json!({ "item_id": CAESAR_SALAD, "quantity": -3 }))
        .await;
    assert_eq!(response.body["lines"], json!([]));
    assert_eq!(response.body["item_count"], 0);
}

#[tokio::test]
async fn test_update_sets_quantity() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(CAESAR_SALAD, 1).await;

    let response = ctx
        .post("/cart/update", &json!({ "item_id": CAESAR_SALAD, "quantity": 5 }))
        .await;

    assert_eq!(response.body["lines"][0]["quantity"], 5);
    assert_eq!(money(&response.body["subtotal"]), Money::from_cents(5 * 899));
}

#[tokio::test]
async fn test_update_of_absent_line_is_noop() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(MARGHERITA, 1).await;

    let response = ctx
        .post("/cart/update", &json!({ "item_id": CAESAR_SALAD, "quantity": 4 }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["item_count"], 1);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(MARGHERITA, 1).await;
    ctx.add_to_cart(CAESAR_SALAD, 2).await;

    let response = ctx
        .post("/cart/remove", &json!({ "item_id": MARGHERITA }))
        .await;
    assert_eq!(response.body["item_count"], 2);

    let response = ctx.post("/cart/clear", &json!({})).await;
    assert_eq!(response.body["lines"], json!([]));
}

#[tokio::test]
async fn test_remove_then_add_starts_at_one() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(MARGHERITA, 3).await;

    let response = ctx
        .post("/cart/remove", &json!({ "item_id": MARGHERITA }))
        .await;
    assert_eq!(response.body["lines"], json!([]));

    ctx.add_to_cart(MARGHERITA, 1).await;
    let response = ctx.get("/cart").await;
    assert_eq!(response.body["lines"][0]["quantity"], 1);
    assert_eq!(money(&response.body["subtotal"]), Money::from_cents(1299));
}

#[tokio::test]
async fn test_subtotal_matches_lines_after_each_change() {
    let ctx = TestContext::new().await;
    let steps = [
        ("/cart/add", json!({ "item_id": MARGHERITA })),
        ("/cart/add", json!({ "item_id": CAESAR_SALAD })),
        ("/cart/update", json!({ "item_id": MARGHERITA, "quantity": 4 })),
        ("/cart/add", json!({ "item_id": 8 })),
        ("/cart/remove", json!({ "item_id": CAESAR_SALAD })),
        ("/cart/add", json!({ "item_id": CAESAR_SALAD })),
        ("/cart/update", json!({ "item_id": 8, "quantity": 0 })),
        ("/cart/add", json!({ "item_id": MARGHERITA })),
    ];

    for (path, body) in &steps {
        let response = ctx.post(path, body).await;
        assert_eq!(response.status, StatusCode::OK, "{path} {body}");

        let lines = response.body["lines"].as_array().unwrap();
        let expected: Money = lines
            .iter()
            .map(|line| {
                let quantity = u32::try_from(line["quantity"].as_u64().unwrap()).unwrap();
                money(&line["price"]).times(quantity)
            })
            .sum();
        let count: u64 = lines.iter().map(|line| line["quantity"].as_u64().unwrap()).sum();
        assert_eq!(money(&response.body["subtotal"]), expected, "{path} {body}");
        assert_eq!(response.body["item_count"], count, "{path} {body}");
    }

    let response = ctx.get("/cart").await;
    assert_eq!(response.body["item_count"], 6);
    assert_eq!(money(&response.body["subtotal"]), Money::from_cents(5 * 1299 + 899));
}

#[tokio::test]
async fn test_update_quantity_is_capped() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(MARGHERITA, 1).await;

    let response = ctx
        .post(
            "/cart/update",
            &json!({ "item_id": MARGHERITA, "quantity": 4_000_000_000_i64 }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["lines"][0]["quantity"], 999);
    assert_eq!(money(&response.body["subtotal"]), Money::from_cents(999 * 1299));
}

#[tokio::test]
async fn test_adding_unknown_item_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.post("/cart/add", &json!({ "item_id": 999 })).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(ctx.state.cart().snapshot().await.is_empty());
}

// =============================================================================
// Quote
// =============================================================================

#[tokio::test]
async fn test_pickup_quote_has_no_fee_and_eight_percent_tax() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(MARGHERITA, 1).await;
    ctx.add_to_cart(CAESAR_SALAD, 1).await;

    let response = ctx.get("/checkout/quote?delivery_type=pickup").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(money(&response.body["subtotal"]), Money::from_cents(2198));
    assert_eq!(money(&response.body["delivery_fee"]), Money::ZERO);
    assert_eq!(money(&response.body["tax"]).rounded(), Money::from_cents(176));
    assert_eq!(money(&response.body["total"]).rounded(), Money::from_cents(2374));
    assert_eq!(response.body["lead_time"], "15-20 min");
}

#[tokio::test]
async fn test_delivery_fee_below_threshold() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(MARGHERITA, 1).await;

    let response = ctx.get("/checkout/quote?delivery_type=delivery").await;

    assert_eq!(money(&response.body["delivery_fee"]), Money::from_cents(299));
    assert_eq!(response.body["lead_time"], "30-45 min");
}

#[tokio::test]
async fn test_delivery_is_free_above_threshold() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart(MARGHERITA, 2).await;

    let response = ctx.get("/checkout/quote").await;

    assert_eq!(response.body["delivery_type"], "delivery");
    assert_eq!(money(&response.body["delivery_fee"]), Money::ZERO);
}

// =============================================================================
// Menu
// =============================================================================

#[tokio::test]
async fn test_menu_filters_vegetarian_and_sorts_by_price() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/menu?dietary=vegetarian&sort=price-low").await;

    let items = response.body["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|item| item["is_vegetarian"] == true));
    let prices: Vec<Money> = items.iter().map(|item| money(&item["price"])).collect();
    assert!(prices.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[tokio::test]
async fn test_menu_item_lookup() {
    let ctx = TestContext::new().await;

    let found = ctx.get("/menu/1").await;
    let missing = ctx.get("/menu/999").await;

    assert_eq!(found.body["name"], "Margherita Pizza");
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
