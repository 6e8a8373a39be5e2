//! End-to-end API tests for the shop: catalog management, guest carts,
//! checkout, order access control, and review moderation.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, delete, delete_auth, get, get_auth, patch_json, patch_json_auth, post_json,
    post_json_auth, register_customer, seed_operator,
};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a JSON field that serializes a decimal (string or number form).
fn dec_value(v: &serde_json::Value) -> Decimal {
    match v {
        serde_json::Value::String(s) => Decimal::from_str(s).unwrap(),
        other => Decimal::from_str(&other.to_string()).unwrap(),
    }
}

/// Create an active category and return its id.
async fn create_category(app: &Router, token: &str, title: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        token,
        json!({ "title": title, "is_active": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a product and return its id.
async fn create_product(
    app: &Router,
    token: &str,
    category_id: i64,
    title: &str,
    slug: &str,
    price: &str,
    inventory: i64,
) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/products",
        token,
        json!({
            "category_id": category_id,
            "title": title,
            "slug": slug,
            "price": price,
            "inventory": inventory,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a cart and return its id.
async fn create_cart(app: &Router) -> String {
    let response = post_json(app, "/api/v1/cart", json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Test: guest cart lifecycle — add, merge, view, update, remove
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn guest_cart_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let operator = seed_operator(&app, &pool).await;

    let category_id = create_category(&app, &operator, "Gadgets").await;
    let widget = create_product(&app, &operator, category_id, "Widget", "widget", "10.00", 5).await;

    let cart_id = create_cart(&app).await;

    // Add twice; the quantities merge into one line.
    let response = post_json(
        &app,
        &format!("/api/v1/cart/{cart_id}/items"),
        json!({ "product_id": widget, "quantity": 2 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        &app,
        &format!("/api/v1/cart/{cart_id}/items"),
        json!({ "product_id": widget, "quantity": 3 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let line = body_json(response).await;
    assert_eq!(line["quantity"], 5);

    // The priced view: one line, live total.
    let view = body_json(get(&app, &format!("/api/v1/cart/{cart_id}")).await).await;
    assert_eq!(view["items"].as_array().unwrap().len(), 1);
    assert_eq!(dec_value(&view["total_price"]), Decimal::from_str("50").unwrap());

    // Overwrite the quantity.
    let response = patch_json(
        &app,
        &format!("/api/v1/cart/{cart_id}/items/{widget}"),
        json!({ "quantity": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["quantity"], 1);

    // Quantity zero is rejected; removal is a DELETE.
    let response = patch_json(
        &app,
        &format!("/api/v1/cart/{cart_id}/items/{widget}"),
        json!({ "quantity": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete(&app, &format!("/api/v1/cart/{cart_id}/items/{widget}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Removing a line that is already gone is 404.
    let response = delete(&app, &format!("/api/v1/cart/{cart_id}/items/{widget}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: adding an out-of-stock product fails for any quantity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_out_of_stock_product_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let operator = seed_operator(&app, &pool).await;

    let category_id = create_category(&app, &operator, "Gadgets").await;
    let sold_out =
        create_product(&app, &operator, category_id, "Sold Out", "sold-out", "10.00", 0).await;

    let cart_id = create_cart(&app).await;
    for quantity in [1, 100] {
        let response = post_json(
            &app,
            &format!("/api/v1/cart/{cart_id}/items"),
            json!({ "product_id": sold_out, "quantity": quantity }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// Test: checkout produces an order and consumes the cart
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn checkout_flow(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let operator = seed_operator(&app, &pool).await;

    let category_id = create_category(&app, &operator, "Gadgets").await;
    let product_a = create_product(&app, &operator, category_id, "A", "a", "10.00", 10).await;
    let product_b = create_product(&app, &operator, category_id, "B", "b", "5.00", 10).await;

    let cart_id = create_cart(&app).await;
    post_json(
        &app,
        &format!("/api/v1/cart/{cart_id}/items"),
        json!({ "product_id": product_a, "quantity": 2 }),
    )
    .await;
    post_json(
        &app,
        &format!("/api/v1/cart/{cart_id}/items"),
        json!({ "product_id": product_b, "quantity": 1 }),
    )
    .await;

    let customer = register_customer(&app, "alice").await;

    // Checkout requires authentication.
    let response = post_json(&app, "/api/v1/orders", json!({ "cart_id": cart_id })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response =
        post_json_auth(&app, "/api/v1/orders", &customer, json!({ "cart_id": cart_id })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;
    let order_id = order["id"].as_i64().unwrap();

    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(dec_value(&items[0]["price"]), Decimal::from_str("20").unwrap());
    assert_eq!(dec_value(&items[1]["price"]), Decimal::from_str("5").unwrap());
    assert_eq!(dec_value(&order["total_price"]), Decimal::from_str("25").unwrap());
    assert_eq!(order["is_delivered"], false);

    // The cart is gone.
    let response = get(&app, &format!("/api/v1/cart/{cart_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The customer sees their order in the listing.
    let orders = body_json(get_auth(&app, "/api/v1/orders", &customer).await).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);

    // Another customer can neither list nor fetch it.
    let stranger = register_customer(&app, "mallory").await;
    let orders = body_json(get_auth(&app, "/api/v1/orders", &stranger).await).await;
    assert!(orders.as_array().unwrap().is_empty());
    let response = get_auth(&app, &format!("/api/v1/orders/{order_id}"), &stranger).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Only operators flip the delivery flag, and only forward.
    let response = patch_json_auth(
        &app,
        &format!("/api/v1/orders/{order_id}"),
        &customer,
        json!({ "is_delivered": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = patch_json_auth(
        &app,
        &format!("/api/v1/orders/{order_id}"),
        &operator,
        json!({ "is_delivered": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["is_delivered"], true);

    let response = patch_json_auth(
        &app,
        &format!("/api/v1/orders/{order_id}"),
        &operator,
        json!({ "is_delivered": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: checkout rejections — empty cart and unknown cart
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn checkout_rejections(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let customer = register_customer(&app, "bob").await;

    // Empty cart: 400, and the cart survives for a retry.
    let cart_id = create_cart(&app).await;
    let response =
        post_json_auth(&app, "/api/v1/orders", &customer, json!({ "cart_id": cart_id })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("cart is empty"));

    let response = get(&app, &format!("/api/v1/cart/{cart_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Unknown cart: 404.
    let response = post_json_auth(
        &app,
        "/api/v1/orders",
        &customer,
        json!({ "cart_id": "00000000-0000-4000-8000-000000000000" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: review moderation — hidden by default, operator-gated visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn review_moderation_flow(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let operator = seed_operator(&app, &pool).await;

    let category_id = create_category(&app, &operator, "Gadgets").await;
    create_product(&app, &operator, category_id, "Widget", "widget", "10.00", 5).await;

    // Posting a review requires authentication.
    let response = post_json(
        &app,
        "/api/v1/products/widget/reviews",
        json!({ "description": "Anonymous", "recommendation": "neutral" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let customer = register_customer(&app, "carol").await;
    let response = post_json_auth(
        &app,
        "/api/v1/products/widget/reviews",
        &customer,
        json!({ "description": "Love it", "recommendation": "recommend" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let review = body_json(response).await;
    let review_id = review["id"].as_i64().unwrap();
    assert_eq!(review["is_visible"], false);

    // Hidden from the public, visible to operators.
    let public = body_json(get(&app, "/api/v1/products/widget/reviews").await).await;
    assert!(public.as_array().unwrap().is_empty());
    let for_operator =
        body_json(get_auth(&app, "/api/v1/products/widget/reviews", &operator).await).await;
    assert_eq!(for_operator.as_array().unwrap().len(), 1);

    // And it sits in the moderation queue.
    let pending = body_json(get_auth(&app, "/api/v1/admin/reviews/pending", &operator).await).await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    // A non-operator cannot toggle visibility.
    let response = patch_json_auth(
        &app,
        &format!("/api/v1/products/widget/reviews/{review_id}"),
        &customer,
        json!({ "is_visible": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The operator can.
    let response = patch_json_auth(
        &app,
        &format!("/api/v1/products/widget/reviews/{review_id}"),
        &operator,
        json!({ "is_visible": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let public = body_json(get(&app, "/api/v1/products/widget/reviews").await).await;
    assert_eq!(public.as_array().unwrap().len(), 1);
    assert_eq!(public[0]["username"], "carol");
}

// ---------------------------------------------------------------------------
// Test: catalog writes are operator-gated; referenced categories stay put
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn catalog_write_protection(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let operator = seed_operator(&app, &pool).await;
    let customer = register_customer(&app, "dave").await;

    // A customer cannot create catalog entries.
    let response = post_json_auth(
        &app,
        "/api/v1/categories",
        &customer,
        json!({ "title": "Nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let category_id = create_category(&app, &operator, "Gadgets").await;
    create_product(&app, &operator, category_id, "Widget", "widget", "10.00", 5).await;

    // Deleting a category that still has products is a conflict, not a
    // silent cascade.
    let response = delete_auth(&app, &format!("/api/v1/categories/{category_id}"), &operator).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The public product listing shows the product with its final price.
    let products = body_json(get(&app, "/api/v1/products").await).await;
    assert_eq!(products.as_array().unwrap().len(), 1);
    assert_eq!(
        dec_value(&products[0]["final_price"]),
        Decimal::from_str("10").unwrap()
    );
}

// ---------------------------------------------------------------------------
// Test: promotions discount the displayed and charged price
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn promotion_pricing_flow(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let operator = seed_operator(&app, &pool).await;

    // Discounts outside [0, 1) are rejected.
    let response = post_json_auth(
        &app,
        "/api/v1/promotions",
        &operator,
        json!({ "discount": "1.5" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        &app,
        "/api/v1/promotions",
        &operator,
        json!({ "discount": "0.25" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let promotion_id = body_json(response).await["id"].as_i64().unwrap();

    let category_id = create_category(&app, &operator, "Gadgets").await;
    let response = post_json_auth(
        &app,
        "/api/v1/products",
        &operator,
        json!({
            "category_id": category_id,
            "title": "Deal",
            "slug": "deal",
            "promotion_id": promotion_id,
            "price": "9.99",
            "inventory": 10,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let product_id = body_json(response).await["id"].as_i64().unwrap();

    // 25% off 9.99 floors to 7.
    let detail = body_json(get(&app, "/api/v1/products/deal").await).await;
    assert_eq!(dec_value(&detail["final_price"]), Decimal::from_str("7").unwrap());

    // The same price flows into the cart view and the frozen order line.
    let cart_id = create_cart(&app).await;
    post_json(
        &app,
        &format!("/api/v1/cart/{cart_id}/items"),
        json!({ "product_id": product_id, "quantity": 2 }),
    )
    .await;
    let view = body_json(get(&app, &format!("/api/v1/cart/{cart_id}")).await).await;
    assert_eq!(dec_value(&view["total_price"]), Decimal::from_str("14").unwrap());

    let customer = register_customer(&app, "erin").await;
    let response =
        post_json_auth(&app, "/api/v1/orders", &customer, json!({ "cart_id": cart_id })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let order = body_json(response).await;
    assert_eq!(dec_value(&order["total_price"]), Decimal::from_str("14").unwrap());
}

// ---------------------------------------------------------------------------
// Test: customer profile — provisioned at registration, self-editable
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn customer_profile_flow(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let customer = register_customer(&app, "frank").await;

    // The profile exists immediately after registration, at the lowest tier.
    let me = body_json(get_auth(&app, "/api/v1/customer/me", &customer).await).await;
    assert_eq!(me["username"], "frank");
    assert_eq!(me["membership_tier"], "bronze");
    let customer_id = me["id"].as_i64().unwrap();

    // Self-service address edit.
    let response = common::send(
        &app,
        axum::http::Method::PUT,
        "/api/v1/customer/me",
        Some(&customer),
        Some(json!({ "address": "1 Main Street", "postal_code": "12345" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let me = body_json(get_auth(&app, "/api/v1/customer/me", &customer).await).await;
    assert_eq!(me["address"], "1 Main Street");

    // Tier changes are operator-only, through the admin surface.
    let operator = seed_operator(&app, &pool).await;
    let response = patch_json_auth(
        &app,
        &format!("/api/v1/admin/customers/{customer_id}"),
        &operator,
        json!({ "membership_tier": "gold" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["membership_tier"], "gold");
}

// ---------------------------------------------------------------------------
// Test: admin reports aggregate the catalog and order books
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_reports(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let operator = seed_operator(&app, &pool).await;
    let customer = register_customer(&app, "grace").await;

    // Reports are operator-only.
    let response = get_auth(&app, "/api/v1/admin/reports/catalog", &customer).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let category_id = create_category(&app, &operator, "Gadgets").await;
    let widget = create_product(&app, &operator, category_id, "Widget", "widget", "10.00", 5).await;
    create_product(&app, &operator, category_id, "Gone", "gone", "3.00", 0).await;

    let report = body_json(get_auth(&app, "/api/v1/admin/reports/catalog", &operator).await).await;
    assert_eq!(report["out_of_stock_products"], 1);
    let categories = report["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["product_count"], 2);

    // One order of 2 x 10.00 shows up as 20 revenue, 1 undelivered.
    let cart_id = create_cart(&app).await;
    post_json(
        &app,
        &format!("/api/v1/cart/{cart_id}/items"),
        json!({ "product_id": widget, "quantity": 2 }),
    )
    .await;
    post_json_auth(&app, "/api/v1/orders", &customer, json!({ "cart_id": cart_id })).await;

    let report = body_json(get_auth(&app, "/api/v1/admin/reports/orders", &operator).await).await;
    assert_eq!(report["total_orders"], 1);
    assert_eq!(report["undelivered_orders"], 1);
    assert_eq!(dec_value(&report["total_revenue"]), Decimal::from_str("20").unwrap());
}
