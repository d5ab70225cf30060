//! Public storefront surface: products, categories, checkout, fallback.

use serde_json::json;

use storefront::models::Category;

mod common;
use common::*;

#[tokio::test]
async fn health_reports_ok() {
    let ctx = test_context();
    let (status, body) = send(app(&ctx), get("/health")).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn list_products_returns_all() {
    let ctx = test_context();
    ctx.store
        .add_product(test_product("p1", "Widget", 1000, Some("price_1")));
    ctx.store
        .add_product(test_product("p2", "Gadget", 500, None));

    let (status, body) = send(app(&ctx), get("/products")).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["productId"], "p1");
    assert_eq!(products[0]["price"], 1000);
}

#[tokio::test]
async fn get_product_by_id() {
    let ctx = test_context();
    ctx.store
        .add_product(test_product("p1", "Widget", 1000, None));

    let (status, body) = send(app(&ctx), get("/products/p1")).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["productName"], "Widget");
}

#[tokio::test]
async fn get_missing_product_is_404() {
    let ctx = test_context();
    let (status, body) = send(app(&ctx), get("/products/nope")).await;
    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn list_categories_returns_all() {
    let ctx = test_context();
    ctx.store.add_category(Category {
        category_id: "cat1".to_string(),
        name: "Tools".to_string(),
        image_url: None,
    });

    let (status, body) = send(app(&ctx), get("/categories")).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Tools");
}

#[tokio::test]
async fn checkout_redirects_to_processor_session() {
    let ctx = test_context();
    let request = json_request(
        "POST",
        "/checkout",
        &json!({
            "priceId": "price_1",
            "quantity": 2,
            "success_url": "https://shop.example.com/ok",
            "cancel_url": "https://shop.example.com/cancel"
        }),
    );

    let response = tower::ServiceExt::oneshot(app(&ctx), request).await.unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get("location").unwrap(),
        TEST_CHECKOUT_URL
    );
}

#[tokio::test]
async fn unknown_route_falls_back_to_json_404() {
    let ctx = test_context();
    let (status, body) = send(app(&ctx), get("/no/such/route")).await;
    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
}
