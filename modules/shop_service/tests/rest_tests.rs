//! HTTP-level tests for the `/api` router

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{print_test_header, price, TestShop, CUSTOMER_PASSWORD};
use serde_json::{json, Value};
use shop_service::contract::model::{OrderDraft, OrderLineDraft};
use tower::ServiceExt;

fn router(shop: &TestShop) -> Router {
    shop.module
        .register_rest(Router::new())
        .expect("Routes should register")
}

async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Option<String>, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, content_type, value)
}

async fn token_for(router: &Router, username: &str, password: &str) -> String {
    let (status, _, body) = send(
        router,
        "POST",
        "/api/token",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["access"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_token_endpoints() {
    print_test_header(
        "test_token_endpoints",
        &["Verify obtain, refresh and verify over HTTP"],
    );

    let shop = TestShop::new().await;
    shop.customer("alice").await;
    let app = router(&shop);

    let (status, content_type, body) = send(
        &app,
        "POST",
        "/api/token",
        None,
        Some(json!({ "username": "alice", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["status"], 401);

    let (status, _, pair) = send(
        &app,
        "POST",
        "/api/token",
        None,
        Some(json!({ "username": "alice", "password": CUSTOMER_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let refresh = pair["refresh"].as_str().unwrap();

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/token/refresh",
        None,
        Some(json!({ "refresh": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access"].is_string());

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/token/verify",
        None,
        Some(json!({ "token": refresh })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let access = pair["access"].as_str().unwrap();
    let (status, _, me) = send(&app, "GET", "/api/users/current", Some(access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "alice");
    println!("✅ Token endpoints behave");
}

#[tokio::test]
async fn test_public_catalog_and_bad_tokens() {
    print_test_header(
        "test_public_catalog_and_bad_tokens",
        &[
            "Verify anonymous catalog reads succeed with decimal prices as strings",
            "A bad bearer token is a 401 even on public endpoints",
        ],
    );

    let shop = TestShop::new().await;
    shop.product("Chelsea boots", price(39900)).await;
    let app = router(&shop);

    let (status, _, body) = send(&app, "GET", "/api/products?page_size=5", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["page_size"], 5);
    assert_eq!(body["items"][0]["name"], "Chelsea boots");
    assert_eq!(body["items"][0]["price"], "399.00");

    let (status, _, _) = send(&app, "GET", "/api/products", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _, _) = send(&app, "GET", "/api/reviews", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _, _) = send(&app, "GET", "/api/reviews", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let product_id = body["items"][0]["id"].as_i64().unwrap();
    let detail_uri = format!("/api/products/{product_id}");
    let (status, _, _) = send(&app, "GET", &detail_uri, Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _, detail) = send(&app, "GET", &detail_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["name"], "Chelsea boots");

    let (status, _, body) = send(&app, "GET", "/api/products?ordering=colour", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["ordering"].is_array());

    let (status, _, _) = send(
        &app,
        "POST",
        "/api/products",
        None,
        Some(json!({ "name": "Sneakers", "price": "59.90" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    println!("✅ Catalog is public, writes need a token");
}

#[tokio::test]
async fn test_promo_validation_status_codes() {
    print_test_header(
        "test_promo_validation_status_codes",
        &["Verify validate answers 200 for usable codes and 400 once redeemed"],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let code = shop.promo_code("BIENVENUE10", price(1000)).await;
    let order = shop
        .service
        .create_order(
            &alice.ctx,
            OrderDraft {
                customer_id: None,
                address: None,
                region: None,
                status_id: None,
                lines: vec![OrderLineDraft {
                    product_id: boots.id,
                    article_id: None,
                    quantity: 2,
                }],
            },
        )
        .await
        .unwrap();

    let app = router(&shop);
    let token = token_for(&app, "alice", CUSTOMER_PASSWORD).await;
    let validate = format!("/api/promo-codes/{}/validate", code.id);

    let (status, _, body) = send(&app, "POST", &validate, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true, "rate": "10.00" }));

    let (status, _, body) = send(
        &app,
        "POST",
        &format!("/api/promo-codes/{}/redeem", code.id),
        Some(&token),
        Some(json!({ "order_id": order.id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order_id"], order.id);

    let (status, _, body) = send(&app, "POST", &validate, Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "valid": false, "message": "promo code has already been used" })
    );

    let (status, _, detail) = send(
        &app,
        "GET",
        &format!("/api/orders/{}", order.id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["subtotal"], "798.00");
    assert_eq!(detail["promo_codes"][0]["code"], "BIENVENUE10");
    println!("✅ Validation status codes match the outcome");
}

#[tokio::test]
async fn test_scoped_reads_and_staff_only_actions() {
    print_test_header(
        "test_scoped_reads_and_staff_only_actions",
        &[
            "Verify another customer's order reads as 404",
            "Cart conversion is 403 for customers and 401 for anonymous callers",
        ],
    );

    let shop = TestShop::new().await;
    let alice = shop.customer("alice").await;
    shop.customer("bob").await;
    let boots = shop.product("Chelsea boots", price(39900)).await;
    let order = shop
        .service
        .create_order(
            &alice.ctx,
            OrderDraft {
                customer_id: None,
                address: None,
                region: None,
                status_id: None,
                lines: vec![OrderLineDraft {
                    product_id: boots.id,
                    article_id: None,
                    quantity: 1,
                }],
            },
        )
        .await
        .unwrap();

    let app = router(&shop);
    let bob = token_for(&app, "bob", CUSTOMER_PASSWORD).await;
    let staff = token_for(&app, "backoffice", common::STAFF_PASSWORD).await;

    let (status, _, _) = send(
        &app,
        "GET",
        &format!("/api/orders/{}", order.id),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let convert = json!({ "entry_ids": [1] });
    let (status, _, _) = send(&app, "POST", "/api/carts/convert", Some(&bob), Some(convert.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _, _) = send(&app, "POST", "/api/carts/convert", None, Some(convert)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/carts/convert",
        Some(&staff),
        Some(json!({ "entry_ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["orders_created"], 0);

    let (status, _, body) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(&bob),
        Some(json!({ "product_id": boots.id, "rating": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["rating"].is_array());
    println!("✅ Access rules mapped to HTTP status codes");
}

#[tokio::test]
async fn test_user_detail_nests_staff_profile() {
    print_test_header(
        "test_user_detail_nests_staff_profile",
        &["Verify /users create, read and update carry the staff profile"],
    );

    let shop = TestShop::new().await;
    let app = router(&shop);
    let staff = token_for(&app, "backoffice", common::STAFF_PASSWORD).await;

    let (status, _, created) = send(
        &app,
        "POST",
        "/api/users",
        Some(&staff),
        Some(json!({
            "username": "buyer",
            "email": "buyer@shop.test",
            "password": "initial-pass",
            "is_staff": true,
            "profile": { "job_title": "Buyer", "skills": ["sourcing"] }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["username"], "buyer");
    assert_eq!(created["profile"]["matricule"], format!("MAT{id}"));

    let uri = format!("/api/users/{id}");
    let (status, _, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(&staff),
        Some(json!({ "profile": { "bio": "Leather goods", "hire_date": "2024-02-01" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["profile"]["bio"], "Leather goods");

    let (status, _, detail) = send(&app, "GET", &uri, Some(&staff), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["profile"]["job_title"], "Buyer");
    assert_eq!(detail["profile"]["skills"], json!(["sourcing"]));
    assert_eq!(detail["profile"]["hire_date"], "2024-02-01");
    println!("✅ Staff profile nested in the user detail");
}
