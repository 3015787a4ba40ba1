mod common;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use chopwave::api;
use serde_json::{json, Value};
use utoipa_actix_web::AppExt;

macro_rules! admin_app {
    ($url:expr) => {{
        let state = common::test_state($url);
        test::init_service(
            App::new()
                .into_utoipa_app()
                .configure(|cfg| api::configure(cfg, &state))
                .split_for_parts()
                .0,
        )
        .await
    }};
}

#[actix_rt::test]
async fn full_ordering_flow_over_http() {
    let Some((_db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let url = common::setup_test_db()
        .database_url
        .clone()
        .expect("database url");
    let app = admin_app!(&url);

    let req = test::TestRequest::post()
        .uri("/api/restaurants")
        .set_json(json!({"name": "Chez Awa Annexe", "is_active": true}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let restaurant: Value = test::read_body_json(resp).await;
    let restaurant_id = restaurant["id"].as_i64().expect("restaurant id");
    assert!(restaurant["created_at"].is_string());

    let req = test::TestRequest::post()
        .uri(&format!("/api/restaurants/{restaurant_id}/menu-items"))
        .set_json(json!({"name": "Ndole", "price": 2500.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let item: Value = test::read_body_json(resp).await;
    let item_id = item["id"].as_i64().expect("item id");
    assert_eq!(item["is_available"], true);

    let req = test::TestRequest::post()
        .uri(&format!("/api/orders?current_user_id={}", fixtures.user_id))
        .set_json(json!({
            "restaurant_id": restaurant_id,
            "items": [{"menu_item_id": item_id, "quantity": 2}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = test::read_body_json(resp).await;
    assert_eq!(order["total_amount"], 5000.0);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["payment_status"], "pending");
    assert_eq!(order["items"].as_array().expect("items").len(), 1);
    assert_eq!(order["items"][0]["price_at_order"], 2500.0);

    let req = test::TestRequest::get().uri("/api/orders").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed: Value = test::read_body_json(resp).await;
    assert_eq!(listed["orders"].as_array().expect("orders").len(), 1);
}

#[actix_rt::test]
async fn error_codes_match_the_resource_contract() {
    let Some((_db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let url = common::setup_test_db()
        .database_url
        .clone()
        .expect("database url");
    let app = admin_app!(&url);

    // Unknown restaurant.
    let req = test::TestRequest::get()
        .uri("/api/restaurants/424242")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].is_string());

    // Menu item under an unknown restaurant.
    let req = test::TestRequest::post()
        .uri("/api/restaurants/424242/menu-items")
        .set_json(json!({"name": "Eru", "price": 1800.0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Duplicate phone number.
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({"phone_number": "+237690000001", "name": "Clone"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Empty order.
    let req = test::TestRequest::post()
        .uri(&format!("/api/orders?current_user_id={}", fixtures.user_id))
        .set_json(json!({"restaurant_id": fixtures.restaurant_id, "items": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Empty restaurant update.
    let req = test::TestRequest::put()
        .uri(&format!("/api/restaurants/{}", fixtures.restaurant_id))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn soft_deletes_return_no_content_and_stay_idempotent() {
    let Some((_db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let url = common::setup_test_db()
        .database_url
        .clone()
        .expect("database url");
    let app = admin_app!(&url);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/menu-items/{}", fixtures.menu_item_ids[0]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/menu-items/{}", fixtures.menu_item_ids[0]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/restaurants/{}", fixtures.restaurant_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // The deactivated restaurant is gone from list and reads.
    let req = test::TestRequest::get().uri("/api/restaurants").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed: Value = test::read_body_json(resp).await;
    assert!(listed["restaurants"]
        .as_array()
        .expect("restaurants")
        .iter()
        .all(|r| r["id"].as_i64() != Some(fixtures.restaurant_id as i64)));
}

#[actix_rt::test]
async fn cancelling_a_terminal_order_attaches_the_snapshot_header() {
    let Some((_db, fixtures)) = common::setup_pool_with_fixtures() else {
        return;
    };
    let url = common::setup_test_db()
        .database_url
        .clone()
        .expect("database url");
    let app = admin_app!(&url);

    let req = test::TestRequest::post()
        .uri(&format!("/api/orders?current_user_id={}", fixtures.user_id))
        .set_json(json!({
            "restaurant_id": fixtures.restaurant_id,
            "items": [{"menu_item_id": fixtures.menu_item_ids[0], "quantity": 1}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let order: Value = test::read_body_json(resp).await;
    let order_id = order["id"].as_i64().expect("order id");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/orders/{order_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cancelled: Value = test::read_body_json(resp).await;
    assert_eq!(cancelled["status"], "cancelled");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/orders/{order_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let snapshot_header = resp
        .headers()
        .get("x-current-order")
        .expect("snapshot header")
        .to_str()
        .expect("header is ascii");
    let snapshot: Value = serde_json::from_str(snapshot_header).expect("header is json");
    assert_eq!(snapshot["status"], "cancelled");
}
