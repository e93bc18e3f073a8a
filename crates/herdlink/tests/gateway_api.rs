// SPDX-FileCopyrightText: 2026 Herdlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway endpoint tests driven through the router in-process.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use herdlink_core::types::collections;
use herdlink_core::{DocumentStore, PushSender};
use herdlink_gateway::{build_router, GatewayState};
use herdlink_notify::{NotificationDispatcher, RecipientResolver};
use herdlink_test_utils::{fixtures, MemoryStore, MockSender};

struct TestApp {
    router: Router,
    store: Arc<dyn DocumentStore>,
    sender: Arc<MockSender>,
}

async fn app_with(admin_code: Option<&str>, users: &[serde_json::Value]) -> TestApp {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    for body in users {
        let id = body["id"].as_str().unwrap().to_string();
        store
            .upsert_merge(collections::USERS, &id, body.clone())
            .await
            .unwrap();
    }
    let sender = Arc::new(MockSender::new());
    let state = GatewayState {
        resolver: Arc::new(RecipientResolver::new(store.clone())),
        dispatcher: Arc::new(NotificationDispatcher::new(
            sender.clone() as Arc<dyn PushSender>
        )),
        store: store.clone(),
        admin_code: admin_code.map(str::to_string),
        start_time: Instant::now(),
    };
    TestApp {
        router: build_router(state),
        store,
        sender,
    }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn farmers_alert_missing_message_is_400_with_no_send() {
    let app = app_with(None, &[fixtures::user("f1", "farmer", Some("tokA"))]).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/notify-farmers-new-alert",
            serde_json::json!({"alertType": "weather"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("alertMessage"));
    assert_eq!(app.sender.call_count().await, 0, "sender must not be invoked");
}

#[tokio::test]
async fn farmers_alert_broadcasts_to_farmer_role() {
    let app = app_with(
        None,
        &[
            fixtures::user("f1", "farmer", Some("tokA")),
            fixtures::user("f2", "farmer", Some("tokB")),
            fixtures::user("v1", "veterinarian", Some("tokV")),
        ],
    )
    .await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/notify-farmers-new-alert",
            serde_json::json!({
                "alertType": "weather",
                "alertMessage": "storm approaching",
                "createdByName": "District Office"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["successCount"], 2);
    assert_eq!(body["failureCount"], 0);

    let sent = app.sender.sent().await;
    assert_eq!(sent.len(), 1);
    assert!(!sent[0].tokens.contains(&"tokV".to_string()), "vets excluded");
}

#[tokio::test]
async fn farmers_alert_with_no_recipients_reports_zero_zero() {
    let app = app_with(None, &[]).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/notify-farmers-new-alert",
            serde_json::json!({"alertType": "weather", "alertMessage": "m"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["successCount"], 0);
    assert_eq!(body["failureCount"], 0);
    assert_eq!(app.sender.call_count().await, 0);
}

#[tokio::test]
async fn vets_new_request_broadcasts_to_vets() {
    let app = app_with(
        None,
        &[
            fixtures::user("v1", "veterinarian", Some("tokV")),
            fixtures::user("f1", "farmer", Some("tokF")),
        ],
    )
    .await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/notify-vets-new-request",
            serde_json::json!({
                "farmerName": "Asha",
                "animalType": "Goat",
                "symptoms": "limping"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sent = app.sender.sent().await;
    assert_eq!(sent[0].tokens, vec!["tokV".to_string()]);
    assert!(sent[0].envelope.body.contains("limping"));
}

#[tokio::test]
async fn farmer_treatment_reports_success_flag_and_counts() {
    let app = app_with(None, &[fixtures::user("f1", "farmer", Some("tokA"))]).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/notify-farmer-treatment",
            serde_json::json!({"vetName": "Dr. Rao", "animalType": "Cow"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["successCount"], 1);
}

#[tokio::test]
async fn validate_admin_code_accepts_only_the_exact_configured_string() {
    let app = app_with(Some("BARN-1951"), &[]).await;

    for (code, expected) in [
        ("BARN-1951", true),
        ("barn-1951", false),
        ("BARN-1951 ", false),
        ("", false),
        ("something-else", false),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(post_json(
                "/validate-admin-code",
                serde_json::json!({"code": code}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["valid"], expected, "code {code:?}");
    }
}

#[tokio::test]
async fn validate_admin_code_with_no_configured_code_is_always_invalid() {
    let app = app_with(None, &[]).await;

    let response = app
        .router
        .clone()
        .oneshot(post_json("/validate-admin-code", serde_json::json!({"code": ""})))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["valid"], false);
}

#[tokio::test]
async fn store_user_token_unauthenticated_writes_nothing() {
    let app = app_with(
        None,
        &[fixtures::user_with_api_key("f1", "farmer", None, "key-abc")],
    )
    .await;

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/store-user-token",
            serde_json::json!({"fcmToken": "tokNew"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let doc = app.store.get(collections::USERS, "f1").await.unwrap().unwrap();
    assert!(doc.body.get("deliveryToken").is_none(), "no write on auth failure");
}

#[tokio::test]
async fn store_user_token_registers_and_is_idempotent() {
    let app = app_with(
        None,
        &[fixtures::user_with_api_key("f1", "farmer", None, "key-abc")],
    )
    .await;

    let request = || {
        Request::builder()
            .method("POST")
            .uri("/store-user-token")
            .header("content-type", "application/json")
            .header("authorization", "Bearer key-abc")
            .body(Body::from(
                serde_json::json!({"fcmToken": "tokNew"}).to_string(),
            ))
            .unwrap()
    };

    // First registration.
    let response = app.router.clone().oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["success"], true);

    let doc = app.store.get(collections::USERS, "f1").await.unwrap().unwrap();
    assert_eq!(doc.body["deliveryToken"], "tokNew");
    assert!(doc.body.get("deliveryTokenUpdatedAt").is_some());

    // Second registration with the same token: success again, token unchanged.
    let response = app.router.clone().oneshot(request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let doc = app.store.get(collections::USERS, "f1").await.unwrap().unwrap();
    assert_eq!(doc.body["deliveryToken"], "tokNew");
    assert_eq!(doc.body["role"], "farmer", "merge must not clobber the record");
}

#[tokio::test]
async fn store_user_token_empty_token_is_400() {
    let app = app_with(
        None,
        &[fixtures::user_with_api_key("f1", "farmer", None, "key-abc")],
    )
    .await;

    let request = Request::builder()
        .method("POST")
        .uri("/store-user-token")
        .header("content-type", "application/json")
        .header("authorization", "Bearer key-abc")
        .body(Body::from(serde_json::json!({"fcmToken": ""}).to_string()))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn options_preflight_returns_204_with_empty_body() {
    let app = app_with(None, &[]).await;

    for uri in [
        "/notify-farmers-new-alert",
        "/notify-vets-new-request",
        "/notify-farmer-treatment",
        "/validate-admin-code",
        "/store-user-token",
    ] {
        let request = Request::builder()
            .method("OPTIONS")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "uri {uri}");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty(), "pre-flight body must be empty");
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app_with(None, &[]).await;

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
}
