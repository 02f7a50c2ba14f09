mod common;

use std::sync::Arc;

use common::ScriptedTransport;
use ordergate_client::{AuthClient, DiagnosticsClient, OrderClient, SessionManager};
use ordergate_core::messages;
use ordergate_core::{NumericField, Order, Outcome, ReadStatusPolicy};
use reqwest::Method;
use serde_json::json;

fn clients(transport: &Arc<ScriptedTransport>) -> (SessionManager, AuthClient, OrderClient) {
    let session = SessionManager::new();
    let auth = AuthClient::new(transport.clone(), session.clone());
    let orders = OrderClient::new(transport.clone(), session.clone());
    (session, auth, orders)
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_register_success() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.respond(200, json!({"msg": "User created successfully"}));
    let (_, auth, _) = clients(&transport);

    let result = auth.register("alice", "secret").await;

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.message, messages::REGISTERED);
    assert!(result.payload.is_none());

    let request = transport.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/auth/register");
    assert_eq!(request.body, Some(json!({"username": "alice", "password": "secret"})));
    assert!(request.header("Authorization").is_none());
    assert!(request.header("username").is_none());
}

#[tokio::test]
async fn test_register_failure_uses_detail_or_fallback() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(400, json!({"detail": "Username exists"}))
        .respond(500, json!({}));
    let (_, auth, _) = clients(&transport);

    let result = auth.register("alice", "secret").await;
    assert_eq!(result.outcome, Outcome::Failure);
    assert_eq!(result.message, "Username exists");

    let result = auth.register("alice", "secret").await;
    assert_eq!(result.message, messages::REGISTER_FAILED);
}

#[tokio::test]
async fn test_login_stores_token_and_authenticates_later_calls() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(200, json!({"access_token": "abc", "token_type": "bearer"}))
        .respond(200, json!({"id": 1, "title": "Widget", "amount": 5}));
    let (session, auth, orders) = clients(&transport);
    session.set_credentials("alice", "secret").await;

    let result = auth.login("alice", "secret").await;
    assert!(result.is_success());
    assert_eq!(result.message, messages::LOGGED_IN);
    assert_eq!(session.snapshot().await.token.as_deref(), Some("abc"));

    let result = orders.create(&Order::from_form("1", "Widget", "5")).await;
    assert!(result.is_success());

    let request = transport.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/app/orders");
    assert_eq!(request.header("Authorization"), Some("Bearer abc"));
    assert_eq!(request.header("username"), Some("alice"));
    assert_eq!(request.body, Some(json!({"id": 1, "title": "Widget", "amount": 5})));
}

#[tokio::test]
async fn test_login_without_token_ignores_detail() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(401, json!({"detail": "Invalid credentials"}))
        .respond(200, json!({"access_token": ""}))
        .respond(200, json!({"access_token": 42}));
    let (session, auth, _) = clients(&transport);

    for _ in 0..3 {
        let result = auth.login("alice", "wrong").await;
        assert_eq!(result.outcome, Outcome::Failure);
        assert_eq!(result.message, messages::LOGIN_FAILED);
    }
    assert!(!session.has_token().await);
}

#[tokio::test]
async fn test_login_token_in_error_status_still_counts() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.respond(500, json!({"access_token": "odd-but-present"}));
    let (session, auth, _) = clients(&transport);

    let result = auth.login("alice", "secret").await;
    assert!(result.is_success());
    assert!(session.has_token().await);
}

#[tokio::test]
async fn test_failed_login_keeps_previous_token() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(200, json!({"access_token": "first"}))
        .respond(401, json!({"detail": "Invalid credentials"}))
        .respond(200, json!({"access_token": "second"}));
    let (session, auth, _) = clients(&transport);

    auth.login("alice", "secret").await;
    auth.login("alice", "wrong").await;
    assert_eq!(session.snapshot().await.token.as_deref(), Some("first"));

    auth.login("bob", "secret").await;
    assert_eq!(session.snapshot().await.token.as_deref(), Some("second"));
}

#[tokio::test]
async fn test_whoami_sends_auth_headers() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(200, json!({"access_token": "abc"}))
        .respond(200, json!({"username": "alice"}));
    let (session, auth, _) = clients(&transport);
    session.set_username("alice").await;

    auth.login("alice", "secret").await;
    let result = auth.whoami().await;

    assert!(result.is_success());
    assert_eq!(result.payload, Some(json!({"username": "alice"})));
    let request = transport.last_request();
    assert_eq!(request.path, "/auth/me");
    assert_eq!(request.header("authorization"), Some("Bearer abc"));
}

#[tokio::test]
async fn test_whoami_checked_policy_reports_failure() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(401, json!({"detail": "Invalid token"}))
        .respond(401, json!({}));
    let auth = AuthClient::new(transport.clone(), SessionManager::new())
        .with_read_status(ReadStatusPolicy::StatusChecked);

    let result = auth.whoami().await;
    assert_eq!(result.outcome, Outcome::Failure);
    assert_eq!(result.message, "Invalid token");
    assert!(result.payload.is_none());

    let result = auth.whoami().await;
    assert_eq!(result.message, messages::WHOAMI_FAILED);
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_create_failure_with_detail() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.respond(400, json!({"detail": "duplicate id"}));
    let (_, _, orders) = clients(&transport);

    let result = orders.create(&Order::from_form("1", "Widget", "5")).await;

    assert_eq!(result.outcome, Outcome::Failure);
    assert_eq!(result.message, "duplicate id");
}

#[tokio::test]
async fn test_write_failures_without_detail_use_generic_messages() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(400, json!({}))
        .respond(404, json!({"error": "missing"}))
        .respond(401, json!({"detail": null}));
    let (_, _, orders) = clients(&transport);
    let order = Order::from_form("1", "Widget", "5");

    assert_eq!(orders.create(&order).await.message, messages::ADD_FAILED);
    assert_eq!(orders.update(&order).await.message, messages::UPDATE_FAILED);
    assert_eq!(orders.remove(&order.id).await.message, messages::DELETE_FAILED);
}

#[tokio::test]
async fn test_write_success_messages_echo_fields() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(200, json!({"id": 3, "title": "Gadget", "amount": 2}))
        .respond(200, json!({"deleted": true}));
    let (_, _, orders) = clients(&transport);

    let order = Order::from_form("3", "Gadget", "2");
    let result = orders.update(&order).await;
    assert_eq!(result.message, "Updated order: Gadget, amount: 2");
    assert!(result.payload.is_none());

    let request = transport.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.path, "/app/orders/3");
    assert_eq!(request.body, Some(json!({"id": 3, "title": "Gadget", "amount": 2})));

    let result = orders.remove(&NumericField::new("3")).await;
    assert_eq!(result.message, "Deleted order with ID: 3");
    let request = transport.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.path, "/app/orders/3");
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_success_messages_echo_entered_text() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(200, json!({"id": 7, "title": "Widget", "amount": 5}))
        .respond(200, json!({"deleted": true}));
    let (_, _, orders) = clients(&transport);

    let order = Order::from_form("007", "Widget", "5.0");
    let result = orders.create(&order).await;
    assert_eq!(result.message, "Added order: Widget, amount: 5.0");
    assert_eq!(
        transport.last_request().body,
        Some(json!({"id": 7, "title": "Widget", "amount": 5}))
    );

    let result = orders.remove(&order.id).await;
    assert_eq!(result.message, "Deleted order with ID: 007");
    assert_eq!(transport.last_request().path, "/app/orders/7");
}

#[tokio::test]
async fn test_invalid_text_is_echoed_not_coerced() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(200, json!({}))
        .respond(200, json!({}));
    let (_, _, orders) = clients(&transport);

    let result = orders.update(&Order::from_form("abc", "Widget", "lots")).await;
    assert_eq!(result.message, "Updated order: Widget, amount: lots");
    assert_eq!(transport.last_request().path, "/app/orders/NaN");

    let result = orders.remove(&NumericField::new("abc")).await;
    assert_eq!(result.message, "Deleted order with ID: abc");
}

#[tokio::test]
async fn test_get_one_is_status_blind_by_default() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.respond(404, json!({"detail": "not found"}));
    let (_, _, orders) = clients(&transport);

    let result = orders.get_one(&NumericField::new("7")).await;

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.message, messages::ORDER_FETCHED);
    assert_eq!(result.payload, Some(json!({"detail": "not found"})));

    let request = transport.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, "/app/orders/7");
}

#[tokio::test]
async fn test_get_one_checked_policy_reports_failure() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.respond(404, json!({"detail": "not found"}));
    let session = SessionManager::new();
    let orders = OrderClient::new(transport.clone(), session)
        .with_read_status(ReadStatusPolicy::StatusChecked);

    let result = orders.get_one(&NumericField::new("7")).await;

    assert_eq!(result.outcome, Outcome::Failure);
    assert_eq!(result.message, "not found");
    assert!(result.payload.is_none());
}

#[tokio::test]
async fn test_get_all_is_idempotent_against_unchanged_state() {
    let listing = json!([
        {"id": 1, "title": "Widget", "amount": 5},
        {"id": 2, "title": "Gadget", "amount": 1}
    ]);
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(200, listing.clone())
        .respond(200, listing.clone());
    let (_, _, orders) = clients(&transport);

    let first = orders.get_all().await;
    let second = orders.get_all().await;

    assert_eq!(first.payload, Some(listing));
    assert_eq!(first.payload, second.payload);
    assert_eq!(transport.requests().len(), 2);
    assert!(transport.requests().iter().all(|r| r.path == "/app/orders"));
}

#[tokio::test]
async fn test_invalid_numbers_are_sent_without_validation() {
    let transport = Arc::new(ScriptedTransport::default());
    transport
        .respond(422, json!({"detail": [{"msg": "value is not a valid integer"}]}))
        .respond(422, json!({"detail": "bad id"}));
    let (_, _, orders) = clients(&transport);

    let result = orders.create(&Order::from_form("abc", "Widget", "")).await;
    assert_eq!(result.outcome, Outcome::Failure);
    assert_eq!(result.message, r#"[{"msg":"value is not a valid integer"}]"#);
    assert_eq!(
        transport.last_request().body,
        Some(json!({"id": null, "title": "Widget", "amount": 0}))
    );

    orders.remove(&NumericField::new("abc")).await;
    assert_eq!(transport.last_request().path, "/app/orders/NaN");
}

#[tokio::test]
async fn test_calls_without_login_omit_authorization() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.respond(401, json!({"detail": "Brak tokena"}));
    let (session, _, orders) = clients(&transport);
    session.set_username("alice").await;

    let result = orders.get_all().await;

    assert!(result.is_success());
    let request = transport.last_request();
    assert!(request.header("Authorization").is_none());
    assert_eq!(request.header("username"), Some("alice"));
}

// ============================================================================
// Diagnostics
// ============================================================================

#[tokio::test]
async fn test_get_logs_unauthenticated_and_verbatim() {
    let feed = json!([{"user": "alice", "action": "User logged in"}]);
    let transport = Arc::new(ScriptedTransport::default());
    transport.respond(200, feed.clone());
    let diagnostics = DiagnosticsClient::new(transport.clone());

    let result = diagnostics.get_logs().await;

    assert!(result.is_success());
    assert_eq!(result.message, messages::LOGS_FETCHED);
    assert_eq!(result.payload, Some(feed));
    let request = transport.last_request();
    assert_eq!(request.path, "/logs/logs");
    assert!(request.headers.is_empty());
}

#[tokio::test]
async fn test_get_logs_server_error_body_is_payload() {
    let transport = Arc::new(ScriptedTransport::default());
    transport.respond(500, json!({"detail": "Internal Server Error"}));
    let diagnostics = DiagnosticsClient::new(transport.clone());

    let result = diagnostics.get_logs().await;

    assert!(result.is_success());
    assert_eq!(result.payload, Some(json!({"detail": "Internal Server Error"})));
}

// ============================================================================
// Transport failures
// ============================================================================

#[tokio::test]
async fn test_transport_failure_message_is_uniform() {
    let transport = Arc::new(ScriptedTransport::default());
    let (_, auth, orders) = clients(&transport);
    let diagnostics = DiagnosticsClient::new(transport.clone());
    let order = Order::from_form("1", "Widget", "5");

    let results = vec![
        auth.register("alice", "secret").await,
        auth.login("alice", "secret").await,
        auth.whoami().await,
        orders.create(&order).await,
        orders.update(&order).await,
        orders.remove(&order.id).await,
        orders.get_one(&order.id).await,
        orders.get_all().await,
        diagnostics.get_logs().await,
    ];

    for result in results {
        assert_eq!(result.outcome, Outcome::Failure);
        assert_eq!(result.message, messages::CONNECTION_FAILED);
        assert!(result.payload.is_none());
    }
}
