//! Accounts, contact messages, checkout and reviews.
//!
//! Requests rejected before any query run everywhere. The rest need a
//! migrated database:
//!
//! ```bash
//! threadline migrate
//! cargo test -p threadline-integration-tests -- --ignored
//! ```

#![allow(clippy::unwrap_used)]

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::StatusCode;
use serde_json::json;

use threadline_integration_tests::{TestClient, TestResponse};

/// An email no earlier run has registered.
fn unique_email(tag: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{tag}-{nanos}@example.com")
}

async fn register(client: &mut TestClient, email: &str) -> TestResponse {
    client
        .post_json(
            "/register",
            &json!({
                "name": "Asha Rao",
                "email": email,
                "password": "t4ilored-linen",
                "phone": "9800000000",
                "address": "12 Loom Street"
            }),
        )
        .await
}

// ============================================================================
// No database needed
// ============================================================================

#[tokio::test]
async fn profile_requires_login() {
    let mut client = TestClient::new();
    let response = client.get("/profile").await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["message"], "Please log in first!");
}

#[tokio::test]
async fn empty_checkout_is_rejected() {
    let mut client = TestClient::new();
    let response = client.post_form("/submit-checkout", &[]).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "No data received");
}

#[tokio::test]
async fn review_rating_out_of_range_is_rejected() {
    let mut client = TestClient::new();
    let response = client
        .post_json("/reviews", &json!({ "rating": 9, "review": "Lovely fabric" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["message"].is_string());
}

#[tokio::test]
async fn blank_review_is_rejected() {
    let mut client = TestClient::new();
    let response = client
        .post_json("/reviews", &json!({ "rating": 4, "review": "   " }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Review text is required");
}

#[tokio::test]
async fn contact_message_with_bad_email_is_rejected() {
    let mut client = TestClient::new();
    let response = client
        .post_json(
            "/api/messages",
            &json!({ "name": "Asha", "email": "asha", "message": "Do you ship abroad?" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()["message"],
        "Please enter a valid email address."
    );
}

#[tokio::test]
async fn login_from_direct_client_answers_in_json() {
    let mut client = TestClient::new();
    let response = client
        .post_json(
            "/login",
            &json!({ "email": "not-an-email", "password": "whatever1" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Please register first!");
}

#[tokio::test]
async fn register_from_direct_client_answers_in_json() {
    let mut client = TestClient::new();
    let response = client
        .post_json(
            "/register",
            &json!({
                "name": "Asha Rao",
                "email": "not-an-email",
                "password": "t4ilored-linen"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["message"].is_string());
}

#[tokio::test]
async fn logout_without_session_succeeds() {
    let mut client = TestClient::new();
    let response = client.post_json("/logout", &json!({})).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Logged out successfully!");
}

// ============================================================================
// Database flows
// ============================================================================

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn register_login_profile_logout() {
    let mut client = TestClient::new();
    let email = unique_email("flow");

    let response = register(&mut client, &email).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["message"], "Registration successful!");
    assert_eq!(response.json()["redirectUrl"], "/");

    let response = client
        .post_json(
            "/login",
            &json!({ "email": email, "password": "t4ilored-linen" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Login successful!");

    let profile = client.get("/profile").await;
    assert_eq!(profile.status, StatusCode::OK);
    let body = profile.json();
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["name"], "Asha Rao");
    assert_eq!(body["user_type"], "customer");
    assert!(body.get("password").is_none());

    client.post_json("/logout", &json!({})).await;
    assert_eq!(client.get("/profile").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn duplicate_registration_is_rejected() {
    let mut client = TestClient::new();
    let email = unique_email("dup");

    assert_eq!(register(&mut client, &email).await.status, StatusCode::CREATED);

    let response = register(&mut client, &email).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Email already registered!");
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn duplicate_registration_wins_over_weak_password() {
    let mut client = TestClient::new();
    let email = unique_email("dup-weak");

    assert_eq!(register(&mut client, &email).await.status, StatusCode::CREATED);

    let response = client
        .post_json(
            "/register",
            &json!({ "name": "Asha Rao", "email": email, "password": "short" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Email already registered!");
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn login_failures_use_account_messages() {
    let mut client = TestClient::new();
    let email = unique_email("login");

    let response = client
        .post_json("/login", &json!({ "email": email, "password": "whatever1" }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Please register first!");

    register(&mut client, &email).await;
    let response = client
        .post_json("/login", &json!({ "email": email, "password": "wrong-password" }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["message"], "Invalid password!");
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn contact_message_is_stored() {
    let mut client = TestClient::new();
    let response = client
        .post_json(
            "/api/messages",
            &json!({
                "name": "Asha",
                "email": "asha@example.com",
                "subject": "Shipping",
                "message": "Do you ship abroad?"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["message"], "Message sent successfully!");
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn checkout_details_are_stored() {
    let mut client = TestClient::new();
    let response = client
        .post_form(
            "/submit-checkout",
            &[
                ("name", "Asha Rao"),
                ("email", "asha@example.com"),
                ("address", "12 Loom Street"),
                ("city", "Jaipur"),
            ],
        )
        .await;

    assert!(response.status.is_redirection());
    assert_eq!(response.header("location"), Some("/checkout/complete"));
}

#[tokio::test]
#[ignore = "Requires a migrated PostgreSQL database"]
async fn review_is_listed_after_saving() {
    let mut client = TestClient::new();
    let text = format!("Soft and breathable ({})", unique_email("review"));

    let response = client
        .post_json("/reviews", &json!({ "rating": 5, "review": text }))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["message"], "Review saved successfully");

    let list = client.get("/reviews").await;
    assert_eq!(list.status, StatusCode::OK);
    let reviews = list.json();
    let saved = reviews
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["review"] == text.as_str())
        .unwrap();
    assert_eq!(saved["rating"], 5);
}
