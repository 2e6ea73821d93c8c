mod common;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

async fn register_bank(app: &TestApp, name: &str, email: &str) -> String {
    let response = app
        .post("/api/banks")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "pass_word!",
            "password_confirm": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"]["id"].as_str().expect("Missing bank id").to_string()
}

/// Banks are managed through user credentials; mint a caller token.
async fn caller_token(app: &TestApp) -> String {
    let user_id = app
        .register_user("Operator", "operator@example.com", "pass_word!")
        .await;
    app.token_for(&user_id, "operator@example.com")
}

#[tokio::test]
async fn test_create_bank_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/banks")
        .json(&json!({
            "name": "Central Bank",
            "email": "central@example.com",
            "password": "pass_word!",
            "password_confirm": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Central Bank");
    assert_eq!(body["data"]["email"], "central@example.com");
    assert!(body["data"]["id"].is_string());
}

#[tokio::test]
async fn test_create_bank_duplicate_email() {
    let app = TestApp::spawn().await;
    register_bank(&app, "Central Bank", "central@example.com").await;

    let response = app
        .post("/api/banks")
        .json(&json!({
            "name": "Other Bank",
            "email": "central@example.com",
            "password": "pass_word!",
            "password_confirm": "pass_word!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_bank_password_confirmation_mismatch() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/banks")
        .json(&json!({
            "name": "Central Bank",
            "email": "central@example.com",
            "password": "pass_word!",
            "password_confirm": "different!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_get_bank_success() {
    let app = TestApp::spawn().await;
    let bank_id = register_bank(&app, "Central Bank", "central@example.com").await;
    let token = caller_token(&app).await;

    let response = app
        .get_authenticated(&format!("/api/banks/{}", bank_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], bank_id.as_str());
    assert_eq!(body["data"]["name"], "Central Bank");
}

#[tokio::test]
async fn test_list_banks_search_by_email() {
    let app = TestApp::spawn().await;
    register_bank(&app, "Central Bank", "central@example.com").await;
    register_bank(&app, "Reserve Bank", "reserve@example.com").await;
    let token = caller_token(&app).await;

    let response = app
        .get_authenticated("/api/banks?search=email:^reserve", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["results"][0]["name"], "Reserve Bank");
}

#[tokio::test]
async fn test_update_bank() {
    let app = TestApp::spawn().await;
    let bank_id = register_bank(&app, "Central Bank", "central@example.com").await;
    let token = caller_token(&app).await;

    let response = app
        .patch_authenticated(&format!("/api/banks/{}", bank_id), &token)
        .json(&json!({ "name": "Renamed Bank" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Renamed Bank");
    assert_eq!(body["data"]["email"], "central@example.com");
}

#[tokio::test]
async fn test_delete_bank() {
    let app = TestApp::spawn().await;
    let bank_id = register_bank(&app, "Central Bank", "central@example.com").await;
    let token = caller_token(&app).await;

    let response = app
        .delete_authenticated(&format!("/api/banks/{}", bank_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .get_authenticated(&format!("/api/banks/{}", bank_id), &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_change_bank_password() {
    let app = TestApp::spawn().await;
    let bank_id = register_bank(&app, "Central Bank", "central@example.com").await;
    let token = caller_token(&app).await;

    let response = app
        .post_authenticated(&format!("/api/banks/{}/password", bank_id), &token)
        .json(&json!({
            "password_old": "pass_word!",
            "password_new": "new_password!",
            "password_confirm": "new_password!"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}
