use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn register_returns_201_and_sends_activation_code() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/auth/register",
            &json!({ "email": "ann@example.com", "displayName": "Ann", "password": "pw1" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert!(body["accountId"].is_string());

    let code = app.last_code_for("ann@example.com").await;
    assert_eq!(code.len(), 32);
}

#[tokio::test]
async fn register_duplicate_email_returns_409() {
    let app = TestApp::new().await;
    let body = json!({ "email": "ann@example.com", "password": "pw1" });

    assert_eq!(app.post_json("/auth/register", &body).await.status().as_u16(), 201);

    let duplicate = json!({ "email": "ANN@example.com", "password": "other" });
    let response = app.post_json("/auth/register", &duplicate).await;
    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn register_with_malformed_input_returns_400() {
    let app = TestApp::new().await;

    let cases = [
        json!({ "email": "not-an-email", "password": "pw1" }),
        json!({ "email": "ann@example.com", "password": "" }),
    ];

    for case in cases {
        let response = app.post_json("/auth/register", &case).await;
        assert_eq!(response.status().as_u16(), 400, "input: {case}");
    }
}

#[tokio::test]
async fn login_requires_activation() {
    let app = TestApp::new().await;
    app.post_json(
        "/auth/register",
        &json!({ "email": "ann@example.com", "password": "pw1" }),
    )
    .await;

    let response = app
        .post_json(
            "/auth/login",
            &json!({ "email": "ann@example.com", "password": "pw1" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn full_activation_scenario() {
    let app = TestApp::new().await;
    let response = app
        .post_json(
            "/auth/register",
            &json!({ "email": "u1@example.com", "password": "pw1" }),
        )
        .await;
    let body: Value = response.json().await.unwrap();
    let account_id = body["accountId"].as_str().unwrap().to_string();
    let code = app.last_code_for("u1@example.com").await;

    let wrong = app
        .post_json(
            "/auth/activate",
            &json!({ "accountId": account_id, "code": "WRONG" }),
        )
        .await;
    assert_eq!(wrong.status().as_u16(), 401);

    let right = app
        .post_json(
            "/auth/activate",
            &json!({ "accountId": account_id, "code": code }),
        )
        .await;
    assert_eq!(right.status().as_u16(), 200);
    let right: Value = right.json().await.unwrap();
    assert_eq!(right["activated"], true);

    let repeat = app
        .post_json(
            "/auth/activate",
            &json!({ "accountId": account_id, "code": code }),
        )
        .await;
    assert_eq!(repeat.status().as_u16(), 401);

    let reissue = app
        .post_json("/auth/reissue-code", &json!({ "email": "u1@example.com" }))
        .await;
    assert_eq!(reissue.status().as_u16(), 409);

    let token = app.login_token("u1@example.com", "pw1").await;
    let profile = app.get("/auth/profile", Some(&token)).await;
    assert_eq!(profile.status().as_u16(), 200);
    let profile: Value = profile.json().await.unwrap();
    assert_eq!(profile["email"], "u1@example.com");
    assert_eq!(profile["isActive"], true);
    assert!(profile.get("credentialHash").is_none());
}

#[tokio::test]
async fn reissue_replaces_code_for_inactive_account() {
    let app = TestApp::new().await;
    let response = app
        .post_json(
            "/auth/register",
            &json!({ "email": "ann@example.com", "password": "pw1" }),
        )
        .await;
    let body: Value = response.json().await.unwrap();
    let account_id = body["accountId"].as_str().unwrap().to_string();
    let first = app.last_code_for("ann@example.com").await;

    let response = app
        .post_json("/auth/reissue-code", &json!({ "email": "ann@example.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let second = app.last_code_for("ann@example.com").await;
    assert_ne!(first, second);

    let stale = app
        .post_json(
            "/auth/activate",
            &json!({ "accountId": account_id, "code": first }),
        )
        .await;
    assert_eq!(stale.status().as_u16(), 401);

    let fresh = app
        .post_json(
            "/auth/activate",
            &json!({ "accountId": account_id, "code": second }),
        )
        .await;
    assert_eq!(fresh.status().as_u16(), 200);
}

#[tokio::test]
async fn reissue_for_unknown_email_returns_404() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/auth/reissue-code", &json!({ "email": "ghost@example.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn password_reset_flow() {
    let app = TestApp::new().await;
    app.activated_account("ann@example.com", "old-pw").await;

    let response = app
        .post_json("/auth/password-reset", &json!({ "email": "ANN@example.com" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["email"], "ann@example.com");
    assert!(body["accountId"].is_string());
    let code = app.last_code_for("ann@example.com").await;

    let mismatch = app
        .post_json(
            "/auth/password-reset/confirm",
            &json!({
                "email": "ann@example.com",
                "code": code,
                "password": "new-pw",
                "confirmPassword": "typo-pw"
            }),
        )
        .await;
    assert_eq!(mismatch.status().as_u16(), 400);

    let confirm = app
        .post_json(
            "/auth/password-reset/confirm",
            &json!({
                "email": "ann@example.com",
                "code": code,
                "password": "new-pw",
                "confirmPassword": "new-pw"
            }),
        )
        .await;
    assert_eq!(confirm.status().as_u16(), 200);
    let confirm: Value = confirm.json().await.unwrap();
    assert_eq!(confirm["confirmed"], true);

    let old = app
        .post_json(
            "/auth/login",
            &json!({ "email": "ann@example.com", "password": "old-pw" }),
        )
        .await;
    assert_eq!(old.status().as_u16(), 401);

    app.login_token("ann@example.com", "new-pw").await;
}

#[tokio::test]
async fn password_reset_for_inactive_account_returns_403() {
    let app = TestApp::new().await;
    app.post_json(
        "/auth/register",
        &json!({ "email": "ann@example.com", "password": "pw1" }),
    )
    .await;

    let response = app
        .post_json("/auth/password-reset", &json!({ "email": "ann@example.com" }))
        .await;

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn profile_requires_a_valid_bearer_token() {
    let app = TestApp::new().await;

    let missing = app.get("/auth/profile", None).await;
    assert_eq!(missing.status().as_u16(), 401);

    let garbage = app.get("/auth/profile", Some("not.a.token")).await;
    assert_eq!(garbage.status().as_u16(), 401);
}
