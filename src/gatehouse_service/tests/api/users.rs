use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn create_account_is_inactive_and_hides_secrets() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/users",
            &json!({
                "email": "bob@example.com",
                "password": "pw1",
                "displayName": "Bob",
                "phone": "555-0100"
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["displayName"], "Bob");
    assert_eq!(body["phone"], "555-0100");
    assert_eq!(body["isActive"], false);
    assert!(body.get("credentialHash").is_none());
    assert!(body.get("pendingCode").is_none());
}

#[tokio::test]
async fn list_accounts_paginates() {
    let app = TestApp::new().await;
    for i in 0..7 {
        let response = app
            .post_json(
                "/users",
                &json!({ "email": format!("user{i}@example.com"), "password": "pw1" }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
    }

    let first: Value = app.get("/users", None).await.json().await.unwrap();
    assert_eq!(first["items"].as_array().unwrap().len(), 5);
    assert_eq!(first["totalItems"], 7);
    assert_eq!(first["totalPages"], 2);
    assert_eq!(first["current"], 1);
    assert_eq!(first["pageSize"], 5);

    let second: Value = app
        .get("/users?current=2&pageSize=5", None)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(second["items"].as_array().unwrap().len(), 2);
    assert_eq!(second["current"], 2);
}

#[tokio::test]
async fn list_accounts_falls_back_on_bad_paging_values() {
    let app = TestApp::new().await;
    for i in 0..3 {
        app.post_json(
            "/users",
            &json!({ "email": format!("user{i}@example.com"), "password": "pw1" }),
        )
        .await;
    }

    for path in [
        "/users?current=-1&pageSize=-5",
        "/users?current=&pageSize=",
        "/users?current=abc",
    ] {
        let response = app.get(path, None).await;
        assert_eq!(response.status().as_u16(), 200, "{path}");

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["current"], 1, "{path}");
        assert_eq!(body["pageSize"], 5, "{path}");
        assert_eq!(body["items"].as_array().unwrap().len(), 3, "{path}");
    }
}

#[tokio::test]
async fn account_routes_require_bearer_token() {
    let app = TestApp::new().await;
    let account_id = app.activated_account("ann@example.com", "pw1").await;

    let response = app.get(&format!("/users/{account_id}"), None).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn get_update_and_delete_account() {
    let app = TestApp::new().await;
    let account_id = app.activated_account("ann@example.com", "pw1").await;
    let token = app.login_token("ann@example.com", "pw1").await;
    let path = format!("/users/{account_id}");

    let fetched: Value = app.get(&path, Some(&token)).await.json().await.unwrap();
    assert_eq!(fetched["id"], account_id.as_str());

    let updated = app
        .patch_json(
            &path,
            &token,
            &json!({ "displayName": "Ann B", "email": "other@example.com" }),
        )
        .await;
    assert_eq!(updated.status().as_u16(), 200);
    let updated: Value = updated.json().await.unwrap();
    assert_eq!(updated["displayName"], "Ann B");
    assert_eq!(updated["email"], "ann@example.com");

    let deleted = app.delete(&path, &token).await;
    assert_eq!(deleted.status().as_u16(), 204);

    let missing = app.get(&path, Some(&token)).await;
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn malformed_account_id_returns_400() {
    let app = TestApp::new().await;
    app.activated_account("ann@example.com", "pw1").await;
    let token = app.login_token("ann@example.com", "pw1").await;

    let response = app.get("/users/not-a-uuid", Some(&token)).await;

    assert_eq!(response.status().as_u16(), 400);
}
