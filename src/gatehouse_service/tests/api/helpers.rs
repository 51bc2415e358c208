use gatehouse_adapters::{
    Argon2CredentialHasher, HashMapAccountStore, JwtConfig, JwtTokenIssuer,
    RecordingNotificationSender, config::test,
};
use gatehouse_application::LifecyclePolicy;
use gatehouse_core::{Email, SystemClock};
use gatehouse_service::AccountService;
use secrecy::Secret;
use serde_json::Value;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub notifier: RecordingNotificationSender,
}

impl TestApp {
    pub async fn new() -> Self {
        let notifier = RecordingNotificationSender::new();
        let token_issuer = JwtTokenIssuer::new(JwtConfig {
            secret: Secret::new("api-test-secret".to_owned()),
            time_to_live: 600,
        });

        let service = AccountService::new(
            HashMapAccountStore::new(),
            Argon2CredentialHasher::new(),
            notifier.clone(),
            SystemClock,
            LifecyclePolicy::default(),
            token_issuer,
        );

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        #[allow(clippy::let_underscore_future)]
        let _ = tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
            notifier,
        }
    }

    pub async fn post_json<Body>(&self, path: &str, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .post(format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.http_client.get(format!("{}{}", &self.address, path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn patch_json<Body>(&self, path: &str, token: &str, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.http_client
            .patch(format!("{}{}", &self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn delete(&self, path: &str, token: &str) -> reqwest::Response {
        self.http_client
            .delete(format!("{}{}", &self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// The code carried by the latest notification sent to `email`.
    pub async fn last_code_for(&self, email: &str) -> String {
        let email = Email::parse(email).unwrap();
        self.notifier
            .last_for(&email)
            .await
            .expect("No notification was sent")
            .code()
            .as_str()
            .to_string()
    }

    /// Registers and activates an account, returning its id.
    pub async fn activated_account(&self, email: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/auth/register",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);
        let body: Value = response.json().await.unwrap();
        let account_id = body["accountId"].as_str().unwrap().to_string();

        let code = self.last_code_for(email).await;
        let response = self
            .post_json(
                "/auth/activate",
                &serde_json::json!({ "accountId": account_id, "code": code }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);

        account_id
    }

    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/auth/login",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }
}
