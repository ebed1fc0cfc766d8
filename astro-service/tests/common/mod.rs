#![allow(dead_code)]

use astro_service::config::AstroConfig;
use astro_service::services::ContentGenerator;
use astro_service::{AppState, Application};
use serde_json::Value;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub state: AppState,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn with no generation credentials: every reading is a fallback.
    pub async fn spawn() -> Self {
        Self::spawn_with_generator(ContentGenerator::fallback_only()).await
    }

    pub async fn spawn_with_generator(generator: ContentGenerator) -> Self {
        let state = AppState::new(AstroConfig::for_tests(), generator);

        let app = Application::build_with_state(state.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            state,
            client,
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create an invoice and return the response body, asserting 200.
    pub async fn create_invoice(&self, user_id: &str, service_type: &str, data: Value) -> Value {
        let response = self
            .post_json(
                "/api/create-invoice",
                &serde_json::json!({
                    "user_id": user_id,
                    "service_type": service_type,
                    "service_data": data,
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200, "invoice creation failed");
        response.json().await.expect("Failed to parse JSON")
    }

    pub async fn pay(&self, order_id: &str) {
        let response = self
            .post_json(
                "/api/webhook/payment",
                &serde_json::json!({ "order_id": order_id }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
    }
}
