use quote_service::config::{QuoteConfig, StoreBackend, StoreConfig};
use quote_service::startup::Application;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store_file: Option<String>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_backend(StoreBackend::Memory).await
    }

    pub async fn spawn_with_backend(backend: StoreBackend) -> Self {
        let store_file = match backend {
            StoreBackend::Memory => None,
            StoreBackend::File => Some(format!(
                "target/test-quotes-{}.json",
                Uuid::new_v4()
            )),
        };

        let config = QuoteConfig {
            port: 0, // Random port for testing
            store: StoreConfig {
                backend,
                file_path: store_file.clone().unwrap_or_default(),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store_file,
        }
    }

    /// POST a quote and return the created record as JSON.
    pub async fn create_quote(&self, quote: &str, author: &str) -> serde_json::Value {
        let client = reqwest::Client::new();
        let response = client
            .post(format!("{}/quotes", self.address))
            .json(&serde_json::json!({ "quote": quote, "author": author }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 201);
        response.json().await.expect("Failed to parse response")
    }

    pub async fn cleanup(&self) {
        if let Some(path) = &self.store_file {
            let _ = tokio::fs::remove_file(path).await;
        }
    }
}
