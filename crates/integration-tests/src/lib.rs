//! Integration tests for the Seedleaf API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start MongoDB and the API server
//! cargo run -p seedleaf-server
//!
//! # Run the ignored integration tests against it
//! cargo test -p seedleaf-integration-tests -- --ignored
//! ```
//!
//! The target server is configurable via `API_BASE_URL`
//! (default `http://localhost:8000`).

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// A test session: HTTP client plus the server under test.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url(),
        }
    }

    /// Register a throwaway account and return its bearer token.
    ///
    /// # Panics
    ///
    /// Panics if registration fails or the response has no token.
    pub async fn register_customer(&self) -> String {
        let email = format!("it-{}@example.com", uuid::Uuid::new_v4());
        let resp = self
            .client
            .post(format!("{}/api/auth/register", self.base_url))
            .json(&json!({
                "email": email,
                "name": "Integration Test",
                "password": "integration-password",
            }))
            .send()
            .await
            .expect("register request failed");
        assert!(resp.status().is_success(), "registration failed");
        let body: Value = resp.json().await.expect("register response not JSON");
        body["token"]
            .as_str()
            .expect("register response has no token")
            .to_string()
    }

    /// Seed the demo catalog and return the product list.
    ///
    /// # Panics
    ///
    /// Panics if seeding or listing fails.
    pub async fn seeded_products(&self) -> Vec<Value> {
        let resp = self
            .client
            .post(format!("{}/api/seed", self.base_url))
            .send()
            .await
            .expect("seed request failed");
        assert!(resp.status().is_success(), "seed failed");

        let resp = self
            .client
            .get(format!("{}/api/products", self.base_url))
            .send()
            .await
            .expect("products request failed");
        resp.json().await.expect("products response not JSON")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
