#![allow(dead_code)]

use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use vial_query_api::routes::build_app;
use vial_query_api::seed::seed_form_data;
use vial_query_api::InMemoryStore;

pub const FORM_DATA_ID: &str = "e82ed0aa-e99d-4318-a346-898de9f8a529";
pub const MISSING_ID: &str = "00000000-0000-0000-0000-000000000000";

// Test client wrapper for making API calls
pub struct TestClient {
    client: Client,
    base_url: String,
}

impl TestClient {
    fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub async fn post(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    pub async fn delete(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
    }

    pub async fn patch(&self, path: &str, json: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .patch(format!("{}{}", self.base_url, path))
            .json(&json)
            .send()
            .await
    }
}

/// Serve the app on an ephemeral port backed by a freshly seeded in-memory store.
pub async fn spawn_app() -> TestClient {
    let store = Arc::new(InMemoryStore::with_form_data(seed_form_data()));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let address = listener.local_addr().expect("Failed to read local address");

    tokio::spawn(async move {
        axum::serve(listener, build_app(store))
            .await
            .expect("Test server crashed");
    });

    TestClient::new(format!("http://{}", address))
}

/// Send a request and return `(status, body)`.
pub async fn json(response: reqwest::Result<reqwest::Response>) -> (u16, Value) {
    let response = response.expect("Request failed");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.expect("Response was not JSON");
    (status, body)
}

pub async fn create_query(client: &TestClient, body: Value) -> Value {
    let (status, body) = json(client.post("/query", body).await).await;
    assert_eq!(status, 201, "create failed: {}", body);
    body["data"].clone()
}
