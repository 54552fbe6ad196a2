#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use record_service::config::{MongoConfig, RecordConfig, StoreBackend, StoreConfig, UploadConfig};
use record_service::services::{InMemoryRecordStore, LocalStorage, RecordStore};
use record_service::startup::{build_router, AppState, Application};
use service_core::config::Config as CoreConfig;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_UPLOAD_MAX_BYTES: usize = 1024 * 1024;

pub fn test_config(upload_dir: &Path) -> RecordConfig {
    RecordConfig {
        common: CoreConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0, // Random port for testing
        },
        mongodb: MongoConfig {
            uri: std::env::var("TEST_MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database: format!("record_test_{}", uuid::Uuid::new_v4()),
            collection: "records".to_string(),
        },
        store: StoreConfig {
            backend: StoreBackend::Memory,
        },
        upload: UploadConfig {
            dir: upload_dir.to_string_lossy().into_owned(),
            max_bytes: TEST_UPLOAD_MAX_BYTES,
        },
        log_level: "error".to_string(),
        otlp_endpoint: None,
    }
}

/// Router driven in-process with `oneshot`, over an in-memory store unless
/// another one is supplied.
pub struct TestRouter {
    pub router: Router,
    pub store: Arc<dyn RecordStore>,
    pub upload_dir: TempDir,
}

impl TestRouter {
    pub async fn new() -> Self {
        Self::with_store(Arc::new(InMemoryRecordStore::new())).await
    }

    pub async fn with_store(store: Arc<dyn RecordStore>) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(upload_dir.path());
        let storage = Arc::new(
            LocalStorage::new(upload_dir.path())
                .await
                .expect("Failed to create upload storage"),
        );

        let router = build_router(AppState {
            config,
            store: store.clone(),
            storage,
        });

        Self {
            router,
            store,
            upload_dir,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();
        (status, body)
    }

    pub async fn send_json(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.send(request).await;
        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).expect("Response body is not JSON")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send_json(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.send_json(json_request("POST", uri, body.to_string())).await
    }

    pub async fn put_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        self.send_json(json_request("PUT", uri, body.to_string())).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send_json(Request::delete(uri).body(Body::empty()).unwrap()).await
    }

    /// Create a record and return the response body.
    pub async fn create(&self, name: &str, surname: &str) -> serde_json::Value {
        let (status, body) = self
            .post_json(
                "/createname",
                serde_json::json!({ "name": name, "surname": surname }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body
    }
}

pub fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// A real server on a random port, for tests that go over the network.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(upload_dir.path());

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
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
            upload_dir,
        }
    }
}
