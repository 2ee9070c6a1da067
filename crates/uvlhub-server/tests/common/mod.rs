//! Shared helpers for UVLHub server integration tests
//!
//! - Router construction over an in-memory catalog
//! - Request helpers returning status and JSON body

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uvlhub_common::types::{seed::read_seed_file, Dataset};
use uvlhub_server::{
    api::{create_router, AppState},
    catalog::InMemoryCatalog,
    config::Config,
    SharedCatalog,
};

/// Path of the six-dataset seed shipped with the repository.
pub fn seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/seed/datasets.json")
}

pub fn seed_datasets() -> Vec<Dataset> {
    read_seed_file(seed_path()).expect("seed file should parse")
}

/// Test application wrapping the full router
pub struct TestApp {
    pub router: Router,
    pub catalog: SharedCatalog,
}

impl TestApp {
    /// Router over the seeded six-dataset catalog
    pub fn seeded() -> Self {
        Self::with_datasets(seed_datasets())
    }

    pub fn with_datasets(datasets: Vec<Dataset>) -> Self {
        Self::with_catalog(Arc::new(InMemoryCatalog::new(datasets)))
    }

    pub fn with_catalog(catalog: SharedCatalog) -> Self {
        let router = create_router(
            AppState {
                catalog: catalog.clone(),
            },
            &Config::default(),
        );
        Self { router, catalog }
    }

    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router should not fail");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request should build"),
        )
        .await
    }

    /// POST an explore request and return the result titles in order
    pub async fn explore(&self, query: &str, sorting: &str, publication_type: &str) -> Vec<String> {
        let (status, body) = self
            .post_json(
                "/api/v1/explore",
                serde_json::json!({
                    "query": query,
                    "sorting": sorting,
                    "publication_type": publication_type,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
        titles(&body)
    }
}

/// Titles from an explore response envelope
pub fn titles(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|item| item["title"].as_str().unwrap_or_default().to_string())
        .collect()
}
