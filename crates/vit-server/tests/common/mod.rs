#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use vit_config::{StorageConfig, VitConfig};
use vit_db::service::VitService;
use vit_jobs::{Dispatcher, JobQueue};
use vit_server::AppState;
use vit_storage::MediaStore;

pub const TOKEN: &str = "test-admin-token";

/// Config with an admin token and no external services.
pub fn config() -> VitConfig {
    let mut config = VitConfig::default();
    config.server.admin_token = TOKEN.into();
    config.storage.public_base_url = "https://cdn.test".into();
    config
}

/// S3 settings that can presign without talking to a server.
pub fn s3_storage() -> StorageConfig {
    StorageConfig {
        bucket: "vitrine-media".into(),
        region: "us-east-1".into(),
        endpoint: "http://localhost:9000".into(),
        access_key_id: "test-access".into(),
        secret_access_key: "test-secret".into(),
        allow_http: true,
        path_style: true,
        ..StorageConfig::default()
    }
}

pub async fn state(config: VitConfig) -> AppState {
    let svc = Arc::new(VitService::new_local(":memory:").await.unwrap());
    let storage = if config.storage.is_configured() {
        MediaStore::from_config(&config.storage).unwrap()
    } else {
        MediaStore::in_memory(&config.storage)
    };
    let dispatcher = Arc::new(Dispatcher::from_config(&config.mail, &config.webhooks).unwrap());
    let jobs = Arc::new(JobQueue::start(Arc::clone(&dispatcher), &config.jobs));
    AppState::new(svc, storage, jobs, dispatcher, Arc::new(config))
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    raw(router, request).await
}

pub async fn raw(router: &Router, request: Request<Body>) -> Reply {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Reply {
        status,
        headers,
        body,
    }
}

pub async fn admin_get(router: &Router, uri: &str) -> Reply {
    send(router, Method::GET, uri, Some(TOKEN), None).await
}

pub async fn admin_post(router: &Router, uri: &str, body: Value) -> Reply {
    send(router, Method::POST, uri, Some(TOKEN), Some(body)).await
}
