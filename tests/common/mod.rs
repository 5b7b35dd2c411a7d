#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use massage_admin::config::ApiConfig;

pub const ADMIN_TOKEN: &str = "tok-admin";
pub const STAFF_TOKEN: &str = "tok-staff";

pub struct MockApi {
    pub base_url: String,
}

impl MockApi {
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: 5,
        }
    }
}

/// Serve a stand-in for the shop backend on a free local port
pub async fn spawn_mock_api() -> Result<MockApi> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind mock api")?;

    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/customers", get(customers))
        .route("/api/reservations", get(reservations));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(MockApi {
        base_url: format!("http://127.0.0.1:{}", port),
    })
}

/// Config pointing at a port nobody listens on
pub fn unreachable_api_config() -> Result<ApiConfig> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(ApiConfig {
        base_url: format!("http://127.0.0.1:{}", port),
        timeout_secs: 2,
    })
}

/// Fresh directory for one test's session file
pub fn temp_config_dir() -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("massage-admin-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match (username, password) {
        ("admin", "admin@123456789") => (
            StatusCode::OK,
            Json(json!({ "token": ADMIN_TOKEN, "role": "admin" })),
        ),
        ("staff", "staff-pw") => (
            StatusCode::OK,
            Json(json!({ "token": STAFF_TOKEN, "role": "staff" })),
        ),
        ("notoken", _) => (StatusCode::OK, Json(json!({ "role": "admin" }))),
        ("owner", _) => (
            StatusCode::OK,
            Json(json!({ "token": "tok-owner", "role": "owner" })),
        ),
        ("broken", _) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database is locked" })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        ),
    }
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn customers(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if bearer(&headers) != Some(ADMIN_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Missing Authorization Header" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!([
            { "id": 1, "name": "Kim", "phone": "010-1234-5678", "memo": null },
            { "id": 2, "name": "Lee", "phone": "010-9999-0000", "memo": "prefers mornings" }
        ])),
    )
}

async fn reservations(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if bearer(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Missing Authorization Header" })),
        );
    }

    let all = vec![
        json!({ "id": 10, "customer_name": "Kim", "reservation_date": "2024-03-01", "start_time": "10:00" }),
        json!({ "id": 11, "customer_name": "Lee", "reservation_date": "2024-03-02", "start_time": "14:30" }),
    ];
    let filtered: Vec<Value> = match params.get("date") {
        Some(date) => all
            .into_iter()
            .filter(|r| r["reservation_date"] == json!(date))
            .collect(),
        None => all,
    };

    (StatusCode::OK, Json(Value::Array(filtered)))
}
