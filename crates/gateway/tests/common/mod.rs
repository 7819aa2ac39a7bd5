//! In-process fake SDS for gateway integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use sds_gateway::config::Config;
use sds_gateway::models::RemoteFile;

pub const TEST_API_KEY: &str = "test-api-key";

/// Shared state of the fake remote, inspectable from tests.
pub struct FakeSds {
    /// id -> stored bytes
    objects: Mutex<HashMap<String, Vec<u8>>>,
    /// full inventory in listing order
    inventory: Mutex<Vec<RemoteFile>>,
    next_id: AtomicU64,
    /// number of listing requests served so far
    pub list_requests: AtomicUsize,
    /// reject every upload with a structured 422
    pub reject_uploads: AtomicBool,
    /// serve downloads with 201 instead of 200
    pub created_status_downloads: AtomicBool,
    /// fail the nth listing request (0-based) with a 500
    fail_list_at: Mutex<Option<usize>>,
}

impl FakeSds {
    fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            inventory: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            list_requests: AtomicUsize::new(0),
            reject_uploads: AtomicBool::new(false),
            created_status_downloads: AtomicBool::new(false),
            fail_list_at: Mutex::new(None),
        }
    }

    fn allocate_id(&self) -> String {
        format!("{:024x}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    /// Seed an object directly into storage and the inventory.
    pub fn insert_object(&self, file_name: &str, bytes: &[u8]) -> String {
        let id = self.allocate_id();
        self.objects
            .lock()
            .unwrap()
            .insert(id.clone(), bytes.to_vec());
        self.inventory.lock().unwrap().push(RemoteFile {
            id: id.clone(),
            pointer: id.clone(),
            file_name: file_name.to_string(),
            creation_date: "2024-01-01T00:00:00Z".to_string(),
        });
        id
    }

    pub fn object(&self, id: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(id).cloned()
    }

    pub fn inventory_len(&self) -> usize {
        self.inventory.lock().unwrap().len()
    }

    pub fn fail_list_at(&self, request_index: usize) {
        *self.fail_list_at.lock().unwrap() = Some(request_index);
    }
}

/// Bind the fake remote on an ephemeral port and hand back a config
/// pointing at it plus the shared state.
pub async fn spawn_fake_sds() -> (Config, Arc<FakeSds>) {
    let state = Arc::new(FakeSds::new());

    let app = Router::new()
        .route("/files", axum::routing::post(upload).get(list))
        .route("/files/:id", get(download))
        .route("/files/info/:id", get(info))
        .route("/health", get(health))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake sds");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake sds");
    });

    let config = Config {
        sds_url: Url::parse(&format!("http://{}", addr)).unwrap(),
        api_key: TEST_API_KEY.to_string(),
    };

    (config, state)
}

fn check_api_key(headers: &HeaderMap) -> Result<(), Response> {
    let provided = headers.get("x-api-key").and_then(|v| v.to_str().ok());
    if provided != Some(TEST_API_KEY) {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "invalid api key"})),
        )
            .into_response());
    }
    Ok(())
}

async fn upload(
    State(state): State<Arc<FakeSds>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if let Err(response) = check_api_key(&headers) {
        return response;
    }

    if state.reject_uploads.load(Ordering::SeqCst) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "upload rejected by policy"})),
        )
            .into_response();
    }

    let mut file_bytes: Option<Vec<u8>> = None;
    let mut display_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await.expect("multipart field") {
        match field.name().unwrap_or("") {
            "file" => {
                file_bytes = Some(field.bytes().await.expect("file bytes").to_vec());
            }
            "DisplayName" => {
                display_name = Some(field.text().await.expect("display name"));
            }
            _ => {}
        }
    }

    let (Some(bytes), Some(name)) = (file_bytes, display_name) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "missing form field"})),
        )
            .into_response();
    };

    let id = state.insert_object(&name, &bytes);
    // Extra fields exercise the caller's forward-compatible decoding.
    Json(json!({"id": id, "displayName": name, "size": bytes.len()})).into_response()
}

async fn download(
    State(state): State<Arc<FakeSds>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = check_api_key(&headers) {
        return response;
    }

    let Some(bytes) = state.object(&id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "no such object"})),
        )
            .into_response();
    };

    let status = if state.created_status_downloads.load(Ordering::SeqCst) {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    (status, bytes).into_response()
}

async fn info(
    State(state): State<Arc<FakeSds>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = check_api_key(&headers) {
        return response;
    }

    match state.object(&id) {
        Some(bytes) => Json(json!({
            // At-rest size is padded; callers must prefer the logical one.
            "size": bytes.len() + 16,
            "unencryptedSize": bytes.len(),
            "id": id,
        }))
        .into_response(),
        None => Json(json!({"id": id})).into_response(),
    }
}

#[derive(Deserialize)]
struct ListParams {
    limit: usize,
    offset: usize,
}

async fn list(
    State(state): State<Arc<FakeSds>>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Response {
    if let Err(response) = check_api_key(&headers) {
        return response;
    }

    let request_index = state.list_requests.fetch_add(1, Ordering::SeqCst);
    if *state.fail_list_at.lock().unwrap() == Some(request_index) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "inventory backend unavailable"})),
        )
            .into_response();
    }

    let inventory = state.inventory.lock().unwrap();
    let start = params.offset.min(inventory.len());
    let end = (params.offset + params.limit).min(inventory.len());
    Json(inventory[start..end].to_vec()).into_response()
}

async fn health(State(_state): State<Arc<FakeSds>>, headers: HeaderMap) -> Response {
    if let Err(response) = check_api_key(&headers) {
        return response;
    }

    Json(json!([
        {"host": "sds-node-1", "status": "healthy", "region": "eu-west-1"},
        {"host": "sds-node-2", "status": "degraded", "region": "eu-west-2"},
    ]))
    .into_response()
}
