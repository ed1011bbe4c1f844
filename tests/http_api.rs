//! HTTP API End-to-End Tests
//!
//! Drives the full router (CORS + tracing layers included) against a
//! real data file and checks both the responses and what lands on disk.

use std::fs;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use cadastro::http_server::HttpServer;
use cadastro::registry::CustomerRegistry;
use cadastro::store::{FlatFileStore, ParseMode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn router(temp: &TempDir) -> Router {
    let store = FlatFileStore::open(temp.path().join("clientes.txt"), ParseMode::Lenient).unwrap();
    let registry = Arc::new(CustomerRegistry::new(store));
    HttpServer::new("127.0.0.1:0", &[], registry).router()
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn maria() -> Value {
    json!({
        "name": "Maria Souza",
        "birth_date": "1982-03-09",
        "sex": "F",
        "rg": "SP-11222333",
        "cpf": "529.982.247-25",
        "address": "Rua Augusta, 900",
        "city": "São Paulo",
        "state": "SP",
        "phone": "(11) 98888-7777",
        "email": "maria@example.com"
    })
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_full_lifecycle_persists_to_file() {
    let temp = TempDir::new().unwrap();
    let app = router(&temp);
    let data_file = temp.path().join("clientes.txt");

    let (status, created) = call(&app, "POST", "/api/cliente", Some(maria())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["cpf"], "52998224725");

    let raw = fs::read_to_string(&data_file).unwrap();
    assert_eq!(
        raw,
        "Maria Souza|09-03-1982|F|SP-11222333|52998224725|Rua Augusta, 900|São Paulo|SP|(11) 98888-7777|maria@example.com\n"
    );

    let (status, updated) = call(
        &app,
        "PUT",
        "/api/cliente/529.982.247-25",
        Some(json!({"city": "Campinas", "phone": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["city"], "Campinas");
    assert_eq!(updated["phone"], "");
    assert_eq!(updated["email"], "maria@example.com");

    let (status, fetched) = call(&app, "GET", "/api/cliente/52998224725", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (status, removed) = call(&app, "DELETE", "/api/cliente/52998224725", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, updated);
    assert_eq!(fs::read_to_string(&data_file).unwrap(), "");

    let (status, _) = call(&app, "GET", "/api/cliente/52998224725", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_post_conflicts() {
    let temp = TempDir::new().unwrap();
    let app = router(&temp);

    call(&app, "POST", "/api/cliente", Some(maria())).await;
    let (status, body) = call(&app, "POST", "/api/cliente", Some(maria())).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let (_, all) = call(&app, "GET", "/api/cliente", None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_field_with_delimiter_is_rejected() {
    let temp = TempDir::new().unwrap();
    let app = router(&temp);

    let mut payload = maria();
    payload["address"] = json!("Rua A | fundos");
    let (status, body) = call(&app, "POST", "/api/cliente", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("address"));
    assert_eq!(fs::read_to_string(temp.path().join("clientes.txt")).unwrap(), "");
}

#[tokio::test]
async fn test_missing_birth_date_is_bad_request() {
    let temp = TempDir::new().unwrap();
    let app = router(&temp);

    let mut payload = maria();
    payload.as_object_mut().unwrap().remove("birth_date");
    let (status, _) = call(&app, "POST", "/api/cliente", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_skips_malformed_lines_in_lenient_mode() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("clientes.txt"),
        "garbage line\nJoão|01-02-1970|M|rg|11144477735|Rua|Natal|RN|84|joao@x.com\n",
    )
    .unwrap();
    let app = router(&temp);

    let (status, all) = call(&app, "GET", "/api/cliente", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
    assert_eq!(all[0]["name"], "João");
    assert_eq!(all[0]["birth_date"], "1970-02-01");
}

#[tokio::test]
async fn test_unreadable_data_file_is_server_error() {
    let temp = TempDir::new().unwrap();
    let app = router(&temp);
    let data_file = temp.path().join("clientes.txt");
    fs::remove_file(&data_file).unwrap();
    fs::create_dir(&data_file).unwrap();

    let (status, body) = call(&app, "GET", "/api/cliente", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert!(body["error"].as_str().unwrap().contains("clientes.txt"));

    let (status, body) = call(&app, "POST", "/api/cliente", Some(maria())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert!(data_file.is_dir());
}

#[tokio::test]
async fn test_health() {
    let temp = TempDir::new().unwrap();
    let (status, body) = call(&router(&temp), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
