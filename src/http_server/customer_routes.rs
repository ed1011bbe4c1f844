//! Customer HTTP Routes
//!
//! CRUD endpoints over the [`CustomerRegistry`]. Registry calls do
//! blocking file I/O, so each one runs on tokio's blocking pool.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::CUSTOMER_BASE_PATH;
use crate::customer::{Customer, CustomerPatch};
use crate::observability::Event;
use crate::registry::{CustomerRegistry, RegistryError, RegistryResult};

// ==================
// Shared State
// ==================

/// Customer state shared across handlers
pub struct CustomerState {
    pub registry: Arc<CustomerRegistry>,
}

impl CustomerState {
    pub fn new(registry: Arc<CustomerRegistry>) -> Self {
        Self { registry }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// ==================
// Customer Routes
// ==================

/// Create customer routes
pub fn customer_routes(state: Arc<CustomerState>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:cpf",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: status.as_u16(),
        }),
    )
}

fn registry_error(err: RegistryError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if err.is_client_error() {
        info!(event = %Event::RequestRejected, status = status.as_u16(), error = %err, "request rejected");
    } else {
        warn!(event = %Event::StorageFailed, error = %err, "registry operation failed");
    }

    api_error(status, err.to_string())
}

fn body_error(rejection: JsonRejection) -> ApiError {
    info!(event = %Event::RequestRejected, error = %rejection.body_text(), "invalid request body");
    api_error(StatusCode::BAD_REQUEST, rejection.body_text())
}

async fn run_blocking<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> RegistryResult<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(op).await {
        Ok(result) => result.map_err(registry_error),
        Err(e) => {
            warn!(error = %e, "registry task failed");
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal error",
            ))
        }
    }
}

// ==================
// Handlers
// ==================

async fn list_handler(
    State(state): State<Arc<CustomerState>>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let registry = state.registry.clone();
    let customers = run_blocking(move || registry.list()).await?;
    Ok(Json(customers))
}

async fn get_handler(
    State(state): State<Arc<CustomerState>>,
    Path(cpf): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let registry = state.registry.clone();
    let customer = run_blocking(move || registry.find(&cpf)).await?;
    Ok(Json(customer))
}

async fn create_handler(
    State(state): State<Arc<CustomerState>>,
    body: Result<Json<Customer>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(customer) = body.map_err(body_error)?;
    let registry = state.registry.clone();
    let created = run_blocking(move || registry.insert(customer)).await?;

    let location = format!("{}/{}", CUSTOMER_BASE_PATH, created.cpf);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

async fn update_handler(
    State(state): State<Arc<CustomerState>>,
    Path(cpf): Path<String>,
    body: Result<Json<CustomerPatch>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Json(patch) = body.map_err(body_error)?;
    let registry = state.registry.clone();
    let updated = run_blocking(move || registry.update(&cpf, &patch)).await?;
    Ok(Json(updated))
}

async fn delete_handler(
    State(state): State<Arc<CustomerState>>,
    Path(cpf): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let registry = state.registry.clone();
    let removed = run_blocking(move || registry.delete(&cpf)).await?;
    Ok(Json(removed))
}
