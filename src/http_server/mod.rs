//! # HTTP Server Module
//!
//! JSON API over the customer registry, served with axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/cliente` - List (GET) and create (POST) customers
//! - `/api/cliente/:cpf` - Fetch (GET), update (PUT), delete (DELETE)

pub mod customer_routes;
pub mod observability_routes;
pub mod server;

pub use customer_routes::{CustomerState, ErrorResponse};
pub use server::HttpServer;

/// Mount point of the customer routes.
pub const CUSTOMER_BASE_PATH: &str = "/api/cliente";
