//! # HTTP Server
//!
//! Combines the customer and health routers behind CORS and request
//! tracing layers.

use std::future::Future;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::customer_routes::{customer_routes, CustomerState};
use super::observability_routes::health_routes;
use super::CUSTOMER_BASE_PATH;
use crate::observability::Event;
use crate::registry::CustomerRegistry;

/// HTTP server for the customer registry
pub struct HttpServer {
    addr: String,
    router: Router,
}

impl HttpServer {
    /// Create a server for `registry` that will bind to `addr`.
    ///
    /// An empty `cors_origins` allows any origin.
    pub fn new(
        addr: impl Into<String>,
        cors_origins: &[String],
        registry: Arc<CustomerRegistry>,
    ) -> Self {
        Self {
            addr: addr.into(),
            router: Self::build_router(cors_origins, registry),
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(cors_origins: &[String], registry: Arc<CustomerRegistry>) -> Router {
        let customer_state = Arc::new(CustomerState::new(registry));

        let cors = if cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = cors_origins
                .iter()
                .filter_map(|s| match s.parse::<HeaderValue>() {
                    Ok(origin) => Some(origin),
                    Err(_) => {
                        warn!(origin = %s, "ignoring unparsable CORS origin");
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .nest(CUSTOMER_BASE_PATH, customer_routes(customer_state))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> &str {
        &self.addr
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server and run until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        self.start_with_shutdown(ctrl_c()).await
    }

    /// Start the HTTP server and run until `shutdown` resolves
    pub async fn start_with_shutdown<F>(self, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(&self.addr).await?;
        let addr = listener.local_addr()?;

        info!(
            event = %Event::Serving,
            %addr,
            api = CUSTOMER_BASE_PATH,
            "accepting requests"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!(event = %Event::ShutdownComplete, "server stopped");
        Ok(())
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!(event = %Event::ShutdownStart, "shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn registry() -> Arc<CustomerRegistry> {
        Arc::new(CustomerRegistry::new(MemoryStore::new()))
    }

    #[test]
    fn test_server_keeps_bind_address() {
        let server = HttpServer::new("0.0.0.0:8080", &[], registry());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_router_serves_health_and_customers() {
        let router = HttpServer::new("0.0.0.0:5000", &[], registry()).router();

        let health = router
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(health.status(), StatusCode::OK);

        let list = router
            .oneshot(Request::builder().uri("/api/cliente").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(list.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_restricted_cors_origins_build() {
        let origins = vec!["http://localhost:3000".to_string(), "\u{0}bad".to_string()];
        let router = HttpServer::new("0.0.0.0:5000", &origins, registry()).router();

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_start_stops_on_shutdown_signal() {
        let server = HttpServer::new("127.0.0.1:0", &[], registry());
        server.start_with_shutdown(async {}).await.unwrap();
    }
}
