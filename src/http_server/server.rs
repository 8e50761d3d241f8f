//! # HTTP Server
//!
//! Combines the gradebook and health routers behind CORS and request tracing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::service::GradebookService;

use super::config::HttpServerConfig;
use super::gradebook_routes::gradebook_routes;
use super::observability_routes::health_routes;

/// HTTP Server for the gradebook
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(service: GradebookService) -> Self {
        Self::with_config(HttpServerConfig::default(), service)
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, service: GradebookService) -> Self {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, service: GradebookService) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(gradebook_routes(Arc::new(service)))
            .layer(TraceLayer::new_for_http())
            .layer(config.cors_layer())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "gradebook HTTP server listening");
        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
