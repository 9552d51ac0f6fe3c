//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Serve the static site directory (including staged WebAssembly assets)
//! - Wire up middleware (security headers, tracing, request ID, timeout)
//! - Bind server to listener and shut down gracefully

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use axum::{body::Body, http::StatusCode, response::IntoResponse, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::SiteConfig;
use crate::http::request::{propagate_request_id_layer, request_span, set_request_id_layer};
use crate::security::{SecurityHeaders, SecurityHeadersLayer};

/// HTTP server for the static site.
pub struct HttpServer {
    router: Router,
    config: SiteConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: SiteConfig) -> Self {
        let headers = SecurityHeaders::from_config(&config.security);
        let router = Self::build_router(&config, headers);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The security header layer is outermost so that every response,
    /// including 404s and timeouts, carries the isolation headers.
    #[allow(deprecated)]
    fn build_router(config: &SiteConfig, headers: SecurityHeaders) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .fallback_service(ServeDir::new(&config.site.static_dir))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.site.request_timeout_secs,
            )))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
            .layer(set_request_id_layer())
            .layer(SecurityHeadersLayer::new(headers))
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let static_dir = Path::new(&self.config.site.static_dir);
        if !static_dir.is_dir() {
            tracing::warn!(
                static_dir = %static_dir.display(),
                "Static directory does not exist; only /health will respond"
            );
        }

        tracing::info!(
            address = %addr,
            static_dir = %static_dir.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
