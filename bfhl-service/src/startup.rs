//! Application startup and lifecycle management.

use crate::config::BfhlConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::unconfigured::UnconfiguredProvider;
use crate::services::providers::TextProvider;
use crate::services::OneWordAnswerer;
use axum::{
    middleware::from_fn,
    response::Response,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: BfhlConfig,
    pub answerer: Arc<OneWordAnswerer>,
}

impl AppState {
    pub fn new(config: BfhlConfig, provider: Arc<dyn TextProvider>) -> Self {
        let answerer = Arc::new(OneWordAnswerer::new(provider, config.gemini.timeout));
        Self { config, answerer }
    }
}

pub fn build_router(state: AppState) -> Router {
    let official_email = state.config.official_email.clone();

    Router::new()
        .route(
            "/bfhl",
            post(handlers::bfhl::bfhl).fallback(handlers::not_found),
        )
        .route(
            "/health",
            get(handlers::health::health_check).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        // Panics become the generic 500 envelope
        .layer(CatchPanicLayer::custom(
            move |_panic: Box<dyn Any + Send + 'static>| -> Response {
                handlers::failure_response(
                    &official_email,
                    AppError::InternalError(anyhow::anyhow!("handler panicked")),
                )
            },
        ))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application, choosing the AI provider from configuration.
    pub async fn build(config: BfhlConfig) -> Result<Self, AppError> {
        let text_provider: Arc<dyn TextProvider> = match &config.gemini.api_key {
            Some(api_key) => {
                let provider = GeminiTextProvider::new(GeminiConfig {
                    api_key: api_key.clone(),
                    model: config.gemini.model.clone(),
                })
                .map_err(|e| {
                    tracing::error!("Failed to initialize Gemini provider: {}", e);
                    AppError::ConfigError(anyhow::anyhow!(e))
                })?;

                tracing::info!(
                    model = %config.gemini.model,
                    "Initialized Gemini text provider"
                );
                Arc::new(provider)
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not set, AI operation will report unavailable");
                Arc::new(UnconfiguredProvider)
            }
        };

        Self::build_with_provider(config, text_provider).await
    }

    /// Build the application around an explicit provider.
    pub async fn build_with_provider(
        config: BfhlConfig,
        text_provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        if let Err(e) = text_provider.health_check().await {
            tracing::warn!(error = %e, "AI provider health check failed");
        }

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("BFHL service: HTTP on port {}", port);

        let router = build_router(AppState::new(config, text_provider));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
