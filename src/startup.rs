//! Application startup and lifecycle management.

use crate::config::RelayConfig;
use crate::error::AppError;
use crate::handlers;
use crate::services::{CourierProvider, MessageProvider, MockProvider};
use axum::{
    routing::{any, get},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: RelayConfig,
    pub provider: Arc<dyn MessageProvider>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration, selecting the
    /// message provider from it.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn MessageProvider> = if config.courier.enabled {
            tracing::info!("Courier message provider initialized");
            Arc::new(CourierProvider::new(config.courier.clone()))
        } else {
            tracing::info!("Courier provider disabled, using mock message provider");
            Arc::new(MockProvider::new(true))
        };

        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an externally constructed provider.
    /// Tests use this to substitute a fake.
    pub async fn build_with_provider(
        config: RelayConfig,
        provider: Arc<dyn MessageProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            provider,
        };

        // Bind the listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("notify-relay listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        // The relay route accepts any method; the handler enforces POST so
        // the contract's plain-text 405 body is served rather than the
        // framework default.
        let router = Router::new()
            .route("/notify", any(handlers::relay))
            .route("/health", get(handlers::health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
