//! Core library of the upload simulator: the simulated file lifecycle and the
//! HTTP/WebSocket facade that exposes it to a presentation layer.

pub mod config;
pub mod error;
pub mod extractors;
pub mod files;
pub mod handlers;
pub mod locale;
pub mod middleware;
pub mod models;
pub mod upload;
pub mod websocket;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use files::{
    FailureReason, FileDescriptor, FileId, FileStatus, FileValidator, SimulatedFile,
    ValidationConfig, ValidationFailure,
};
pub use handlers::create_routes;
pub use locale::Locale;
pub use upload::{
    InstantScheduler, PipelineStage, RecordingScheduler, Scheduler, SimulationTimings,
    SimulatorConfig, TokioScheduler, UploadEvent, UploadSimulator, UploadStats,
};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower::ServiceBuilder;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub simulator: UploadSimulator,
}

impl AppState {
    pub fn new(simulator: UploadSimulator) -> Self {
        Self {
            app_name: "Upload Simulator".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            simulator,
        }
    }

    /// Starts a simulator with real delays on the current runtime.
    pub fn from_config(config: &AppConfig) -> Self {
        let simulator = UploadSimulator::start(config.simulator_config(), Arc::new(TokioScheduler));
        Self::new(simulator)
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(middleware::logging::logging_layer())
                .layer(middleware::cors::cors_layer_from_config(&config.cors)),
        )
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
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
            Ok(mut stream) => {
                stream.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
