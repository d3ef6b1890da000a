//! Demo host: wires the multi-file field into an axum form endpoint.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Multipart, State},
    routing::get,
    Json, Router,
};
use multifile_field::{
    payload_from_multipart, FieldError, FileRecord, FileRegistry, MultiFileField, MultiFileForm,
};
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod disk;
mod registry;
mod settings;

use disk::DiskStorage;
use registry::MemoryRegistry;
use settings::ServerConfig;

const FIELD_NAME: &str = "attachments";

/// The one form this host serves: a single attachments field.
#[derive(Clone)]
struct AttachmentForm {
    attachments: MultiFileField,
}

impl MultiFileForm for AttachmentForm {
    fn upload_fields(&self) -> Vec<(&str, &MultiFileField)> {
        vec![(FIELD_NAME, &self.attachments)]
    }
}

#[derive(Clone)]
struct AppState {
    form: AttachmentForm,
    registry: MemoryRegistry,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ServerConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!("Upload root: {}", config.upload_root.display());

    let storage = DiskStorage::new(&config.upload_root);
    storage
        .initialize()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare upload root: {}", e))?;

    let registry = MemoryRegistry::new();
    let attachments = MultiFileField::new(config.field.clone())
        .with_storage(Arc::new(storage))
        .with_registry(Arc::new(registry.clone()));

    let state = AppState {
        form: AttachmentForm { attachments },
        registry,
    };
    let app = create_app(state);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/attachments",
            get(list_attachments).post(submit_attachments),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_attachments(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<FileRecord>>, FieldError> {
    let records = state.registry.all().await?;
    Ok(Json(records))
}

async fn submit_attachments(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> std::result::Result<Json<Vec<FileRecord>>, FieldError> {
    let payload = payload_from_multipart(FIELD_NAME, &mut multipart).await?;

    let mut payloads = HashMap::new();
    payloads.insert(FIELD_NAME.to_string(), payload);
    let mut processed = state.form.process_uploads(payloads).await?;

    Ok(Json(processed.remove(FIELD_NAME).unwrap_or_default()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) {
            "debug"
        } else {
            "info"
        };

        format!(
            "{}={},tower_http=debug,axum=debug",
            env!("CARGO_CRATE_NAME").replace('-', "_"),
            default_level
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
