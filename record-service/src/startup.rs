use crate::config::{RecordConfig, StoreBackend};
use crate::handlers;
use crate::services::{InMemoryRecordStore, LocalStorage, MongoDb, RecordStore, Storage};
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::any::Any;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Headroom on top of the file size limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Shared application state, built once at startup and cloned into every
/// request.
#[derive(Clone)]
pub struct AppState {
    pub config: RecordConfig,
    pub store: Arc<dyn RecordStore>,
    pub storage: Arc<dyn Storage>,
}

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state
        .config
        .upload
        .max_bytes
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(handlers::index))
        .route("/createname", post(handlers::create_record))
        .route("/getnames", get(handlers::list_records))
        .route("/getname/:id", get(handlers::get_record))
        .route("/updatenames/:id", put(handlers::update_record))
        .route("/deletename/:id", delete(handlers::delete_record))
        .route(
            "/upload",
            post(handlers::upload_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Request handler panicked");

    AppError::InternalError(anyhow::anyhow!("request handler panicked")).into_response()
}

async fn connect_store(config: &RecordConfig) -> Result<Arc<dyn RecordStore>, AppError> {
    match config.store.backend {
        StoreBackend::Mongodb => {
            let db = MongoDb::connect(
                &config.mongodb.uri,
                &config.mongodb.database,
                &config.mongodb.collection,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to MongoDB: {}", e);
                e
            })?;
            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; records are lost on restart");
            Ok(Arc::new(InMemoryRecordStore::new()))
        }
    }
}

pub async fn shutdown_signal() {
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

pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    pub async fn build(config: RecordConfig) -> Result<Self, AppError> {
        let store = connect_store(&config).await?;
        Self::build_with_store(config, store).await
    }

    /// Like [`Application::build`] but with a caller-provided store.
    pub async fn build_with_store(
        config: RecordConfig,
        store: Arc<dyn RecordStore>,
    ) -> Result<Self, AppError> {
        let storage: Arc<dyn Storage> =
            Arc::new(LocalStorage::new(&config.upload.dir).await.map_err(|e| {
                tracing::error!(
                    "Failed to initialize upload directory at {}: {}",
                    config.upload.dir,
                    e
                );
                e
            })?);

        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState {
                config,
                store,
                storage,
            },
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
