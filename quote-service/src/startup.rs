use crate::config::{QuoteConfig, StoreBackend};
use crate::error::AppError;
use crate::handlers;
use crate::middleware::metrics_middleware;
use crate::services::{JsonFileStore, MemoryStore, QuoteStore};
use axum::{middleware, routing::get, Router};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: QuoteConfig,
    pub store: Arc<dyn QuoteStore>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: QuoteConfig) -> Result<Self, AppError> {
        let store: Arc<dyn QuoteStore> = match config.store.backend {
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
            StoreBackend::File => Arc::new(
                JsonFileStore::new(&config.store.file_path)
                    .await
                    .map_err(|e| {
                        tracing::error!(
                            "Failed to open quote store at {}: {}",
                            config.store.file_path,
                            e
                        );
                        e
                    })?,
            ),
        };

        let state = AppState {
            config: config.clone(),
            store,
        };

        let app = Router::new()
            .route(
                "/quotes",
                get(handlers::list_quotes).post(handlers::create_quote),
            )
            .route(
                "/quotes/:id",
                get(handlers::get_quote)
                    .put(handlers::update_quote)
                    .delete(handlers::delete_quote),
            )
            .route("/quotes/quote/random", get(handlers::random_quote))
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .layer(middleware::from_fn(metrics_middleware))
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn store(&self) -> Arc<dyn QuoteStore> {
        self.state.store.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
