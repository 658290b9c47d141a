//! relay-server
//!
//! TaskStore を HTTP で公開する薄い層。
//! - **api**: ルーティングとハンドラ
//! - **config**: CLI フラグ / 環境変数
//! - **error**: StoreError → HTTP ステータスの変換

use std::sync::Arc;

use axum::{Router, http::HeaderValue};
use relay_core::{InMemoryTaskStore, TaskStore};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod api;
pub mod config;
pub mod error;
pub mod telemetry;


pub use config::{ConfigError, ServerArgs, ServerConfig};

/// Credentials are allowed, so methods and headers mirror the request instead of `*`.
fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Full application router (routes + CORS + request tracing).
pub fn build_app(store: Arc<dyn TaskStore>, config: &ServerConfig) -> Router {
    api::create_router(api::AppState::new(store))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Serve `app` on an already bound listener until ctrl-c.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    info!(addr = %listener.local_addr()?, "Relay server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Bind according to `config` and run with a fresh in-memory store.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
    let app = build_app(store, &config);
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    serve(listener, app).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "Could not install ctrl-c handler; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
