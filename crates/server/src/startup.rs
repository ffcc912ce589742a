use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use configs::{AppConfig, RateLimitConfig, ServerConfig};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use common::rate_limit::RateLimiter;
use service::{
    admin::AdminGate,
    contact::{seaorm::SeaOrmContactRepository, ContactService},
    reviews::{seaorm::SeaOrmReviewRepository, ReviewService},
};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn build_limiter(cfg: &RateLimitConfig) -> RateLimiter {
    RateLimiter::new(Duration::from_secs(cfg.window_secs), cfg.max_requests, cfg.enabled)
}

/// Wire the SeaORM repositories into the request state.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> ServerState {
    ServerState {
        reviews: ReviewService::new(Arc::new(SeaOrmReviewRepository { db: db.clone() })),
        contacts: ContactService::new(Arc::new(SeaOrmContactRepository { db })),
        admin: AdminGate::from_config(&cfg.admin),
    }
}

async fn bind(cfg: &ServerConfig) -> Result<tokio::net::TcpListener, StartupError> {
    tokio::net::TcpListener::bind((cfg.host.as_str(), cfg.port))
        .await
        .map_err(|e| StartupError::Runtime(format!("bind {}:{}: {e}", cfg.host, cfg.port)))
}

/// Connect, prepare the schema and serve until the listener fails.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.site.static_dir)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    if cfg.admin.uses_dev_defaults() {
        warn!(event = "admin_dev_credentials", "ADMIN_PASSWORD/ADMIN_TOKEN are development defaults; set real values");
    }

    let db = models::db::connect_with_config(&cfg.database).await?;
    // refuse to serve without tables
    service::bootstrap::ensure_schema(&db).await?;

    let state = build_state(db, &cfg);
    let limiter = build_limiter(&cfg.rate_limit);
    let app: Router = routes::build_router(state, limiter, build_cors(), &cfg.site.static_dir);

    let listener = bind(&cfg.server).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        event = "listening",
        rate_limit = cfg.rate_limit.enabled,
        static_dir = %cfg.site.static_dir,
        "cleaning site server started"
    );
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;
    Ok(())
}
