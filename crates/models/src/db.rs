use std::time::Duration;

use configs::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Database settings from `config.toml` / environment (`.env` is loaded first).
pub fn config_from_env() -> anyhow::Result<DatabaseConfig> {
    let _ = dotenvy::dotenv();
    let cfg = configs::AppConfig::load_and_validate()?;
    Ok(cfg.database)
}

pub async fn connect() -> anyhow::Result<DatabaseConnection> {
    let cfg = config_from_env()?;
    Ok(connect_with_config(&cfg).await?)
}

/// Open a pooled connection; each query checks a connection out and returns it on completion.
pub async fn connect_with_config(cfg: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(cfg.effective_url());
    opt.max_connections(cfg.max_connections)
        .min_connections(cfg.min_connections)
        .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(cfg.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(cfg.max_lifetime_secs))
        .sqlx_logging(cfg.sqlx_logging);

    let db = Database::connect(opt).await?;
    info!(
        event = "db_connected",
        ssl_mode = cfg.ssl_mode.as_str(),
        max_connections = cfg.max_connections,
        "database pool ready"
    );
    Ok(db)
}
