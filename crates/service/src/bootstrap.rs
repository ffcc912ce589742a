//! One-shot schema initialisation.
//!
//! The migrator runs at most once per process; every table is created with
//! `IF NOT EXISTS`, so separate processes doing the same is harmless.

use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use tracing::info;

use crate::errors::ServiceError;

static SCHEMA_READY: OnceCell<()> = OnceCell::const_new();

/// Create the tables unless this process already did. A failed attempt leaves
/// the flag unset so the next call retries.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<(), ServiceError> {
    SCHEMA_READY
        .get_or_try_init(|| async {
            migration::Migrator::up(db, None).await?;
            info!(event = "schema_ready", "database tables initialized");
            Ok::<(), ServiceError>(())
        })
        .await?;
    Ok(())
}

pub fn schema_ready() -> bool {
    SCHEMA_READY.initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use sea_orm::{ConnectionTrait, Statement};

    #[tokio::test]
    async fn ensure_schema_runs_once_and_is_repeatable() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };

        ensure_schema(&db).await?;
        assert!(schema_ready());
        // second call is a no-op and still succeeds
        ensure_schema(&db).await?;
        assert!(schema_ready());

        let backend = db.get_database_backend();
        for table in ["reviews", "contact_requests"] {
            let stmt = Statement::from_string(backend, format!("SELECT COUNT(*) FROM {table}"));
            assert!(db.query_one(stmt).await?.is_some(), "{table} exists");
        }
        Ok(())
    }
}
