use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind, DbOwner, DbProfile};
use crate::error::AppError;

/// Lifetime and idle timeout for the single in-memory SQLite connection.
const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(60 * 60 * 24 * 365);

/// Retry a connection attempt with a fixed interval between tries.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempt, interval_ms, "connection retry succeeded");
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(attempt, max_attempts, interval_ms, "connection attempt failed");
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::db_unavailable("no connection attempt was made")))
}

fn connect_options(url: &str, kind: DbKind) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    let max = match kind {
        // Every in-memory connection is its own database
        DbKind::SqliteMemory => 1,
        DbKind::SqliteFile => 4,
        DbKind::Postgres => 10,
    };
    opt.min_connections(1)
        .max_connections(max)
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if kind == DbKind::SqliteMemory {
        // A recycled connection would reopen an empty database without schema.
        opt.max_lifetime(MEMORY_CONNECTION_LIFETIME)
            .idle_timeout(MEMORY_CONNECTION_LIFETIME);
    }
    opt
}

/// Unified database connector that supports different profiles, kinds and owners.
/// This function does NOT run any migrations.
pub async fn connect_db(
    profile: DbProfile,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, kind, owner)?;
    let opt = connect_options(&url, kind);

    let conn = match kind {
        DbKind::Postgres => {
            retry_connection(
                || {
                    let opt = opt.clone();
                    async move {
                        Database::connect(opt).await.map_err(|e| {
                            AppError::db_unavailable(format!("failed to connect to Postgres: {e}"))
                        })
                    }
                },
                5,
                500,
            )
            .await?
        }
        DbKind::SqliteFile | DbKind::SqliteMemory => Database::connect(opt)
            .await
            .map_err(|e| AppError::config(format!("failed to open SQLite database: {e}")))?,
    };
    info!(?profile, ?kind, ?owner, "database connected");
    Ok(conn)
}

/// Build the app DB *and* guarantee schema is current.
///
/// In-memory SQLite is migrated on the connection that is returned; other
/// kinds migrate through an owner connection first.
pub async fn bootstrap_db(profile: DbProfile, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    info!(?profile, ?kind, "bootstrap start");

    let conn = match kind {
        DbKind::SqliteMemory => {
            let conn = connect_db(profile, kind, DbOwner::App).await?;
            migrate(&conn, MigrationCommand::Up).await?;
            conn
        }
        DbKind::SqliteFile | DbKind::Postgres => {
            let owner = connect_db(profile, kind, DbOwner::Owner).await?;
            migrate(&owner, MigrationCommand::Up).await?;
            owner.close().await?;
            connect_db(profile, kind, DbOwner::App).await?
        }
    };

    info!("bootstrap ready");
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_connection_is_never_recycled() {
        let opt = connect_options("sqlite::memory:", DbKind::SqliteMemory);
        assert_eq!(opt.get_max_connections(), Some(1));
        assert_eq!(opt.get_max_lifetime(), Some(MEMORY_CONNECTION_LIFETIME));
        assert_eq!(opt.get_idle_timeout(), Some(MEMORY_CONNECTION_LIFETIME));
    }

    #[test]
    fn pooled_kinds_keep_default_recycling() {
        let opt = connect_options("sqlite://waymark.db?mode=rwc", DbKind::SqliteFile);
        assert_eq!(opt.get_max_connections(), Some(4));
        assert_eq!(opt.get_max_lifetime(), None);
        assert_eq!(opt.get_idle_timeout(), None);
    }
}
