pub mod repository;

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::error::AppError;

/// Opens the pool behind a SQL output binding and brings its schema up to date.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    // every connection to `sqlite::memory:` is a separate database
    let options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = options.connect(database_url).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("database ready");

    Ok(pool)
}
