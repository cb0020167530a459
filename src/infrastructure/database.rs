// PostgreSQL connection pool
// Built once at startup and handed to the repositories

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connects a bounded pool to `database_url`
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    tracing::info!(max_connections, "Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    health_check(&pool).await?;
    tracing::info!("Database connected successfully");

    Ok(pool)
}

/// Round-trips a trivial query
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
