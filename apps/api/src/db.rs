use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates the shared PostgreSQL connection pool and applies pending
/// migrations. The pool bounds concurrent connections; excess acquisitions
/// queue until one is released.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Wraps a user-supplied search term for a bound `LIKE $n` parameter. The
/// term itself is never spliced into SQL text.
pub fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_wraps_term() {
        assert_eq!(like_pattern("rust"), "%rust%");
    }

    #[test]
    fn test_like_pattern_keeps_quotes_inert() {
        // Quotes stay inside the bind value, where they cannot break out
        assert_eq!(like_pattern("'; DROP TABLE users;--"), "%'; DROP TABLE users;--%");
    }
}
