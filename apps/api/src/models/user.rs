use sqlx::{FromRow, PgPool};

/// The (user_id, profile_category) pair nearly every protected handler
/// resolves from the authenticated username before touching other tables.
#[derive(Debug, Clone, FromRow)]
pub struct UserRef {
    pub user_id: i32,
    pub profile_category: Option<String>,
}

pub async fn find_user_ref(pool: &PgPool, username: &str) -> Result<Option<UserRef>, sqlx::Error> {
    sqlx::query_as("SELECT user_id, profile_category FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}
