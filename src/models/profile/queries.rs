use sqlx::PgPool;

use super::types::{Profile, ROLE_ORG};

const SELECT_PROFILE: &str = "SELECT id, user_id, name, about, role FROM users";

/// All organization rows, in store order.
pub async fn find_organizations(pool: &PgPool) -> Result<Vec<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(&format!("{SELECT_PROFILE} WHERE role = $1"))
        .bind(ROLE_ORG)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(&format!("{SELECT_PROFILE} WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_organization(pool: &PgPool, id: i64) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(&format!("{SELECT_PROFILE} WHERE id = $1 AND role = $2"))
        .bind(id)
        .bind(ROLE_ORG)
        .fetch_optional(pool)
        .await
}

/// Upsert keyed on the subject. A conflicting row is returned untouched;
/// `name` is only written when the row is first created.
pub async fn ensure(pool: &PgPool, subject: &str, name: Option<&str>) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "INSERT INTO users (user_id, name) VALUES ($1, $2) \
         ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
         RETURNING id, user_id, name, about, role",
    )
    .bind(subject)
    .bind(name)
    .fetch_one(pool)
    .await
}
