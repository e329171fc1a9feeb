use sqlx::PgPool;

use super::types::Project;

pub async fn find_by_organization(pool: &PgPool, organization_id: i64) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "SELECT id, organization_id, name, description FROM projects \
         WHERE organization_id = $1 ORDER BY id",
    )
    .bind(organization_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    organization_id: i64,
    name: &str,
    description: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO projects (organization_id, name, description) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(organization_id)
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await
}
