use sqlx::PgPool;

use super::types::Application;

pub async fn find_by_volunteer(pool: &PgPool, volunteer_id: i64) -> Result<Vec<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "SELECT a.user_id, a.project_id, p.name AS project_name, a.hours \
         FROM applicants a LEFT JOIN projects p ON p.id = a.project_id \
         WHERE a.user_id = $1 ORDER BY a.id",
    )
    .bind(volunteer_id)
    .fetch_all(pool)
    .await
}

/// Total hours through the `get_volunteer_hours` SQL function; 0 with no rows.
pub async fn total_hours(pool: &PgPool, volunteer_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT get_volunteer_hours($1)")
        .bind(volunteer_id)
        .fetch_one(pool)
        .await
}

pub async fn create(pool: &PgPool, volunteer_id: i64, project_id: i64, hours: i32) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO applicants (user_id, project_id, hours) VALUES ($1, $2, $3)")
        .bind(volunteer_id)
        .bind(project_id)
        .bind(hours)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove a volunteer's application. Returns false when there was none.
pub async fn delete(pool: &PgPool, volunteer_id: i64, project_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM applicants WHERE user_id = $1 AND project_id = $2")
        .bind(volunteer_id)
        .bind(project_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
