use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::models::{applicant, profile::ROLE_ORG, project};

pub async fn init_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Organizations, projects and one volunteer with logged hours, for local runs.
/// Skipped when any organization already exists.
pub async fn seed_demo(pool: &PgPool) -> Result<(), sqlx::Error> {
    let org_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(ROLE_ORG)
        .fetch_one(pool)
        .await?;
    if org_count > 0 {
        log::info!("Database already has {org_count} organizations, skipping demo seed");
        return Ok(());
    }

    let harbor = insert_org(pool, "demo|harbor-kitchen", "Harbor Kitchen", "Community meals, six nights a week.").await?;
    let parks = insert_org(pool, "demo|green-parks", "Green Parks Trust", "Trail upkeep and tree planting.").await?;

    let meals = project::create(pool, harbor, "Evening meal service", "Prep, serve and clean up.").await?;
    let pantry = project::create(pool, harbor, "Pantry sorting", "Sort weekly donations.").await?;
    let trails = project::create(pool, parks, "Trail restoration", "Saturday work parties.").await?;

    let volunteer: i64 = sqlx::query_scalar(
        "INSERT INTO users (user_id, name, about) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind("demo|sam")
    .bind("Sam Rivera")
    .bind("Weekend volunteer.")
    .fetch_one(pool)
    .await?;

    applicant::create(pool, volunteer, meals, 12).await?;
    applicant::create(pool, volunteer, pantry, 3).await?;
    applicant::create(pool, volunteer, trails, 7).await?;

    log::info!("Demo seed complete");
    Ok(())
}

async fn insert_org(pool: &PgPool, subject: &str, name: &str, about: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO users (user_id, name, about, role) VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(subject)
    .bind(name)
    .bind(about)
    .bind(ROLE_ORG)
    .fetch_one(pool)
    .await
}
