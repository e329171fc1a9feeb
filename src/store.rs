//! Data access boundary used by the page handlers.
//!
//! Handlers only see [`Store`]; [`PgStore`] backs it with the `sqlx` queries in
//! `models`. Every call is a single round trip returning an explicit `Result`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::applicant::{self, Application};
use crate::models::profile::{self, Profile};
use crate::models::project::{self, Project};

#[async_trait]
pub trait Store: Send + Sync {
    /// Profiles with role `org`, in store order.
    async fn organizations(&self) -> Result<Vec<Profile>, sqlx::Error>;

    /// A single organization; `None` if the id is unknown or not an organization.
    async fn organization(&self, id: i64) -> Result<Option<Profile>, sqlx::Error>;

    /// Upsert on the subject and return the one row for it.
    async fn ensure_profile(&self, subject: &str, name: Option<&str>) -> Result<Profile, sqlx::Error>;

    async fn profile(&self, id: i64) -> Result<Option<Profile>, sqlx::Error>;

    /// The volunteer's applications, each with its project name when the project exists.
    async fn applications(&self, volunteer_id: i64) -> Result<Vec<Application>, sqlx::Error>;

    /// Sum of the volunteer's logged hours, 0 when they have none.
    async fn volunteer_hours(&self, volunteer_id: i64) -> Result<i64, sqlx::Error>;

    async fn projects_for_organization(&self, organization_id: i64) -> Result<Vec<Project>, sqlx::Error>;

    /// Delete the volunteer's application to a project. `false` if none existed.
    async fn withdraw(&self, volunteer_id: i64, project_id: i64) -> Result<bool, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn organizations(&self) -> Result<Vec<Profile>, sqlx::Error> {
        profile::find_organizations(&self.pool).await
    }

    async fn organization(&self, id: i64) -> Result<Option<Profile>, sqlx::Error> {
        profile::find_organization(&self.pool, id).await
    }

    async fn ensure_profile(&self, subject: &str, name: Option<&str>) -> Result<Profile, sqlx::Error> {
        profile::ensure(&self.pool, subject, name).await
    }

    async fn profile(&self, id: i64) -> Result<Option<Profile>, sqlx::Error> {
        profile::find_by_id(&self.pool, id).await
    }

    async fn applications(&self, volunteer_id: i64) -> Result<Vec<Application>, sqlx::Error> {
        applicant::find_by_volunteer(&self.pool, volunteer_id).await
    }

    async fn volunteer_hours(&self, volunteer_id: i64) -> Result<i64, sqlx::Error> {
        applicant::total_hours(&self.pool, volunteer_id).await
    }

    async fn projects_for_organization(&self, organization_id: i64) -> Result<Vec<Project>, sqlx::Error> {
        project::find_by_organization(&self.pool, organization_id).await
    }

    async fn withdraw(&self, volunteer_id: i64, project_id: i64) -> Result<bool, sqlx::Error> {
        applicant::delete(&self.pool, volunteer_id, project_id).await
    }
}
