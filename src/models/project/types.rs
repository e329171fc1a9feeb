use sqlx::FromRow;

/// A volunteering project run by an organization.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Project {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub description: String,
}
