use sqlx::FromRow;

/// A volunteer's application to a project, with the hours logged against it.
/// `user_id` is the volunteer's internal profile id; `project_name` is `None`
/// when the project row is gone.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Application {
    pub user_id: i64,
    pub project_id: i64,
    pub project_name: Option<String>,
    pub hours: i32,
}
