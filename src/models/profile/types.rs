use sqlx::FromRow;

/// Role value that marks a profile row as an organization.
pub const ROLE_ORG: &str = "org";
pub const ROLE_VOLUNTEER: &str = "volunteer";

/// A row of the `users` table. Volunteers and organizations share it;
/// `user_id` is the identity provider subject, `id` the internal key.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: String,
    pub name: Option<String>,
    pub about: Option<String>,
    pub role: String,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Unnamed",
        }
    }

    pub fn about_text(&self) -> &str {
        self.about.as_deref().unwrap_or("")
    }
}
