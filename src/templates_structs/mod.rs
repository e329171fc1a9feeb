// Template context structures for Askama templates, organized by page.

use actix_session::Session;

use crate::auth::csrf;
use crate::auth::session::{require_identity, take_flash};
use crate::errors::AppError;
use crate::models::profile::Profile;

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.display_name`, `ctx.profile_id`, etc.
pub struct PageContext {
    pub display_name: String,
    pub avatar_initial: String,
    /// Viewer's own profile id; `None` when the profile could not be ensured.
    pub profile_id: Option<i64>,
    pub flash: Option<String>,
    pub csrf_token: String,
    pub current_path: String,
}

impl PageContext {
    pub fn build(session: &Session, profile: Option<&Profile>, current_path: &str) -> Result<Self, AppError> {
        let identity = require_identity(session)?;
        let avatar_initial = identity.name.chars().next().unwrap_or('?').to_uppercase().to_string();
        Ok(Self {
            display_name: identity.name,
            avatar_initial,
            profile_id: profile.map(|p| p.id),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
            current_path: current_path.to_string(),
        })
    }

    pub fn is_active(&self, prefix: &str) -> bool {
        if prefix == "/" {
            self.current_path == "/"
        } else {
            self.current_path.starts_with(prefix)
        }
    }
}

mod common;
mod organization;
mod volunteer;

pub use self::common::{HomeTemplate, LoginTemplate};
pub use self::organization::{OrganizationDetailTemplate, OrganizationListTemplate};
pub use self::volunteer::VolunteerTemplate;
