use askama::Template;

use super::PageContext;
use crate::models::profile::Profile;
use crate::models::project::Project;

#[derive(Template)]
#[template(path = "organization/list.html")]
pub struct OrganizationListTemplate {
    pub ctx: PageContext,
    pub orgs: Vec<Profile>,
}

#[derive(Template)]
#[template(path = "organization/detail.html")]
pub struct OrganizationDetailTemplate {
    pub ctx: PageContext,
    pub org: Profile,
    pub projects: Vec<Project>,
}
