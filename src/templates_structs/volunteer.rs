use askama::Template;

use super::PageContext;
use crate::models::volunteer::VolunteerDetails;

#[derive(Template)]
#[template(path = "volunteer.html")]
pub struct VolunteerTemplate {
    pub ctx: PageContext,
    pub volunteer_id: i64,
    /// `None` renders the not-found state.
    pub volunteer: Option<VolunteerDetails>,
}
