//! Volunteer profile page data: the profile, its project applications and the
//! hours total, fetched together and resolved into a single view state.

use crate::models::applicant::Application;
use crate::models::profile::Profile;
use crate::store::Store;

/// One project the volunteer has applied to.
#[derive(Debug, Clone, PartialEq)]
pub struct Participation {
    pub project_id: i64,
    pub project_name: Option<String>,
    pub hours: i32,
    pub can_withdraw: bool,
}

impl Participation {
    pub fn label(&self) -> String {
        match &self.project_name {
            Some(name) => name.clone(),
            None => format!("Project #{}", self.project_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolunteerDetails {
    pub profile: Profile,
    pub participations: Vec<Participation>,
    pub total_hours: i64,
    pub can_withdraw: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VolunteerView {
    NotFound,
    Loaded(VolunteerDetails),
}

impl VolunteerView {
    pub fn into_details(self) -> Option<VolunteerDetails> {
        match self {
            VolunteerView::Loaded(details) => Some(details),
            VolunteerView::NotFound => None,
        }
    }
}

/// Only the volunteer themselves may withdraw from their projects.
pub fn can_withdraw(viewer: Option<&Profile>, volunteer_id: i64) -> bool {
    viewer.is_some_and(|v| v.id == volunteer_id)
}

/// Issue all reads concurrently, then decide the view once every read is back.
///
/// A missing profile yields `NotFound` whatever happened to the other reads;
/// otherwise the first failure is returned.
pub async fn load(
    store: &dyn Store,
    volunteer_id: i64,
    viewer: Option<&Profile>,
) -> Result<VolunteerView, sqlx::Error> {
    let (profile, applications, hours) = tokio::join!(
        store.profile(volunteer_id),
        store.applications(volunteer_id),
        store.volunteer_hours(volunteer_id),
    );

    let Some(profile) = profile? else {
        return Ok(VolunteerView::NotFound);
    };

    let details = assemble(profile, applications?, hours?, can_withdraw(viewer, volunteer_id));
    Ok(VolunteerView::Loaded(details))
}

fn assemble(
    profile: Profile,
    applications: Vec<Application>,
    total_hours: i64,
    can_withdraw: bool,
) -> VolunteerDetails {
    let participations = applications
        .into_iter()
        .map(|a| Participation {
            project_id: a.project_id,
            project_name: a.project_name,
            hours: a.hours,
            can_withdraw,
        })
        .collect();

    VolunteerDetails { profile, participations, total_hours, can_withdraw }
}
