pub mod auth_handlers;
pub mod home;
pub mod organization_handlers;
pub mod volunteer_handlers;

use actix_web::HttpResponse;

use crate::auth::session::Identity;
use crate::errors::not_found_page;
use crate::models::profile::Profile;
use crate::store::Store;

/// Make sure the viewer has a profile row. Failures are logged and the page
/// renders without a profile instead of erroring.
pub async fn ensure_viewer_profile(store: &dyn Store, identity: &Identity) -> Option<Profile> {
    match store.ensure_profile(&identity.sub, Some(identity.name.as_str())).await {
        Ok(profile) => Some(profile),
        Err(e) => {
            log::error!("Failed to ensure profile for {}: {e}", identity.sub);
            None
        }
    }
}

pub async fn not_found() -> HttpResponse {
    not_found_page()
}
