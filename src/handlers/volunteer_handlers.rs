use actix_session::Session;
use actix_web::{http::StatusCode, web, HttpResponse};

use crate::auth::csrf;
use crate::auth::session::{require_identity, set_flash};
use crate::errors::{AppError, redirect, render_with_status};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::handlers::ensure_viewer_profile;
use crate::models::volunteer::{self, VolunteerView};
use crate::store::Store;
use crate::templates_structs::{PageContext, VolunteerTemplate};

pub async fn profile(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session)?;
    let volunteer_id = path.into_inner();

    let viewer = ensure_viewer_profile(store.get_ref(), &identity).await;
    let view = volunteer::load(store.get_ref(), volunteer_id, viewer.as_ref()).await?;

    let status = match view {
        VolunteerView::NotFound => StatusCode::NOT_FOUND,
        VolunteerView::Loaded(_) => StatusCode::OK,
    };

    let ctx = PageContext::build(&session, viewer.as_ref(), &format!("/volunteer/{volunteer_id}"))?;
    let tmpl = VolunteerTemplate {
        ctx,
        volunteer_id,
        volunteer: view.into_details(),
    };
    render_with_status(status, tmpl)
}

/// Remove one of the viewer's own project applications.
pub async fn withdraw(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<(i64, i64)>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let identity = require_identity(&session)?;
    let (volunteer_id, project_id) = path.into_inner();

    let viewer = store.ensure_profile(&identity.sub, Some(identity.name.as_str())).await?;
    if !volunteer::can_withdraw(Some(&viewer), volunteer_id) {
        return Err(AppError::PermissionDenied(format!(
            "profile {} tried to withdraw volunteer {volunteer_id} from project {project_id}",
            viewer.id
        )));
    }

    if store.withdraw(volunteer_id, project_id).await? {
        log::info!("Volunteer {volunteer_id} withdrew from project {project_id}");
        set_flash(&session, "Withdrawn from project");
    } else {
        set_flash(&session, "You were not registered for that project");
    }

    Ok(redirect(&format!("/volunteer/{volunteer_id}")))
}
