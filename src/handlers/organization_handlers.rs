use actix_session::Session;
use actix_web::{web, HttpResponse};

use crate::auth::session::require_identity;
use crate::errors::{AppError, render};
use crate::handlers::ensure_viewer_profile;
use crate::store::Store;
use crate::templates_structs::{OrganizationDetailTemplate, OrganizationListTemplate, PageContext};

pub async fn list(
    store: web::Data<dyn Store>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session)?;

    let orgs = store.organizations().await?;
    let profile = ensure_viewer_profile(store.get_ref(), &identity).await;

    let ctx = PageContext::build(&session, profile.as_ref(), "/organization/all")?;
    render(OrganizationListTemplate { ctx, orgs })
}

pub async fn detail(
    store: web::Data<dyn Store>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session)?;
    let id = path.into_inner();

    let profile = ensure_viewer_profile(store.get_ref(), &identity).await;
    let (org, projects) = tokio::join!(store.organization(id), store.projects_for_organization(id));
    let org = org?.ok_or(AppError::NotFound)?;

    let ctx = PageContext::build(&session, profile.as_ref(), &format!("/organization/{id}"))?;
    render(OrganizationDetailTemplate { ctx, org, projects: projects? })
}
