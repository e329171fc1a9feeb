use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Local, Timelike};

use crate::auth::session::require_identity;
use crate::errors::{AppError, render};
use crate::handlers::ensure_viewer_profile;
use crate::store::Store;
use crate::templates_structs::{HomeTemplate, PageContext};

fn time_greeting(hour: u32, name: &str) -> String {
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {name}")
}

pub async fn index(
    store: web::Data<dyn Store>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let identity = require_identity(&session)?;
    let profile = ensure_viewer_profile(store.get_ref(), &identity).await;
    let ctx = PageContext::build(&session, profile.as_ref(), "/")?;

    let tmpl = HomeTemplate {
        ctx,
        greeting: time_greeting(Local::now().hour(), &identity.name),
    };
    render(tmpl)
}
