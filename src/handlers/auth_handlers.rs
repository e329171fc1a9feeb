use actix_session::Session;
use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Deserialize;

use crate::auth::{csrf, session, token, AuthSettings};
use crate::errors::{AppError, redirect, render, render_with_status};
use crate::templates_structs::LoginTemplate;

#[derive(Deserialize)]
pub struct CallbackQuery {
    #[serde(alias = "id_token")]
    pub token: Option<String>,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub async fn login_page(
    settings: web::Data<AuthSettings>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    if session::is_signed_in(&session) {
        return Ok(redirect("/"));
    }

    let tmpl = LoginTemplate { error: None, sign_in_url: settings.sign_in_url() };
    render(tmpl)
}

/// Landing point for the identity provider. Verifies the token and starts a session.
pub async fn callback(
    settings: web::Data<AuthSettings>,
    session: Session,
    query: web::Query<CallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(raw) = query.token.as_deref().filter(|t| !t.is_empty()) else {
        return login_failed(&settings, "Missing sign-in token");
    };

    let identity = match token::verify(raw, &settings.secret) {
        Ok(identity) => identity,
        Err(e) => {
            log::warn!("Rejected identity token: {e}");
            return login_failed(&settings, "Sign-in failed, please try again");
        }
    };

    let return_to = session::take_return_to(&session);
    session.renew();
    session::set_identity(&session, &identity)?;
    log::info!("Signed in {}", identity.sub);

    Ok(redirect(&return_to))
}

pub async fn logout(
    session: Session,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    session.purge();
    Ok(redirect("/login"))
}

fn login_failed(settings: &AuthSettings, message: &str) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error: Some(message.to_string()),
        sign_in_url: settings.sign_in_url(),
    };
    render_with_status(StatusCode::UNAUTHORIZED, tmpl)
}
