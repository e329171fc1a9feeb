use actix_web::{error, middleware, web};

use crate::auth;
use crate::errors::not_found_page;
use crate::handlers::{auth_handlers, home, organization_handlers, volunteer_handlers};

/// Register all page routes. Public routes come first; everything else sits
/// behind `require_auth`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Ids that don't parse get the regular 404 page
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            error::InternalError::from_response(err, not_found_page()).into()
        }))
        // Public routes
        .route("/login", web::get().to(auth_handlers::login_page))
        .route("/auth/callback", web::get().to(auth_handlers::callback))
        // Protected routes
        .service(
            web::scope("")
                .wrap(middleware::from_fn(auth::middleware::require_auth))
                .route("/", web::get().to(home::index))
                .route("/logout", web::post().to(auth_handlers::logout))
                // /organization/all BEFORE /organization/{id}
                .route("/organization/all", web::get().to(organization_handlers::list))
                .route("/organization/{id}", web::get().to(organization_handlers::detail))
                .route("/volunteer/{volunteer_id}", web::get().to(volunteer_handlers::profile))
                .route(
                    "/volunteer/{volunteer_id}/projects/{project_id}/withdraw",
                    web::post().to(volunteer_handlers::withdraw),
                ),
        );
}
