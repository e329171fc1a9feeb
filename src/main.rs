use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use volunteer_vision::config::Config;
use volunteer_vision::store::{PgStore, Store};
use volunteer_vision::{db, handlers, routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let pool = db::init_pool(&config.database_url, config.max_connections)
        .await
        .map_err(std::io::Error::other)?;
    db::run_migrations(&pool).await.map_err(std::io::Error::other)?;

    if config.seed_demo {
        db::seed_demo(&pool).await.map_err(std::io::Error::other)?;
    }

    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));
    let auth_settings = web::Data::new(config.auth_settings());
    let secret_key = config.session_key();
    let static_dir = config.static_dir.clone();

    if config.auth_login_url.is_none() {
        log::warn!("No AUTH_LOGIN_URL set, the login page will have no sign-in link");
    }
    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::from(store.clone()))
            .app_data(auth_settings.clone())
            // Static files
            .service(actix_files::Files::new("/static", &static_dir))
            .configure(routes::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
