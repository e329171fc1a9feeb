//! Shared test infrastructure.
//!
//! - `MemoryStore`: in-memory `Store` with per-operation failure switches
//! - `test_app!`: actix test service with sessions and all routes
//! - `sign_in` / `session_cookie` / `csrf_token`: drive a signed-in browser
//! - `setup_test_db()`: Postgres-backed store, only when TEST_DATABASE_URL is set

#![allow(dead_code)]

use std::sync::Mutex;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header, encode};
use sqlx::PgPool;

use volunteer_vision::auth::AuthSettings;
use volunteer_vision::auth::token::Claims;
use volunteer_vision::models::applicant::Application;
use volunteer_vision::models::profile::{Profile, ROLE_ORG, ROLE_VOLUNTEER};
use volunteer_vision::models::project::Project;
use volunteer_vision::store::Store;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const TEST_SECRET: &[u8] = b"integration-test-secret";
pub const ALICE_SUB: &str = "auth0|alice";
pub const BOB_SUB: &str = "auth0|bob";

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

#[derive(Default)]
struct State {
    profiles: Vec<Profile>,
    projects: Vec<Project>,
    applicants: Vec<Application>,
    next_id: i64,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Operations that should fail with a database error.
#[derive(Default, Clone, Copy)]
pub struct Failures {
    pub organizations: bool,
    pub ensure_profile: bool,
    pub profile: bool,
    pub applications: bool,
    pub hours: bool,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    failures: Mutex<Failures>,
}

fn injected(op: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("injected failure: {op}"))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, failures: Failures) {
        *self.failures.lock().unwrap() = failures;
    }

    fn failures(&self) -> Failures {
        *self.failures.lock().unwrap()
    }

    pub fn add_profile(&self, subject: &str, name: &str, role: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.profiles.push(Profile {
            id,
            user_id: subject.to_string(),
            name: Some(name.to_string()),
            about: Some(format!("About {name}")),
            role: role.to_string(),
        });
        id
    }

    pub fn add_org(&self, subject: &str, name: &str) -> i64 {
        self.add_profile(subject, name, ROLE_ORG)
    }

    pub fn add_volunteer(&self, subject: &str, name: &str) -> i64 {
        self.add_profile(subject, name, ROLE_VOLUNTEER)
    }

    pub fn add_project(&self, organization_id: i64, name: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.projects.push(Project {
            id,
            organization_id,
            name: name.to_string(),
            description: format!("{name} description"),
        });
        id
    }

    pub fn add_application(&self, volunteer_id: i64, project_id: i64, hours: i32) {
        self.state.lock().unwrap().applicants.push(Application {
            user_id: volunteer_id,
            project_id,
            project_name: None,
            hours,
        });
    }

    pub fn profile_count(&self, subject: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .profiles
            .iter()
            .filter(|p| p.user_id == subject)
            .count()
    }

    pub fn profile_id(&self, subject: &str) -> Option<i64> {
        self.state
            .lock()
            .unwrap()
            .profiles
            .iter()
            .find(|p| p.user_id == subject)
            .map(|p| p.id)
    }

    pub fn application_count(&self, volunteer_id: i64) -> usize {
        self.state
            .lock()
            .unwrap()
            .applicants
            .iter()
            .filter(|a| a.user_id == volunteer_id)
            .count()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn organizations(&self) -> Result<Vec<Profile>, sqlx::Error> {
        if self.failures().organizations {
            return Err(injected("organizations"));
        }
        let state = self.state.lock().unwrap();
        Ok(state.profiles.iter().filter(|p| p.role == ROLE_ORG).cloned().collect())
    }

    async fn organization(&self, id: i64) -> Result<Option<Profile>, sqlx::Error> {
        let state = self.state.lock().unwrap();
        Ok(state.profiles.iter().find(|p| p.id == id && p.role == ROLE_ORG).cloned())
    }

    async fn ensure_profile(&self, subject: &str, name: Option<&str>) -> Result<Profile, sqlx::Error> {
        if self.failures().ensure_profile {
            return Err(injected("ensure_profile"));
        }
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state.profiles.iter().find(|p| p.user_id == subject) {
            return Ok(existing.clone());
        }
        let id = state.next_id();
        let profile = Profile {
            id,
            user_id: subject.to_string(),
            name: name.map(String::from),
            about: None,
            role: ROLE_VOLUNTEER.to_string(),
        };
        state.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn profile(&self, id: i64) -> Result<Option<Profile>, sqlx::Error> {
        if self.failures().profile {
            return Err(injected("profile"));
        }
        let state = self.state.lock().unwrap();
        Ok(state.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn applications(&self, volunteer_id: i64) -> Result<Vec<Application>, sqlx::Error> {
        if self.failures().applications {
            return Err(injected("applications"));
        }
        let state = self.state.lock().unwrap();
        // Mirrors the LEFT JOIN: unknown projects have no name
        Ok(state
            .applicants
            .iter()
            .filter(|a| a.user_id == volunteer_id)
            .map(|a| Application {
                project_name: state
                    .projects
                    .iter()
                    .find(|p| p.id == a.project_id)
                    .map(|p| p.name.clone()),
                ..a.clone()
            })
            .collect())
    }

    async fn volunteer_hours(&self, volunteer_id: i64) -> Result<i64, sqlx::Error> {
        if self.failures().hours {
            return Err(injected("hours"));
        }
        let state = self.state.lock().unwrap();
        Ok(state
            .applicants
            .iter()
            .filter(|a| a.user_id == volunteer_id)
            .map(|a| i64::from(a.hours))
            .sum())
    }

    async fn projects_for_organization(&self, organization_id: i64) -> Result<Vec<Project>, sqlx::Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .projects
            .iter()
            .filter(|p| p.organization_id == organization_id)
            .cloned()
            .collect())
    }

    async fn withdraw(&self, volunteer_id: i64, project_id: i64) -> Result<bool, sqlx::Error> {
        let mut state = self.state.lock().unwrap();
        let before = state.applicants.len();
        state
            .applicants
            .retain(|a| !(a.user_id == volunteer_id && a.project_id == project_id));
        Ok(state.applicants.len() < before)
    }
}

// ============================================================================
// APP HELPERS
// ============================================================================

pub fn auth_settings() -> AuthSettings {
    AuthSettings {
        secret: TEST_SECRET.to_vec(),
        login_url: Some("https://id.example.org/authorize".to_string()),
        callback_url: "http://localhost/auth/callback".to_string(),
    }
}

/// Build an initialised test service around an `Arc<MemoryStore>`.
#[macro_export]
macro_rules! test_app {
    ($store:expr) => {{
        let store: std::sync::Arc<dyn volunteer_vision::store::Store> = $store.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::from(&[7u8; 64]),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data(actix_web::web::Data::from(store))
                .app_data(actix_web::web::Data::new($crate::common::auth_settings()))
                .configure(volunteer_vision::routes::configure)
                .default_service(actix_web::web::to(volunteer_vision::handlers::not_found)),
        )
        .await
    }};
}

pub fn identity_token(sub: &str, name: &str) -> String {
    let claims = Claims {
        sub: sub.to_string(),
        name: Some(name.to_string()),
        exp: (chrono::Utc::now().timestamp() + 3600) as u64,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET)).unwrap()
}

/// The session cookie set by a response, if the session changed.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "id")
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

pub fn csrf_token(html: &str) -> String {
    let re = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]{64})""#).unwrap();
    re.captures(html).expect("no csrf token in page")[1].to_string()
}

/// Sign in through `/auth/callback` and return the session cookie.
#[macro_export]
macro_rules! sign_in {
    ($app:expr, $sub:expr, $name:expr) => {{
        let token = $crate::common::identity_token($sub, $name);
        let req = actix_web::test::TestRequest::get()
            .uri(&format!("/auth/callback?token={token}"))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::SEE_OTHER);
        $crate::common::session_cookie(&resp).expect("callback did not set a session cookie")
    }};
}

/// GET a page with the given cookie; returns (status, body, refreshed cookie).
#[macro_export]
macro_rules! get_page {
    ($app:expr, $uri:expr, $cookie:expr) => {{
        let req = actix_web::test::TestRequest::get()
            .uri($uri)
            .cookie($cookie.clone())
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        let status = resp.status();
        let cookie = $crate::common::session_cookie(&resp).unwrap_or_else(|| $cookie.clone());
        let body = actix_web::test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap(), cookie)
    }};
}

// ============================================================================
// DATABASE SETUP
// ============================================================================

pub struct TestDb {
    pool: PgPool,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to TEST_DATABASE_URL, run migrations and empty all tables.
///
/// Only called from `#[ignore]`d tests; tests sharing the database truncate it,
/// so run them with `--ignored --test-threads=1`.
pub async fn setup_test_db() -> TestDb {
    let url = std::env::var("TEST_DATABASE_URL")
        .ok()
        .filter(|url| !url.is_empty())
        .expect("TEST_DATABASE_URL must point at a scratch Postgres database");

    let pool = volunteer_vision::db::init_pool(&url, 2)
        .await
        .expect("Failed to connect to test database");
    volunteer_vision::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    sqlx::query("TRUNCATE applicants, projects, users RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to reset test database");

    TestDb { pool }
}

/// Rows stored for a subject; the upsert must never duplicate them.
pub async fn count_by_subject(pool: &PgPool, subject: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE user_id = $1")
        .bind(subject)
        .fetch_one(pool)
        .await
        .expect("count users by subject")
}
