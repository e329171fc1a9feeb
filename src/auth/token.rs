//! Identity tokens handed to `/auth/callback` by the identity provider.
//!
//! The provider signs an HS256 JWT with the shared `AUTH_SECRET`. Only `sub`
//! and `exp` are required; `name` is the display name shown in the UI.

use jsonwebtoken::errors::{Error, ErrorKind};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::session::Identity;

const FALLBACK_NAME: &str = "Volunteer";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: u64,
}

/// Verify signature and expiry, and turn the claims into a session identity.
pub fn verify(token: &str, secret: &[u8]) -> Result<Identity, Error> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)?;
    let claims = data.claims;

    let sub = claims.sub.trim();
    if sub.is_empty() {
        return Err(ErrorKind::InvalidSubject.into());
    }

    let name = claims
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string());

    Ok(Identity { sub: sub.to_string(), name })
}
