use actix_session::Session;

use crate::errors::AppError;

const SUB_KEY: &str = "sub";
const NAME_KEY: &str = "name";
const FLASH_KEY: &str = "flash";
const RETURN_TO_KEY: &str = "return_to";

/// Identity resolved from the session: the provider subject and a display name.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub sub: String,
    pub name: String,
}

pub fn get_identity(session: &Session) -> Option<Identity> {
    let sub = session.get::<String>(SUB_KEY).unwrap_or(None)?;
    let name = session.get::<String>(NAME_KEY).unwrap_or(None).unwrap_or_default();
    Some(Identity { sub, name })
}

/// Identity for handlers behind `require_auth`; a miss here means the session
/// was tampered with or expired mid-request.
pub fn require_identity(session: &Session) -> Result<Identity, AppError> {
    get_identity(session).ok_or_else(|| AppError::Session("No identity in session".to_string()))
}

pub fn set_identity(session: &Session, identity: &Identity) -> Result<(), AppError> {
    session
        .insert(SUB_KEY, &identity.sub)
        .and_then(|_| session.insert(NAME_KEY, &identity.name))
        .map_err(|e| AppError::Session(format!("Failed to store identity: {e}")))
}

pub fn is_signed_in(session: &Session) -> bool {
    session.get::<String>(SUB_KEY).unwrap_or(None).is_some()
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

/// Remember where to send the user once they have signed in.
pub fn set_return_to(session: &Session, path: &str) {
    if is_local_path(path) {
        let _ = session.insert(RETURN_TO_KEY, path);
    }
}

pub fn take_return_to(session: &Session) -> String {
    let path = session.get::<String>(RETURN_TO_KEY).unwrap_or(None);
    session.remove(RETURN_TO_KEY);
    path.filter(|p| is_local_path(p)).unwrap_or_else(|| "/".to_string())
}

/// Same-origin absolute path; rejects `//host` and anything with a scheme.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
