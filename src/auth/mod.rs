pub mod csrf;
pub mod middleware;
pub mod session;
pub mod token;

/// Identity provider settings shared with the login handlers.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// HS256 key the identity provider signs its tokens with.
    pub secret: Vec<u8>,
    /// Hosted sign-in page; `None` leaves the login page without a sign-in link.
    pub login_url: Option<String>,
    pub callback_url: String,
}

impl AuthSettings {
    /// Sign-in link with the callback passed as `redirect_uri`.
    pub fn sign_in_url(&self) -> Option<String> {
        let base = self.login_url.as_deref()?;
        let query = serde_urlencoded::to_string(&[("redirect_uri", self.callback_url.as_str())]).ok()?;
        let sep = if base.contains('?') { '&' } else { '?' };
        Some(format!("{base}{sep}{query}"))
    }
}
