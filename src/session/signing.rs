//! Signed session cookies.
//!
//! The cookie value is `{session_id}.{hex hmac-sha256(session_id)}`.

use cookie::Cookie;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::{MIN_SECRET_LENGTH, SessionConfig, SessionSecret};
use crate::AccessError;

type HmacSha256 = Hmac<Sha256>;

/// Signs a session ID with HMAC-SHA256.
///
/// Returns a string in the format `{session_id}.{signature}`. Fails with
/// [`AccessError::ConfigurationError`] when the secret is shorter than
/// [`MIN_SECRET_LENGTH`] bytes.
pub fn sign_session_id(session_id: &str, secret: &SessionSecret) -> Result<String, AccessError> {
    let mut mac = new_mac(secret)?;
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    Ok(format!("{}.{}", session_id, hex::encode(signature)))
}

/// Verifies a signed cookie value and extracts the session ID.
///
/// Returns `None` if the value is malformed, the signature does not match,
/// or the secret is too short to have signed anything.
pub fn verify_signed_cookie(cookie_value: &str, secret: &SessionSecret) -> Option<String> {
    let (session_id, signature_hex) = cookie_value.rsplit_once('.')?;
    let signature = hex::decode(signature_hex).ok()?;

    let mut mac = new_mac(secret).ok()?;
    mac.update(session_id.as_bytes());

    // verify_slice compares in constant time
    if mac.verify_slice(&signature).is_ok() {
        Some(session_id.to_owned())
    } else {
        log::warn!(
            target: "dashgate::session",
            "msg=\"session cookie tampered\" cookie_prefix=\"{}...\"",
            cookie_value.chars().take(8).collect::<String>()
        );
        None
    }
}

fn new_mac(secret: &SessionSecret) -> Result<HmacSha256, AccessError> {
    if secret.as_bytes().len() < MIN_SECRET_LENGTH {
        return Err(AccessError::ConfigurationError(format!(
            "session secret must be at least {MIN_SECRET_LENGTH} bytes"
        )));
    }

    HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AccessError::ConfigurationError(format!("invalid session secret: {e}")))
}

/// `Set-Cookie` value carrying a signed session.
pub fn session_cookie(signed_value: String, config: &SessionConfig) -> Cookie<'static> {
    let mut builder = Cookie::build((config.cookie_name.clone(), signed_value))
        .path(config.cookie_path.clone())
        .secure(config.cookie_secure)
        .http_only(config.cookie_http_only)
        .same_site(cookie::SameSite::from(config.cookie_same_site))
        .max_age(cookie::time::Duration::seconds(
            config.session_lifetime.num_seconds(),
        ));

    if let Some(domain) = &config.cookie_domain {
        builder = builder.domain(domain.clone());
    }

    builder.build()
}

/// `Set-Cookie` value that clears the session cookie.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = session_cookie(String::new(), config);
    cookie.make_removal();
    cookie
}

/// Finds the session cookie in a `Cookie` request header.
pub fn find_session_cookie(header: &str, cookie_name: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == cookie_name)
        .map(|cookie| cookie.value().to_owned())
}
