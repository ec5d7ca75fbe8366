//! Session cookie formatting and parsing.

use axum::http::{HeaderMap, header::COOKIE};

use crate::config::SessionConfig;

/// `Set-Cookie` value delivering a session token.
pub fn session_cookie(token: &str, session: &SessionConfig) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; Secure; SameSite=None; Max-Age={}",
        session.cookie_name,
        token,
        session.expiry.as_secs()
    )
}

/// `Set-Cookie` value that makes the browser drop the session cookie.
pub fn clear_session_cookie(session: &SessionConfig) -> String {
    format!("{}=; Path=/; HttpOnly; Secure; SameSite=None; Max-Age=0", session.cookie_name)
}

/// Every non-empty value of the named cookie, across all `Cookie` headers.
pub fn session_tokens<'a>(headers: &'a HeaderMap, cookie_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    headers
        .get_all(COOKIE)
        .into_iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(move |cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == cookie_name && !value.is_empty()).then_some(value)
        })
}
