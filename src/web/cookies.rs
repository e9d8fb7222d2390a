use crate::components::Notification;
use crate::session::CookieUpdate;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

/// Signed session token
pub const SESSION_COOKIE: &str = "es_session";

/// Toasts carried across a redirect
pub const FLASH_COOKIE: &str = "es_flash";

/// Apply the session change a request produced
pub fn apply_session(jar: CookieJar, update: Option<CookieUpdate>) -> CookieJar {
    match update {
        Some(CookieUpdate::Set(value)) => jar.add(
            Cookie::build((SESSION_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        Some(CookieUpdate::Clear) => jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/")),
        None => jar,
    }
}

/// Queue toasts for the next page view
pub fn set_flash(jar: CookieJar, notifications: &[Notification]) -> CookieJar {
    if notifications.is_empty() {
        return jar;
    }

    match serde_json::to_string(notifications) {
        Ok(json) => jar.add(
            Cookie::build((FLASH_COOKIE, urlencoding::encode(&json).into_owned()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        Err(e) => {
            debug!("Could not encode flash messages: {}", e);
            jar
        }
    }
}

/// Read queued toasts and drop the cookie so they show only once
pub fn take_flash(jar: CookieJar) -> (CookieJar, Vec<Notification>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, Vec::new());
    };

    let notifications = urlencoding::decode(cookie.value())
        .ok()
        .and_then(|json| serde_json::from_str::<Vec<Notification>>(&json).ok())
        .unwrap_or_default();

    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/"));
    (jar, notifications)
}
