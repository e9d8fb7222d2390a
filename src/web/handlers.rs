use super::cookies::{apply_session, set_flash, take_flash, SESSION_COOKIE};
use super::{AppState, WebError};
use crate::components::Notification;
use crate::pages::{logout, AuthPage, DashboardPage, EventDetailPage, HomePage, Route};
use crate::session::{CookieSessionStore, SessionContext};
use axum::{
    extract::{Form, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Submitted auth form
#[derive(Debug, Deserialize)]
pub struct AuthFormData {
    pub email: String,
    pub password: String,
}

/// Restore the browser's session for this request
async fn request_session(
    state: &AppState,
    jar: &CookieJar,
) -> (SessionContext, Arc<CookieSessionStore>) {
    let incoming = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let store = Arc::new(CookieSessionStore::new(state.codec.clone(), incoming));
    let session = SessionContext::new(state.auth.clone(), store.clone());
    session.restore().await;
    (session, store)
}

/// Handler for the event list
pub async fn home_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let (session, store) = request_session(&state, &jar).await;
    let (jar, toasts) = take_flash(jar);

    let page = HomePage::new(state.events.clone(), session);
    page.mount().await;
    let html = page.render(state.timezone, &toasts).await?;
    page.unmount();

    Ok((apply_session(jar, store.take_update().await), Html(html)))
}

/// Handler for the personal dashboard
pub async fn dashboard_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, WebError> {
    let (session, store) = request_session(&state, &jar).await;
    let jar = apply_session(jar, store.take_update().await);

    if !session.is_authenticated().await {
        return Ok((jar, Redirect::to(&Route::Login.path())).into_response());
    }

    let (jar, toasts) = take_flash(jar);
    let page = DashboardPage::new(state.events.clone(), session);
    page.mount().await;
    let html = page.render(state.timezone, &toasts).await?;
    page.unmount();

    Ok((jar, Html(html)).into_response())
}

/// Handler for a single event
pub async fn event_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let (session, store) = request_session(&state, &jar).await;
    let (jar, toasts) = take_flash(jar);

    let page = EventDetailPage::new(id, state.events.clone(), session);
    page.mount().await;
    let html = page.render(state.timezone, &toasts).await?;
    page.unmount();

    Ok((apply_session(jar, store.take_update().await), Html(html)))
}

/// Handler for the RSVP button. Always redirects back to the event.
pub async fn rsvp_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    jar: CookieJar,
) -> impl IntoResponse {
    let (session, store) = request_session(&state, &jar).await;
    let back = Route::EventDetail(id.clone()).path();

    let authenticated = session.is_authenticated().await;

    let page = EventDetailPage::new(id, state.events.clone(), session);
    // Anonymous attempts are turned away by the page without any backend call
    if authenticated {
        page.mount().await;
    }
    let outcome = page.rsvp().await;
    info!("RSVP for {} finished: {:?}", page.id(), outcome);

    let toasts = page.take_notifications().await;
    page.unmount();

    let jar = apply_session(jar, store.take_update().await);
    (set_flash(jar, &toasts), Redirect::to(&back))
}

/// Handler for the signup form page
pub async fn signup_form_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let (session, store) = request_session(&state, &jar).await;
    let (jar, toasts) = take_flash(jar);

    let html = AuthPage::signup(session).render(&toasts).await?;
    Ok((apply_session(jar, store.take_update().await), Html(html)))
}

/// Handler for signup form submission
pub async fn signup_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AuthFormData>,
) -> Result<Response, WebError> {
    let (session, store) = request_session(&state, &jar).await;
    submit_auth(AuthPage::signup(session), store, jar, form).await
}

/// Handler for the login form page
pub async fn login_form_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebError> {
    let (session, store) = request_session(&state, &jar).await;
    let (jar, toasts) = take_flash(jar);

    let html = AuthPage::login(session).render(&toasts).await?;
    Ok((apply_session(jar, store.take_update().await), Html(html)))
}

/// Handler for login form submission
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AuthFormData>,
) -> Result<Response, WebError> {
    let (session, store) = request_session(&state, &jar).await;
    submit_auth(AuthPage::login(session), store, jar, form).await
}

/// Navigate on success, otherwise show the form again with the errors
async fn submit_auth(
    page: AuthPage,
    store: Arc<CookieSessionStore>,
    jar: CookieJar,
    form: AuthFormData,
) -> Result<Response, WebError> {
    let result = page.submit(&form.email, &form.password).await;
    let jar = apply_session(jar, store.take_update().await);

    match result {
        Ok(route) => Ok((jar, Redirect::to(&route.path())).into_response()),
        Err(_) => {
            let html = page.render(&[]).await?;
            Ok((jar, Html(html)).into_response())
        }
    }
}

/// Handler for logging out
pub async fn logout_handler(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (session, store) = request_session(&state, &jar).await;
    let route = logout(&session).await;

    let jar = apply_session(jar, store.take_update().await);
    let jar = set_flash(jar, &[Notification::info("You have been logged out.")]);
    (jar, Redirect::to(&route.path()))
}

// Handler for health check
pub async fn health_handler() -> &'static str {
    "OK"
}
