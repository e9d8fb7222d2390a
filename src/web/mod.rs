//! HTTP surface: one handler per page, rendering on the server.

mod cookies;
mod handlers;

pub use cookies::{FLASH_COOKIE, SESSION_COOKIE};

use crate::api::{AuthApi, EventApi};
use crate::error::Error;
use crate::session::SessionCodec;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono_tz::Tz;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    /// Backend event operations
    pub events: Arc<dyn EventApi>,
    /// Backend signup and login
    pub auth: Arc<dyn AuthApi>,
    /// Signs the session cookie
    pub codec: Arc<SessionCodec>,
    /// Timezone dates are shown in
    pub timezone: Tz,
}

/// Build the router with every page route
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home_handler))
        .route("/dashboard", get(handlers::dashboard_handler))
        .route("/events/{id}", get(handlers::event_detail_handler))
        .route("/events/{id}/rsvp", post(handlers::rsvp_handler))
        .route(
            "/signup",
            get(handlers::signup_form_handler).post(handlers::signup_handler),
        )
        .route(
            "/login",
            get(handlers::login_form_handler).post(handlers::login_handler),
        )
        .route("/logout", get(handlers::logout_handler))
        .route("/health", get(handlers::health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Failure while producing a page
#[derive(Debug)]
pub struct WebError(Error);

impl From<Error> for WebError {
    fn from(err: Error) -> Self {
        WebError(err)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("Failed to render page: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Something went wrong</h1><p>Please try again later.</p>"),
        )
            .into_response()
    }
}
