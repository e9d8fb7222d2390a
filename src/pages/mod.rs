//! Page view-models.
//!
//! A page is built with the services it needs, `mount()`ed once to fetch its
//! data, and rendered as often as needed. All state is local to the page.

mod auth;
mod dashboard;
mod event_detail;
mod home;
pub mod partition;

pub use auth::{logout, AuthMode, AuthPage, AuthState};
pub use dashboard::{DashboardPage, DashboardState};
pub use event_detail::{EventDetailPage, EventDetailState, RsvpControl, RsvpOutcome};
pub use home::{HomePage, HomeState};

use std::fmt;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Client-side routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Dashboard,
    Login,
    Signup,
    Logout,
    /// Link target only; event creation lives outside this front end
    NewEvent,
    EventDetail(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Logout => "/logout".to_string(),
            Route::NewEvent => "/new-event".to_string(),
            Route::EventDetail(id) => format!("/events/{}", urlencoding::encode(id)),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Result of a page's initial fetch
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Lifetime of a mounted page.
///
/// Work run through the scope resolves to `None` once the page is unmounted,
/// so a late response is dropped instead of written into a dead view.
#[derive(Debug, Clone, Default)]
pub struct MountScope {
    token: CancellationToken,
}

impl MountScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fut` unless the scope is cancelled first
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = fut => Some(output),
        }
    }

    pub fn unmount(&self) {
        self.token.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.token.is_cancelled()
    }
}
