use super::MountScope;
use crate::api::EventApi;
use crate::components::{EventList, LayoutView, Notification};
use crate::error::AppResult;
use crate::models::Event;
use crate::session::SessionContext;
use askama::Template;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::error;

pub const LOAD_ERROR: &str = "Failed to load events. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub events: Vec<Event>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    layout: LayoutView,
    event_list: String,
}

/// Landing page listing every event
pub struct HomePage {
    events: Arc<dyn EventApi>,
    session: SessionContext,
    scope: MountScope,
    state: RwLock<HomeState>,
}

impl HomePage {
    pub fn new(events: Arc<dyn EventApi>, session: SessionContext) -> Self {
        Self {
            events,
            session,
            scope: MountScope::new(),
            state: RwLock::new(HomeState::default()),
        }
    }

    /// Fetch all events once
    pub async fn mount(&self) {
        let Some(result) = self.scope.run(self.events.get_all_events()).await else {
            return;
        };

        let mut state = self.state.write().await;
        match result {
            Ok(events) => state.events = events,
            Err(e) => {
                error!("Failed to load events: {}", e);
                state.error = Some(LOAD_ERROR.to_string());
            }
        }
        state.loading = false;
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    pub async fn state(&self) -> HomeState {
        self.state.read().await.clone()
    }

    /// Render the page with toasts carried over from a previous request
    pub async fn render(&self, tz: Tz, toasts: &[Notification]) -> AppResult<String> {
        let state = self.state().await;

        let page = HomeTemplate {
            layout: LayoutView::new(&self.session, "Home", toasts).await?,
            event_list: EventList::render_events(
                &state.events,
                state.loading,
                state.error.as_deref(),
                tz,
            )?,
        };

        Ok(page.render()?)
    }
}
