use super::{partition, MountScope, Route};
use crate::api::EventApi;
use crate::components::{EventList, LayoutView, Loading, Notification};
use crate::error::AppResult;
use crate::models::{Event, User};
use crate::session::SessionContext;
use askama::Template;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, warn};

pub const LOAD_ERROR: &str = "Failed to load your events. Please try again later.";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    /// Events the user organizes or attends, in fetch order
    pub events: Vec<Event>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

struct Section {
    title: &'static str,
    list_html: String,
    empty_message: &'static str,
    action_href: String,
    action_label: &'static str,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    layout: LayoutView,
    user_name: String,
    logged_in: bool,
    error: String,
    loading_html: String,
    sections: Vec<Section>,
}

/// The current user's organized and attended events
pub struct DashboardPage {
    events: Arc<dyn EventApi>,
    session: SessionContext,
    scope: MountScope,
    state: RwLock<DashboardState>,
}

impl DashboardPage {
    pub fn new(events: Arc<dyn EventApi>, session: SessionContext) -> Self {
        Self {
            events,
            session,
            scope: MountScope::new(),
            state: RwLock::new(DashboardState::default()),
        }
    }

    /// Fetch all events and keep the ones involving the current user
    pub async fn mount(&self) {
        let Some(user) = self.session.current_user().await else {
            warn!("Dashboard mounted without a logged in user");
            self.state.write().await.loading = false;
            return;
        };

        let Some(result) = self.scope.run(self.events.get_all_events()).await else {
            return;
        };

        let mut state = self.state.write().await;
        match result {
            Ok(events) => {
                state.events = events
                    .into_iter()
                    .filter(|e| partition::involves(e, &user.id))
                    .collect();
            }
            Err(e) => {
                error!("Failed to load dashboard events: {}", e);
                state.error = Some(LOAD_ERROR.to_string());
            }
        }
        state.loading = false;
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    /// Events the current user organizes
    pub async fn organizing(&self) -> Vec<Event> {
        self.partition(partition::organizing).await
    }

    /// Events the current user attends without organizing them
    pub async fn attending(&self) -> Vec<Event> {
        self.partition(partition::attending).await
    }

    async fn partition(
        &self,
        split: for<'a> fn(&'a [Event], &str) -> Vec<&'a Event>,
    ) -> Vec<Event> {
        let Some(user) = self.session.current_user().await else {
            return Vec::new();
        };
        let state = self.state.read().await;
        split(&state.events, &user.id).into_iter().cloned().collect()
    }

    pub async fn render(&self, tz: Tz, toasts: &[Notification]) -> AppResult<String> {
        let user: Option<User> = self.session.current_user().await;
        let state = self.state().await;

        let sections = if state.loading || state.error.is_some() {
            Vec::new()
        } else {
            let organizing = self.organizing().await;
            let attending = self.attending().await;
            vec![
                Section {
                    title: "Events You're Organizing",
                    list_html: section_list(&organizing, tz)?,
                    empty_message: "You haven't created any events yet.",
                    action_href: Route::NewEvent.path(),
                    action_label: "Create an Event",
                },
                Section {
                    title: "Events You're Attending",
                    list_html: section_list(&attending, tz)?,
                    empty_message: "You haven't RSVP'd to any events yet.",
                    action_href: Route::Home.path(),
                    action_label: "Explore Events",
                },
            ]
        };

        let page = DashboardTemplate {
            layout: LayoutView::new(&self.session, "Dashboard", toasts).await?,
            logged_in: user.is_some(),
            user_name: user.map(|u| u.name).unwrap_or_default(),
            error: state.error.unwrap_or_default(),
            loading_html: if state.loading {
                Loading::html()?
            } else {
                String::new()
            },
            sections,
        };

        Ok(page.render()?)
    }
}

/// Empty sections show a call to action instead of a list
fn section_list(events: &[Event], tz: Tz) -> AppResult<String> {
    if events.is_empty() {
        return Ok(String::new());
    }
    EventList::render_events(events, false, None, tz)
}
