use super::{LoadState, MountScope, Route};
use crate::api::EventApi;
use crate::components::{LayoutView, Loading, Notification};
use crate::error::AppResult;
use crate::models::Event;
use crate::session::SessionContext;
use crate::utils::time::format_event_datetime;
use askama::Template;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

pub const LOAD_ERROR: &str = "Failed to load event details. Please try again later.";
pub const LOGIN_TO_RSVP: &str = "Please log in to RSVP";
pub const RSVP_SUCCESS: &str = "You are now attending this event!";
pub const RSVP_FAILED: &str = "Failed to RSVP. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub struct EventDetailState {
    pub event: LoadState<Event>,
    pub rsvp_loading: bool,
    /// Toasts raised since the last `take_notifications`
    pub notifications: Vec<Notification>,
}

impl Default for EventDetailState {
    fn default() -> Self {
        Self {
            event: LoadState::Loading,
            rsvp_loading: false,
            notifications: Vec::new(),
        }
    }
}

/// What the RSVP button looks like for the current viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsvpControl {
    pub label: &'static str,
    pub disabled: bool,
    pub attending: bool,
    pub pending: bool,
}

/// How an RSVP attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsvpOutcome {
    /// Recorded and the event re-fetched
    Confirmed,
    /// Viewer is anonymous; nothing was sent
    LoginRequired,
    /// Button was disabled: already attending, organizer, in flight, or no event
    Ignored,
    /// Backend call failed; the event is unchanged
    Failed,
    /// Page was unmounted before the call finished
    Dropped,
}

#[derive(Template)]
#[template(path = "event_detail.html")]
struct EventDetailTemplate {
    layout: LayoutView,
    loading_html: String,
    error: String,
    name: String,
    organizer: String,
    description: String,
    attendee_count: usize,
    when: String,
    location: String,
    rsvp_action: String,
    control: Option<RsvpControl>,
    anonymous: bool,
}

/// One event with its RSVP flow
pub struct EventDetailPage {
    id: String,
    events: Arc<dyn EventApi>,
    session: SessionContext,
    scope: MountScope,
    state: RwLock<EventDetailState>,
}

impl EventDetailPage {
    pub fn new(id: impl Into<String>, events: Arc<dyn EventApi>, session: SessionContext) -> Self {
        Self {
            id: id.into(),
            events,
            session,
            scope: MountScope::new(),
            state: RwLock::new(EventDetailState::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetch the event once
    pub async fn mount(&self) {
        let Some(result) = self.scope.run(self.events.get_event_by_id(&self.id)).await else {
            return;
        };

        let mut state = self.state.write().await;
        state.event = match result {
            Ok(event) => LoadState::Ready(event),
            Err(e) => {
                error!("Failed to load event {}: {}", self.id, e);
                LoadState::Failed(LOAD_ERROR.to_string())
            }
        };
    }

    pub fn unmount(&self) {
        self.scope.unmount();
    }

    pub async fn state(&self) -> EventDetailState {
        self.state.read().await.clone()
    }

    /// Drain pending toasts
    pub async fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut self.state.write().await.notifications)
    }

    pub async fn has_rsvp(&self) -> bool {
        let Some(user) = self.session.current_user().await else {
            return false;
        };
        let state = self.state.read().await;
        state
            .event
            .ready()
            .is_some_and(|event| event.is_attended_by(&user.id))
    }

    pub async fn is_organizer(&self) -> bool {
        let Some(user) = self.session.current_user().await else {
            return false;
        };
        let state = self.state.read().await;
        state
            .event
            .ready()
            .is_some_and(|event| event.is_organized_by(&user.id))
    }

    /// The RSVP button, or `None` when it is not shown at all
    pub async fn rsvp_control(&self) -> Option<RsvpControl> {
        let user = self.session.current_user().await;
        let state = self.state.read().await;
        let event = state.event.ready()?;

        if user.as_ref().is_some_and(|u| event.is_organized_by(&u.id)) {
            return None;
        }

        let attending = user.as_ref().is_some_and(|u| event.is_attended_by(&u.id));
        let label = if state.rsvp_loading {
            "Processing..."
        } else if attending {
            "You are attending"
        } else {
            "RSVP to this event"
        };

        Some(RsvpControl {
            label,
            disabled: attending || state.rsvp_loading || user.is_none(),
            attending,
            pending: state.rsvp_loading,
        })
    }

    /// RSVP the current user, then re-fetch the event to show the new
    /// attendee list.
    pub async fn rsvp(&self) -> RsvpOutcome {
        let Some(user) = self.session.current_user().await else {
            self.notify(Notification::error(LOGIN_TO_RSVP)).await;
            return RsvpOutcome::LoginRequired;
        };

        {
            let mut state = self.state.write().await;
            let enabled = match state.event.ready() {
                Some(event) => !event.is_attended_by(&user.id) && !event.is_organized_by(&user.id),
                None => false,
            };
            if !enabled || state.rsvp_loading {
                debug!("Ignoring RSVP for event {}", self.id);
                return RsvpOutcome::Ignored;
            }
            state.rsvp_loading = true;
        }

        let token = self.session.token().await;
        let result = self.scope.run(self.rsvp_and_reload(token.as_deref())).await;

        let Some(result) = result else {
            return RsvpOutcome::Dropped;
        };

        let mut state = self.state.write().await;
        state.rsvp_loading = false;
        match result {
            Ok(event) => {
                info!("{} is now attending event {}", user.id, self.id);
                state.event = LoadState::Ready(event);
                state.notifications.push(Notification::success(RSVP_SUCCESS));
                RsvpOutcome::Confirmed
            }
            Err(e) => {
                error!("Failed to RSVP to event {}: {}", self.id, e);
                state.notifications.push(Notification::error(RSVP_FAILED));
                RsvpOutcome::Failed
            }
        }
    }

    async fn rsvp_and_reload(&self, token: Option<&str>) -> AppResult<Event> {
        self.events.rsvp_to_event(&self.id, token).await?;
        self.events.get_event_by_id(&self.id).await
    }

    async fn notify(&self, notification: Notification) {
        self.state.write().await.notifications.push(notification);
    }

    /// Render the page, consuming any pending toasts
    pub async fn render(&self, tz: Tz, carried: &[Notification]) -> AppResult<String> {
        let control = self.rsvp_control().await;
        let anonymous = !self.session.is_authenticated().await;
        let mut notifications = carried.to_vec();
        notifications.extend(self.take_notifications().await);
        let state = self.state().await;

        let mut page = EventDetailTemplate {
            layout: LayoutView::new(&self.session, "Event", &notifications).await?,
            loading_html: String::new(),
            error: String::new(),
            name: String::new(),
            organizer: String::new(),
            description: String::new(),
            attendee_count: 0,
            when: String::new(),
            location: String::new(),
            rsvp_action: format!("{}/rsvp", Route::EventDetail(self.id.clone()).path()),
            control,
            anonymous,
        };

        match &state.event {
            LoadState::Loading => page.loading_html = Loading::html()?,
            LoadState::Failed(message) => page.error = message.clone(),
            LoadState::Ready(event) => {
                page.layout.title = event.name.clone();
                page.name = event.name.clone();
                page.organizer = event.organizer.name.clone();
                page.description = event
                    .description_text()
                    .unwrap_or("No description provided.")
                    .to_string();
                page.attendee_count = event.attendee_count();
                page.when = format_event_datetime(&event.date, tz);
                page.location = event.location.clone();
            }
        }

        Ok(page.render()?)
    }
}
