#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use eventsphere::api::{AuthApi, EventApi};
use eventsphere::error::{server_error, AppResult};
use eventsphere::models::{AuthResponse, Credentials, Event, Organizer, SignupRequest, User};
use eventsphere::session::{MemorySessionStore, Session, SessionContext};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Build an event with the given organizer and attendees
pub fn event(id: &str, organizer: &str, attendees: &[&str]) -> Event {
    Event {
        id: id.to_string(),
        name: format!("Event {}", id),
        description: Some(format!("All about event {}", id)),
        date: Utc.with_ymd_and_hms(2025, 3, 14, 17, 30, 0).unwrap(),
        location: "Helsinki".to_string(),
        organizer: Organizer {
            id: organizer.to_string(),
            name: format!("User {}", organizer),
        },
        attendees: attendees.iter().map(|a| a.to_string()).collect(),
    }
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("User {}", id),
        email: format!("{}@example.com", id),
    }
}

/// Backend token the mocks hand out for a user
pub fn token_for(user_id: &str) -> String {
    format!("token-{}", user_id)
}

/// In-memory stand-in for the event backend
#[derive(Default)]
pub struct MockEventApi {
    events: Mutex<Vec<Event>>,
    pub list_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub rsvp_calls: AtomicUsize,
    pub fail_reads: AtomicBool,
    pub fail_rsvp: AtomicBool,
    /// When set, RSVP waits here until released
    pub rsvp_gate: Option<Arc<Notify>>,
}

impl MockEventApi {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
            ..Default::default()
        }
    }

    pub fn with_rsvp_gate(mut self, gate: Arc<Notify>) -> Self {
        self.rsvp_gate = Some(gate);
        self
    }

    pub fn failing_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_rsvp(self) -> Self {
        self.fail_rsvp.store(true, Ordering::SeqCst);
        self
    }

    pub fn rsvp_count(&self) -> usize {
        self.rsvp_calls.load(Ordering::SeqCst)
    }

    pub fn event(&self, id: &str) -> Option<Event> {
        self.events.lock().unwrap().iter().find(|e| e.id == id).cloned()
    }
}

#[async_trait]
impl EventApi for MockEventApi {
    async fn get_all_events(&self) -> AppResult<Vec<Event>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(server_error(500, "database unavailable"));
        }
        Ok(self.events.lock().unwrap().clone())
    }

    async fn get_event_by_id(&self, id: &str) -> AppResult<Event> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(server_error(500, "database unavailable"));
        }
        self.event(id).ok_or_else(|| server_error(404, "Event not found"))
    }

    async fn rsvp_to_event(&self, id: &str, token: Option<&str>) -> AppResult<()> {
        self.rsvp_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.rsvp_gate {
            gate.notified().await;
        }
        if self.fail_rsvp.load(Ordering::SeqCst) {
            return Err(server_error(500, "could not save"));
        }

        let user_id = token
            .and_then(|t| t.strip_prefix("token-"))
            .ok_or_else(|| server_error(401, "Unauthorized"))?
            .to_string();

        let mut events = self.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| server_error(404, "Event not found"))?;
        if !event.attendees.contains(&user_id) {
            event.attendees.push(user_id);
        }
        Ok(())
    }
}

/// Auth backend that accepts any password of "secret1" and knows one user per email
#[derive(Default)]
pub struct MockAuthApi {
    pub calls: AtomicUsize,
}

impl MockAuthApi {
    fn respond(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if password != "secret1" {
            return Err(server_error(401, "Invalid credentials"));
        }
        let id = email.split('@').next().unwrap_or_default();
        Ok(AuthResponse {
            token: token_for(id),
            user: user(id),
        })
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        self.respond(&request.email, &request.password)
    }

    async fn login(&self, credentials: Credentials) -> AppResult<AuthResponse> {
        self.respond(&credentials.email, &credentials.password)
    }
}

/// Session context for an anonymous viewer
pub fn anonymous() -> SessionContext {
    SessionContext::new(
        Arc::new(MockAuthApi::default()),
        Arc::new(MemorySessionStore::default()),
    )
}

/// Session context already logged in as the given user
pub fn logged_in(user_id: &str) -> SessionContext {
    SessionContext::from_session(
        Some(Session {
            user: user(user_id),
            token: token_for(user_id),
        }),
        Arc::new(MockAuthApi::default()),
        Arc::new(MemorySessionStore::default()),
    )
}
