use super::Loading;
use crate::error::AppResult;
use crate::models::Event;
use crate::pages::Route;
use crate::utils::time::format_event_short;
use askama::Template;
use chrono_tz::Tz;

/// One event as a card in a list
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub name: String,
    /// Already URL-safe, rendered unescaped
    pub href: String,
    pub date: String,
    pub location: String,
    pub attendees: usize,
    pub organizer: String,
}

impl EventCard {
    pub fn new(event: &Event, tz: Tz) -> Self {
        Self {
            name: event.name.clone(),
            href: Route::EventDetail(event.id.clone()).path(),
            date: format_event_short(&event.date, tz),
            location: event.location.clone(),
            attendees: event.attendee_count(),
            organizer: event.organizer.name.clone(),
        }
    }
}

/// List of events with loading, error and empty states
#[derive(Template)]
#[template(path = "components/event_list.html")]
pub struct EventList {
    loading_html: String,
    error: String,
    cards: Vec<EventCard>,
}

impl EventList {
    pub fn render_events(
        events: &[Event],
        loading: bool,
        error: Option<&str>,
        tz: Tz,
    ) -> AppResult<String> {
        let loading_html = if loading { Loading::html()? } else { String::new() };

        let list = EventList {
            loading_html,
            error: error.unwrap_or_default().to_string(),
            cards: events.iter().map(|e| EventCard::new(e, tz)).collect(),
        };

        Ok(list.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Organizer;
    use chrono::{TimeZone, Utc};

    fn event(id: &str, name: &str) -> Event {
        Event {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            date: Utc.with_ymd_and_hms(2025, 5, 2, 18, 0, 0).unwrap(),
            location: "Oulu".to_string(),
            organizer: Organizer {
                id: "u1".to_string(),
                name: "Ada".to_string(),
            },
            attendees: vec!["u2".to_string()],
        }
    }

    #[test]
    fn test_cards_in_fetch_order() {
        let html = EventList::render_events(
            &[event("e1", "First"), event("e2", "Second")],
            false,
            None,
            chrono_tz::UTC,
        )
        .unwrap();

        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        assert!(first < second);
        assert!(html.contains("href=\"/events/e1\""));
        assert!(html.contains("May 2, 2025, 6:00 PM"));
    }

    #[test]
    fn test_states() {
        let loading = EventList::render_events(&[], true, None, chrono_tz::UTC).unwrap();
        assert!(loading.contains("Loading..."));

        let failed =
            EventList::render_events(&[], false, Some("Failed to load events."), chrono_tz::UTC)
                .unwrap();
        assert!(failed.contains("Failed to load events."));
        assert!(!failed.contains("No events found."));

        let empty = EventList::render_events(&[], false, None, chrono_tz::UTC).unwrap();
        assert!(empty.contains("No events found."));
    }
}
