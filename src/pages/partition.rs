//! Splitting a user's events into the two dashboard sections.
//!
//! An organizer who also appears in their own attendee list only counts as
//! organizing, so the two sections never share an event.

use crate::models::Event;

/// Events the user created, in fetch order
pub fn organizing<'a>(events: &'a [Event], user_id: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| e.is_organized_by(user_id)).collect()
}

/// Events the user RSVP'd to but does not organize, in fetch order
pub fn attending<'a>(events: &'a [Event], user_id: &str) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| e.is_attended_by(user_id) && !e.is_organized_by(user_id))
        .collect()
}

/// Whether the event belongs on the user's dashboard at all
pub fn involves(event: &Event, user_id: &str) -> bool {
    event.is_organized_by(user_id) || event.is_attended_by(user_id)
}
