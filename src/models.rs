use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organizer reference embedded in an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Organizer {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Event as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "organizerId", alias = "organizer")]
    pub organizer: Organizer,
    /// User ids of everyone who RSVP'd
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl Event {
    /// Whether the given user created this event
    pub fn is_organized_by(&self, user_id: &str) -> bool {
        self.organizer.id == user_id
    }

    /// Whether the given user is in the attendee list
    pub fn is_attended_by(&self, user_id: &str) -> bool {
        self.attendees.iter().any(|a| a == user_id)
    }

    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }

    /// Description text, with blank descriptions treated as missing
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Login request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Response of the signup and login endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
