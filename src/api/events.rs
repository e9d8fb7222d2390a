use super::ApiClient;
use crate::error::AppResult;
use crate::models::Event;
use async_trait::async_trait;
use tracing::info;

/// Remote event operations used by the pages
#[async_trait]
pub trait EventApi: Send + Sync {
    /// All events in the order the backend returns them
    async fn get_all_events(&self) -> AppResult<Vec<Event>>;

    /// A single event
    async fn get_event_by_id(&self, id: &str) -> AppResult<Event>;

    /// Add the authenticated user to the event's attendees.
    ///
    /// Nothing useful comes back; callers re-fetch the event to see the
    /// new attendee list.
    async fn rsvp_to_event(&self, id: &str, token: Option<&str>) -> AppResult<()>;
}

/// `EventApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpEventService {
    client: ApiClient,
}

impl HttpEventService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventApi for HttpEventService {
    async fn get_all_events(&self) -> AppResult<Vec<Event>> {
        let request = self.client.get("events")?;
        self.client.send_json(request).await
    }

    async fn get_event_by_id(&self, id: &str) -> AppResult<Event> {
        let request = self.client.get(&format!("events/{}", urlencoding::encode(id)))?;
        self.client.send_json(request).await
    }

    async fn rsvp_to_event(&self, id: &str, token: Option<&str>) -> AppResult<()> {
        let client = self.client.with_token(token.map(str::to_string));
        let request = client.post(&format!("events/{}/rsvp", urlencoding::encode(id)))?;
        client.send_empty(request).await?;
        info!("RSVP recorded for event {}", id);
        Ok(())
    }
}
