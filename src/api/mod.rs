mod auth;
mod events;

pub use auth::{AuthApi, HttpAuthService};
pub use events::{EventApi, HttpEventService};

use crate::config::Config;
use crate::error::{server_error, AppResult, Error};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Thin JSON client for the backend API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str) -> AppResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client from the application config
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        Self::with_client(builder.build()?, &config.api_base_url)
    }

    fn with_client(client: Client, base_url: &str) -> AppResult<Self> {
        // Url::join drops the last segment unless the base ends in a slash
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            client,
            base_url: Url::parse(&normalized)?,
            token: None,
        })
    }

    /// Copy of this client that sends the given bearer token
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Resolve a path relative to the base URL
    pub fn url(&self, path: &str) -> AppResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub fn get(&self, path: &str) -> AppResult<RequestBuilder> {
        Ok(self.authorize(self.client.get(self.url(path)?)))
    }

    pub fn post(&self, path: &str) -> AppResult<RequestBuilder> {
        Ok(self.authorize(self.client.post(self.url(path)?)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send a request and decode a JSON body
    pub async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = Self::send(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))
    }

    /// Send a request and discard the body
    pub async fn send_empty(&self, request: RequestBuilder) -> AppResult<()> {
        Self::send(request).await.map(|_| ())
    }

    async fn send(request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} {}", status.as_u16(), response.url());

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(server_error(status.as_u16(), &error_message(&body)));
        }

        Ok(response)
    }
}

/// Pull `message` out of a JSON error body, falling back to the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_keeps_base_path() {
        let client = ApiClient::new("http://localhost:5000/api").unwrap();
        assert_eq!(
            client.url("/events/e1").unwrap().as_str(),
            "http://localhost:5000/api/events/e1"
        );
        assert_eq!(
            client.url("events").unwrap().as_str(),
            "http://localhost:5000/api/events"
        );
    }

    #[test]
    fn test_with_token() {
        let client = ApiClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(client.token(), None);
        let authed = client.with_token(Some("abc".to_string()));
        assert_eq!(authed.token(), Some("abc"));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"message":"Event not found"}"#), "Event not found");
        assert_eq!(error_message("Bad gateway\n"), "Bad gateway");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(ApiClient::new("not a url"), Err(Error::Config(_))));
    }
}
