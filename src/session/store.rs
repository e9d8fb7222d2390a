use super::{Session, SessionCodec};
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Where a session survives between page loads
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> AppResult<Option<Session>>;

    async fn save(&self, session: &Session) -> AppResult<()>;

    async fn clear(&self) -> AppResult<()>;
}

/// Change to make to the browser's session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CookieUpdate {
    Set(String),
    Clear,
}

/// Session carried in a signed browser cookie.
///
/// Built per request from the incoming cookie value. Writes are not sent
/// anywhere; they are collected as a `CookieUpdate` for the response.
pub struct CookieSessionStore {
    codec: Arc<SessionCodec>,
    incoming: Option<String>,
    pending: RwLock<Option<CookieUpdate>>,
}

impl CookieSessionStore {
    pub fn new(codec: Arc<SessionCodec>, incoming: Option<String>) -> Self {
        Self {
            codec,
            incoming,
            pending: RwLock::new(None),
        }
    }

    /// The cookie change produced by this request, if any
    pub async fn take_update(&self) -> Option<CookieUpdate> {
        self.pending.write().await.take()
    }
}

#[async_trait]
impl SessionStore for CookieSessionStore {
    async fn load(&self) -> AppResult<Option<Session>> {
        let Some(cookie) = self.incoming.as_deref() else {
            return Ok(None);
        };

        match self.codec.decode(cookie) {
            Ok(session) => Ok(Some(session)),
            Err(_) => {
                // Expired or forged; drop it so the browser stops sending it
                debug!("Discarding unusable session cookie");
                *self.pending.write().await = Some(CookieUpdate::Clear);
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        let value = self.codec.encode(session)?;
        *self.pending.write().await = Some(CookieUpdate::Set(value));
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.pending.write().await = Some(CookieUpdate::Clear);
        Ok(())
    }
}

/// Session kept only in memory
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> AppResult<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session() -> Session {
        Session {
            user: User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            token: "t".to_string(),
        }
    }

    #[tokio::test]
    async fn test_cookie_store_round_trip() {
        let codec = Arc::new(SessionCodec::new("secret"));

        let first = CookieSessionStore::new(codec.clone(), None);
        assert!(first.load().await.unwrap().is_none());
        first.save(&session()).await.unwrap();
        let Some(CookieUpdate::Set(value)) = first.take_update().await else {
            panic!("expected a cookie to be set");
        };

        let second = CookieSessionStore::new(codec, Some(value));
        assert_eq!(second.load().await.unwrap(), Some(session()));
        assert_eq!(second.take_update().await, None);
    }

    #[tokio::test]
    async fn test_cookie_store_discards_bad_cookie() {
        let store = CookieSessionStore::new(
            Arc::new(SessionCodec::new("secret")),
            Some("garbage".to_string()),
        );
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(store.take_update().await, Some(CookieUpdate::Clear));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemorySessionStore::default();
        store.save(&session()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session()));
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
