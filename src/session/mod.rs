mod codec;
mod store;

pub use codec::{SessionClaims, SessionCodec};
pub use store::{CookieSessionStore, CookieUpdate, MemorySessionStore, SessionStore};

use crate::api::AuthApi;
use crate::error::AppResult;
use crate::models::{Credentials, SignupRequest, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// The authenticated identity and the backend token that proves it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Holder of the current user, handed to every page at construction.
///
/// Clones share the same state. Only `signup`, `login`, `logout` and
/// `restore` write to it.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<Option<Session>>>,
    auth: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Create an anonymous context
    pub fn new(auth: Arc<dyn AuthApi>, store: Arc<dyn SessionStore>) -> Self {
        Self::from_session(None, auth, store)
    }

    /// Create a context that already holds a session
    pub fn from_session(
        session: Option<Session>,
        auth: Arc<dyn AuthApi>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(session)),
            auth,
            store,
        }
    }

    /// Load the persisted session, if any. Failures leave the context anonymous.
    pub async fn restore(&self) -> bool {
        match self.store.load().await {
            Ok(Some(session)) => {
                info!("Restored session for {}", session.user.email);
                *self.state.write().await = Some(session);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Could not restore session: {}", e);
                false
            }
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_some()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.as_ref().map(|s| s.user.clone())
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.clone()
    }

    /// Create an account and become that user.
    ///
    /// On failure the error is returned as-is and the current state is kept.
    pub async fn signup(&self, email: &str, password: &str) -> AppResult<User> {
        let response = self
            .auth
            .signup(SignupRequest {
                name: None,
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        info!("Signed up as {}", response.user.email);
        self.establish(Session {
            user: response.user,
            token: response.token,
        })
        .await
    }

    /// Log in with existing credentials
    pub async fn login(&self, email: &str, password: &str) -> AppResult<User> {
        let response = self
            .auth
            .login(Credentials {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;

        info!("Logged in as {}", response.user.email);
        self.establish(Session {
            user: response.user,
            token: response.token,
        })
        .await
    }

    /// Forget the current user, in memory and in the store
    pub async fn logout(&self) {
        let previous = self.state.write().await.take();
        if let Some(session) = previous {
            info!("Logged out {}", session.user.email);
        }

        if let Err(e) = self.store.clear().await {
            warn!("Could not clear persisted session: {}", e);
        }
    }

    async fn establish(&self, session: Session) -> AppResult<User> {
        let user = session.user.clone();

        // The in-memory session is authoritative; persistence is best effort
        if let Err(e) = self.store.save(&session).await {
            warn!("Could not persist session: {}", e);
        }
        *self.state.write().await = Some(session);

        Ok(user)
    }
}
