use super::Session;
use crate::error::{session_error, AppResult};
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Claims stored in the session cookie
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    pub name: String,
    pub email: String,
    /// Backend bearer token
    pub token: String,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
}

/// Signs and verifies the browser's session cookie
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime_minutes: i64,
}

impl SessionCodec {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime_minutes: 60 * 24, // 24 hours
        }
    }

    pub fn with_lifetime_minutes(mut self, minutes: i64) -> Self {
        self.lifetime_minutes = minutes;
        self
    }

    /// Encode a session into a signed token
    pub fn encode(&self, session: &Session) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.lifetime_minutes);

        let claims = SessionClaims {
            sub: session.user.id.clone(),
            name: session.user.name.clone(),
            email: session.user.email.clone(),
            token: session.token.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| session_error(&format!("Failed to sign session: {}", e)))
    }

    /// Verify a signed token and recover the session
    pub fn decode(&self, token: &str) -> AppResult<Session> {
        let claims = decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Session cookie rejected: {:?}", e);
                session_error("Invalid session cookie")
            })?;

        Ok(Session {
            user: User {
                id: claims.sub,
                name: claims.name,
                email: claims.email,
            },
            token: claims.token,
        })
    }
}
