use super::ApiClient;
use crate::error::AppResult;
use crate::models::{AuthResponse, Credentials, SignupRequest};
use async_trait::async_trait;

/// Remote authentication operations used by the session context
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse>;

    async fn login(&self, credentials: Credentials) -> AppResult<AuthResponse>;
}

/// `AuthApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    client: ApiClient,
}

impl HttpAuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthApi for HttpAuthService {
    async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        let request = self.client.post("auth/signup")?.json(&request);
        self.client.send_json(request).await
    }

    async fn login(&self, credentials: Credentials) -> AppResult<AuthResponse> {
        let request = self.client.post("auth/login")?.json(&credentials);
        self.client.send_json(request).await
    }
}
