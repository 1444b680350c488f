//! Token exchange against `POST /api-token-auth/`

use async_trait::async_trait;
use gradebook_core::Authenticator;
use gradebook_domain::constants::TOKEN_AUTH_PATH;
use gradebook_domain::{LoginRequest, RequestError, TokenResponse};
use reqwest::Method;
use tracing::{debug, instrument};

use crate::http::{RequestBody, Transport};

/// Exchanges username and password for an API token
#[derive(Clone)]
pub struct TokenAuthClient {
    transport: Transport,
}

impl TokenAuthClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl Authenticator for TokenAuthClient {
    #[instrument(skip_all, fields(username = %request.username))]
    async fn obtain_token(&self, request: &LoginRequest) -> Result<TokenResponse, RequestError> {
        let body = serde_json::to_value(request)
            .map_err(|err| RequestError::Decode(format!("Failed to serialize body: {err}")))?;

        let response = self
            .transport
            .request(Method::POST, TOKEN_AUTH_PATH, Some(RequestBody::Json(body)), None)
            .await?
            .error_for_status()
            .await?;

        debug!("token exchange accepted");
        response.json().await
    }
}
