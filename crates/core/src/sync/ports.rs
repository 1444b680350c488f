//! Port interfaces for the remote service and the presentation layer

use async_trait::async_trait;
use gradebook_domain::{
    Credential, LoginRequest, Notification, RequestError, Resource, ResourceId, TokenResponse,
};

/// Typed CRUD surface for one resource kind. Each call is exactly one
/// request; a non-successful status comes back as
/// [`RequestError::Rejected`].
#[async_trait]
pub trait ResourceClient<R: Resource>: Send + Sync {
    async fn list(&self, credential: Option<&Credential>) -> Result<Vec<R>, RequestError>;

    async fn create(
        &self,
        draft: &R::Draft,
        credential: Option<&Credential>,
    ) -> Result<R, RequestError>;

    async fn delete(
        &self,
        id: &ResourceId,
        credential: Option<&Credential>,
    ) -> Result<(), RequestError>;
}

/// Exchanges username and password for an API token
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn obtain_token(&self, request: &LoginRequest) -> Result<TokenResponse, RequestError>;
}

/// Receives notifications for the presentation layer
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}
