//! Resource CRUD over the REST API

use std::marker::PhantomData;

use async_trait::async_trait;
use gradebook_core::ResourceClient;
use gradebook_domain::{
    Credential, RequestError, Resource, ResourceId, ResourceKind, Student, Subject,
};
use reqwest::{Method, StatusCode};
use tracing::{info, instrument};
use url::Url;

use crate::http::{RequestBody, Transport};

/// One resource kind's list/create/delete endpoints. Paths come from
/// `R::KIND`.
pub struct RestResourceClient<R> {
    transport: Transport,
    _resource: PhantomData<fn() -> R>,
}

pub type SubjectClient = RestResourceClient<Subject>;
pub type StudentClient = RestResourceClient<Student>;

impl<R: Resource> RestResourceClient<R> {
    pub fn new(transport: Transport) -> Self {
        Self { transport, _resource: PhantomData }
    }
}

impl<R> Clone for RestResourceClient<R> {
    fn clone(&self) -> Self {
        Self { transport: self.transport.clone(), _resource: PhantomData }
    }
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for RestResourceClient<R> {
    #[instrument(skip_all, fields(kind = %R::KIND))]
    async fn list(&self, credential: Option<&Credential>) -> Result<Vec<R>, RequestError> {
        self.transport
            .request(Method::GET, R::KIND.collection_path(), None, credential)
            .await?
            .error_for_status()
            .await?
            .json()
            .await
    }

    #[instrument(skip_all, fields(kind = %R::KIND))]
    async fn create(
        &self,
        draft: &R::Draft,
        credential: Option<&Credential>,
    ) -> Result<R, RequestError> {
        let body = serde_json::to_value(draft)
            .map_err(|err| RequestError::Decode(format!("Failed to serialize body: {err}")))?;

        self.transport
            .request(Method::POST, R::KIND.collection_path(), Some(RequestBody::Json(body)), credential)
            .await?
            .error_for_status()
            .await?
            .json()
            .await
    }

    #[instrument(skip_all, fields(kind = %R::KIND, id = %id))]
    async fn delete(
        &self,
        id: &ResourceId,
        credential: Option<&Credential>,
    ) -> Result<(), RequestError> {
        let path = item_path(R::KIND, id)?;
        let response = self.transport.request(Method::DELETE, &path, None, credential).await?;

        if response.status() == StatusCode::NO_CONTENT {
            info!("resource deleted");
            return Ok(());
        }
        response.error_for_status().await?;
        info!("resource deleted");
        Ok(())
    }
}

/// Item endpoint with `id` as one percent-encoded segment, e.g.
/// `/api/subjects/7/`
fn item_path(kind: ResourceKind, id: &ResourceId) -> Result<String, RequestError> {
    let key = id.as_key();
    // URL normalisation would resolve these against the collection path
    if matches!(key.as_ref(), "" | "." | "..") {
        return Err(RequestError::InvalidId(key.into_owned()));
    }

    let invalid = || RequestError::InvalidId(key.to_string());
    let mut url = Url::parse(&format!("http://localhost{}", kind.collection_path()))
        .map_err(|_| invalid())?;
    url.path_segments_mut().map_err(|()| invalid())?.pop_if_empty().push(&key).push("");
    Ok(url.path().to_string())
}
