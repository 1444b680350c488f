//! Mock port implementations for testing

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use gradebook_core::{Authenticator, CredentialStore, ResourceClient};
use gradebook_domain::constants::STORAGE_TOKEN_KEY;
use gradebook_domain::{
    Credential, LoginRequest, RequestError, Resource, ResourceId, StorageError, TokenResponse,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

pub fn rejected(status: u16, body: &str) -> RequestError {
    RequestError::Rejected { status, body: body.to_string() }
}

pub fn transport() -> RequestError {
    RequestError::Transport("connection refused".to_string())
}

/// Scripted `ResourceClient`.
///
/// Each operation pops its next scripted result; an empty script answers
/// with an empty list, an echo-less 500 for create, and success for delete.
pub struct MockResourceClient<R: Resource> {
    lists: Mutex<VecDeque<Result<Vec<R>, RequestError>>>,
    creates: Mutex<VecDeque<Result<R, RequestError>>>,
    deletes: Mutex<VecDeque<Result<(), RequestError>>>,
    list_gate: Mutex<Option<Arc<Notify>>>,
    pub calls: Mutex<Vec<Call<R>>>,
}

#[derive(Debug, Clone)]
pub enum Call<R: Resource> {
    List { credential: Option<String> },
    Create { draft: R::Draft, credential: Option<String> },
    Delete { id: ResourceId, credential: Option<String> },
}

impl<R: Resource> Default for MockResourceClient<R> {
    fn default() -> Self {
        Self {
            lists: Mutex::new(VecDeque::new()),
            creates: Mutex::new(VecDeque::new()),
            deletes: Mutex::new(VecDeque::new()),
            list_gate: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl<R: Resource> MockResourceClient<R> {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_list(&self, result: Result<Vec<R>, RequestError>) {
        self.lists.lock().push_back(result);
    }

    pub fn push_create(&self, result: Result<R, RequestError>) {
        self.creates.lock().push_back(result);
    }

    pub fn push_delete(&self, result: Result<(), RequestError>) {
        self.deletes.lock().push_back(result);
    }

    /// Make the next list calls wait until the returned handle is notified.
    pub fn gate_lists(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.list_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::List { credential } => Some(credential.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn deleted_ids(&self) -> Vec<ResourceId> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Delete { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn created_drafts(&self) -> Vec<R::Draft> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                Call::Create { draft, .. } => Some(draft.clone()),
                _ => None,
            })
            .collect()
    }
}

fn raw(credential: Option<&Credential>) -> Option<String> {
    credential.map(|c| c.expose().to_string())
}

#[async_trait]
impl<R: Resource> ResourceClient<R> for MockResourceClient<R> {
    async fn list(&self, credential: Option<&Credential>) -> Result<Vec<R>, RequestError> {
        self.calls.lock().push(Call::List { credential: raw(credential) });
        let result = self.lists.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()));
        let gate = self.list_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        result
    }

    async fn create(
        &self,
        draft: &R::Draft,
        credential: Option<&Credential>,
    ) -> Result<R, RequestError> {
        self.calls.lock().push(Call::Create { draft: draft.clone(), credential: raw(credential) });
        self.creates.lock().pop_front().unwrap_or_else(|| Err(rejected(500, "")))
    }

    async fn delete(
        &self,
        id: &ResourceId,
        credential: Option<&Credential>,
    ) -> Result<(), RequestError> {
        self.calls.lock().push(Call::Delete { id: id.clone(), credential: raw(credential) });
        self.deletes.lock().pop_front().unwrap_or(Ok(()))
    }
}

/// Scripted token exchange
#[derive(Default)]
pub struct MockAuthenticator {
    responses: Mutex<VecDeque<Result<TokenResponse, RequestError>>>,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl MockAuthenticator {
    pub fn issuing(token: &str) -> Arc<Self> {
        let auth = Self::default();
        auth.push(Ok(TokenResponse { token: Some(token.to_string()) }));
        Arc::new(auth)
    }

    pub fn push(&self, response: Result<TokenResponse, RequestError>) {
        self.responses.lock().push_back(response);
    }
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn obtain_token(&self, request: &LoginRequest) -> Result<TokenResponse, RequestError> {
        self.requests.lock().push((request.username.clone(), request.password.clone()));
        self.responses.lock().pop_front().unwrap_or_else(|| Err(rejected(400, "{}")))
    }
}

/// In-memory credential store with switchable faults
#[derive(Default)]
pub struct MockCredentialStore {
    pub entries: Mutex<HashMap<String, String>>,
    pub fail_writes: Mutex<bool>,
}

impl MockCredentialStore {
    pub fn with_token(token: &str) -> Arc<Self> {
        let store = Self::default();
        store.entries.lock().insert(STORAGE_TOKEN_KEY.to_string(), token.to_string());
        Arc::new(store)
    }

    pub fn token(&self) -> Option<String> {
        self.entries.lock().get(STORAGE_TOKEN_KEY).cloned()
    }
}

impl CredentialStore for MockCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.fail_writes.lock() {
            return Err(StorageError::Unavailable("disk full".to_string()));
        }
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
