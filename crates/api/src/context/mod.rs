//! Application context - dependency injection container

use std::sync::Arc;

use gradebook_core::{
    Authenticator, CredentialStore, NotificationQueue, ResourceClient, SessionManager,
    SyncController,
};
use gradebook_domain::{Config, Result, Student, Subject};
use gradebook_infra::{build_credential_store, StudentClient, SubjectClient, TokenAuthClient, Transport};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionManager>,
    pub notifications: Arc<NotificationQueue>,
    pub controller: Arc<SyncController>,
}

impl AppContext {
    /// Build the context from the configuration found by
    /// [`gradebook_infra::config::load`].
    pub fn new() -> Result<Self> {
        let config = gradebook_infra::config::load()?;
        Self::new_with_config(config)
    }

    /// Build the context with the credential store selected by
    /// `config.storage`.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let store = build_credential_store(&config.storage);
        Self::new_with_store(config, store)
    }

    /// Build the context around an explicit credential store.
    pub fn new_with_store(config: Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let transport = Transport::from_config(&config.api)?;

        let subjects: Arc<dyn ResourceClient<Subject>> =
            Arc::new(SubjectClient::new(transport.clone()));
        let students: Arc<dyn ResourceClient<Student>> =
            Arc::new(StudentClient::new(transport.clone()));
        let authenticator: Arc<dyn Authenticator> = Arc::new(TokenAuthClient::new(transport));

        let session = Arc::new(SessionManager::new(store));
        let notifications = Arc::new(NotificationQueue::new());
        let controller = Arc::new(SyncController::new(
            Arc::clone(&session),
            authenticator,
            subjects,
            students,
            notifications.clone(),
            &config.sync,
        ));

        info!(
            api_base = %config.api.base_url,
            storage = %config.storage.backend,
            "Application context initialized"
        );

        Ok(Self { config, session, notifications, controller })
    }
}
