//! Sync controller: sign-in, sign-out and refresh orchestration

use std::sync::Arc;

use gradebook_domain::constants::{
    MSG_LOGIN_FAILED, MSG_LOGIN_MISSING_TOKEN, MSG_NETWORK_ERROR, MSG_SIGNED_IN, MSG_SIGNED_OUT,
};
use gradebook_domain::{
    Credential, LoginRequest, Notification, RequestError, Student, Subject, SyncConfig,
};
use tracing::{info, warn};

use super::ports::{Authenticator, NotificationSink, ResourceClient};
use super::resource::ResourceSync;
use super::validation::DraftValidation;
use crate::session::SessionManager;

/// Holds both collections and reloads them whenever the credential changes.
pub struct SyncController {
    session: Arc<SessionManager>,
    authenticator: Arc<dyn Authenticator>,
    notifier: Arc<dyn NotificationSink>,
    subjects: ResourceSync<Subject>,
    students: ResourceSync<Student>,
}

impl SyncController {
    pub fn new(
        session: Arc<SessionManager>,
        authenticator: Arc<dyn Authenticator>,
        subject_client: Arc<dyn ResourceClient<Subject>>,
        student_client: Arc<dyn ResourceClient<Student>>,
        notifier: Arc<dyn NotificationSink>,
        config: &SyncConfig,
    ) -> Self {
        let subjects = ResourceSync::new(subject_client, Arc::clone(&session), Arc::clone(&notifier))
            .with_discard_superseded(config.discard_superseded);
        let students = ResourceSync::new(student_client, Arc::clone(&session), Arc::clone(&notifier))
            .with_discard_superseded(config.discard_superseded);

        Self { session, authenticator, notifier, subjects, students }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn subjects(&self) -> &ResourceSync<Subject> {
        &self.subjects
    }

    pub fn students(&self) -> &ResourceSync<Student> {
        &self.students
    }

    /// Adopt the persisted credential, if any, then load both collections.
    pub async fn start(&self) {
        self.session.restore();
        self.refresh_all().await;
    }

    /// Load both collections concurrently.
    pub async fn refresh_all(&self) {
        tokio::join!(self.subjects.list(), self.students.list());
    }

    /// Exchange username and password for a token and start a session.
    ///
    /// Returns whether a session was established.
    pub async fn sign_in(&self, username: &str, password: &str) -> bool {
        let request = match LoginRequest::new(username, password).validate() {
            Ok(request) => request,
            Err(err) => {
                self.notifier.notify(Notification::error(err.to_string()));
                return false;
            }
        };

        let response = match self.authenticator.obtain_token(&request).await {
            Ok(response) => response,
            Err(err) => {
                warn!(username = %request.username, error = %err, "sign-in rejected");
                self.notifier.notify(Notification::error(login_failure_message(&err)));
                return false;
            }
        };

        let Some(credential) = response.token.and_then(Credential::parse) else {
            warn!(username = %request.username, "sign-in response carried no token");
            self.notifier.notify(Notification::error(MSG_LOGIN_MISSING_TOKEN));
            return false;
        };

        self.session.establish(credential);
        info!(username = %request.username, "signed in");
        self.notifier.notify(Notification::success(MSG_SIGNED_IN));
        self.refresh_all().await;
        true
    }

    /// End the session and reload both collections unauthenticated.
    pub async fn sign_out(&self) {
        self.session.clear();
        info!("signed out");
        self.notifier.notify(Notification::info(MSG_SIGNED_OUT));
        self.refresh_all().await;
    }
}

fn login_failure_message(err: &RequestError) -> String {
    if err.is_transport() {
        return MSG_NETWORK_ERROR.to_string();
    }
    err.non_field_error().unwrap_or_else(|| MSG_LOGIN_FAILED.to_string())
}
