//! Per-kind collection synchronizer

use std::sync::Arc;

use gradebook_domain::constants::{MSG_NETWORK_ERROR, MSG_UNAUTHORIZED, MSG_VALIDATION_FALLBACK};
use gradebook_domain::{Credential, Notification, RequestError, Resource, ResourceId};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::deletion::DeletionFlow;
use super::messages::{messages_for, KindMessages};
use super::ports::{NotificationSink, ResourceClient};
use super::ticket::{Operation, RequestTicket};
use super::validation::DraftValidation;
use crate::session::SessionManager;

/// Local cache of one resource collection plus its deletion flow.
///
/// The collection lock is only taken for the single replace, prepend or
/// filter a response performs, never across a request.
pub struct ResourceSync<R: Resource> {
    client: Arc<dyn ResourceClient<R>>,
    session: Arc<SessionManager>,
    notifier: Arc<dyn NotificationSink>,
    items: Mutex<Vec<R>>,
    deletion: Mutex<DeletionFlow>,
    discard_superseded: bool,
}

impl<R> ResourceSync<R>
where
    R: Resource,
    R::Draft: DraftValidation,
{
    pub fn new(
        client: Arc<dyn ResourceClient<R>>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            client,
            session,
            notifier,
            items: Mutex::new(Vec::new()),
            deletion: Mutex::new(DeletionFlow::new()),
            discard_superseded: true,
        }
    }

    /// Whether responses from a replaced session are dropped (default on)
    pub fn with_discard_superseded(mut self, enabled: bool) -> Self {
        self.discard_superseded = enabled;
        self
    }

    /// Snapshot of the collection, newest first
    pub fn items(&self) -> Vec<R> {
        self.items.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.items.lock().iter().any(|item| item.id() == id)
    }

    /// Reload the whole collection from the service.
    ///
    /// A 401 empties the collection without a notification; any other
    /// failure keeps the current contents and reports once.
    pub async fn list(&self) {
        let (ticket, credential) = self.issue(Operation::List);
        let result = self.client.list(credential.as_ref()).await;
        if self.is_stale(&ticket) {
            return;
        }

        match result {
            Ok(records) => {
                let fetched = records.len();
                let visible: Vec<R> = records.into_iter().filter(R::is_visible).collect();
                debug!(kind = %R::KIND, fetched, kept = visible.len(), "collection loaded");
                *self.items.lock() = visible;
            }
            Err(err) if err.is_unauthorized() => {
                debug!(kind = %R::KIND, "collection load unauthorized; clearing");
                self.items.lock().clear();
            }
            Err(err) => {
                warn!(kind = %R::KIND, error = %err, "collection load failed");
                let message = if err.is_transport() {
                    MSG_NETWORK_ERROR.to_string()
                } else {
                    format!("Could not load {} ({})", self.messages().collection, err.detail())
                };
                self.notifier.notify(Notification::error(message));
            }
        }
    }

    /// Validate and submit a draft.
    ///
    /// Returns the record the service created, which is prepended to the
    /// collection unless it is hidden (staff or admin students).
    pub async fn create(&self, draft: R::Draft) -> Option<R> {
        let draft = match draft.validate() {
            Ok(draft) => draft,
            Err(err) => {
                self.notifier.notify(Notification::error(err.to_string()));
                return None;
            }
        };

        let (ticket, credential) = self.issue(Operation::Create);
        let result = self.client.create(&draft, credential.as_ref()).await;
        if self.is_stale(&ticket) {
            return None;
        }

        match result {
            Ok(record) => {
                if record.is_visible() {
                    self.items.lock().insert(0, record.clone());
                } else {
                    debug!(kind = %R::KIND, id = %record.id(), "created record hidden from view");
                }
                info!(kind = %R::KIND, id = %record.id(), "record created");
                self.notifier.notify(Notification::success(self.messages().created));
                Some(record)
            }
            Err(err) => {
                warn!(kind = %R::KIND, error = %err, "create failed");
                self.notifier.notify(Notification::error(self.create_failure_message(&err)));
                None
            }
        }
    }

    /// First phase of a deletion; no request is made.
    pub fn stage_delete(&self, id: impl Into<ResourceId>) {
        self.deletion.lock().stage(id.into());
    }

    pub fn cancel_delete(&self) {
        self.deletion.lock().cancel();
    }

    pub fn staged_delete(&self) -> Option<ResourceId> {
        self.deletion.lock().staged().cloned()
    }

    /// Second phase: delete the staged id.
    ///
    /// Nothing staged means nothing happens. The staged id is cleared once
    /// the request resolves, whatever the outcome. Returns whether the
    /// service confirmed the deletion.
    pub async fn confirm_delete(&self) -> bool {
        let Some(id) = self.staged_delete() else {
            debug!(kind = %R::KIND, "confirm with nothing staged");
            return false;
        };

        let (ticket, credential) = self.issue(Operation::Delete);
        let result = self.client.delete(&id, credential.as_ref()).await;
        self.deletion.lock().cancel();
        if self.is_stale(&ticket) {
            return false;
        }

        match result {
            Ok(()) => {
                self.items.lock().retain(|item| item.id() != &id);
                info!(kind = %R::KIND, id = %id, "record deleted");
                self.notifier.notify(Notification::info(self.messages().deleted));
                true
            }
            Err(err) => {
                warn!(kind = %R::KIND, id = %id, error = %err, "delete failed");
                let message = if err.is_unauthorized() {
                    MSG_UNAUTHORIZED.to_string()
                } else if err.is_transport() {
                    MSG_NETWORK_ERROR.to_string()
                } else {
                    format!("Delete failed: {}", err.detail())
                };
                self.notifier.notify(Notification::error(message));
                false
            }
        }
    }

    fn issue(&self, operation: Operation) -> (RequestTicket, Option<Credential>) {
        let snapshot = self.session.snapshot();
        let ticket = RequestTicket::new(R::KIND, operation, snapshot.generation);
        debug!(
            kind = %ticket.kind,
            operation = %ticket.operation,
            generation = ticket.generation,
            authenticated = snapshot.credential.is_some(),
            "issuing request"
        );
        (ticket, snapshot.credential)
    }

    fn is_stale(&self, ticket: &RequestTicket) -> bool {
        if !self.discard_superseded {
            return false;
        }
        let current = self.session.generation();
        if ticket.is_superseded_by(current) {
            warn!(
                kind = %ticket.kind,
                operation = %ticket.operation,
                issued = ticket.generation,
                current,
                "discarding response from superseded session"
            );
            return true;
        }
        false
    }

    fn create_failure_message(&self, err: &RequestError) -> String {
        if err.is_unauthorized() {
            return MSG_UNAUTHORIZED.to_string();
        }
        if err.is_bad_request() {
            return match err.field_errors() {
                Some(fields) => format!("Error: {fields}"),
                None => MSG_VALIDATION_FALLBACK.to_string(),
            };
        }
        if err.is_transport() {
            return MSG_NETWORK_ERROR.to_string();
        }
        format!("{}: {}", self.messages().create_failed, err.detail())
    }

    fn messages(&self) -> KindMessages {
        messages_for(R::KIND)
    }
}
