//! Behaviour of the sync controller against scripted ports

mod support;

use std::sync::Arc;

use gradebook_core::{NotificationQueue, SessionManager, SyncController};
use gradebook_domain::{
    Credential, NewStudent, NewSubject, Notification, ResourceId, Severity, Student, Subject,
    SyncConfig, TokenResponse,
};
use support::mocks::{
    rejected, transport, MockAuthenticator, MockCredentialStore, MockResourceClient,
};

struct Harness {
    controller: SyncController,
    store: Arc<MockCredentialStore>,
    auth: Arc<MockAuthenticator>,
    subjects: Arc<MockResourceClient<Subject>>,
    students: Arc<MockResourceClient<Student>>,
    queue: Arc<NotificationQueue>,
}

impl Harness {
    fn new() -> Self {
        Self::with(MockCredentialStore::with_token("T0"), SyncConfig::default())
    }

    fn with(store: Arc<MockCredentialStore>, config: SyncConfig) -> Self {
        let auth = Arc::new(MockAuthenticator::default());
        let subjects = MockResourceClient::<Subject>::new();
        let students = MockResourceClient::<Student>::new();
        let queue = Arc::new(NotificationQueue::new());
        let session = Arc::new(SessionManager::new(store.clone()));

        let controller = SyncController::new(
            session,
            auth.clone(),
            subjects.clone(),
            students.clone(),
            queue.clone(),
            &config,
        );

        Self { controller, store, auth, subjects, students, queue }
    }

    /// Restore the stored session and load both (empty) collections.
    async fn started() -> Self {
        let harness = Self::new();
        harness.controller.start().await;
        harness.queue.drain();
        harness
    }
}

fn student(id: i64, email: &str, staff: bool) -> Student {
    let mut student = Student::new(id, email);
    student.is_staff = staff;
    student
}

#[tokio::test]
async fn start_restores_credential_and_loads_both_kinds() {
    let harness = Harness::new();
    harness.subjects.push_list(Ok(vec![Subject::new(1, "Mathematics")]));

    harness.controller.start().await;

    assert!(harness.controller.session().is_authenticated());
    assert_eq!(harness.subjects.list_calls(), vec![Some("T0".to_string())]);
    assert_eq!(harness.students.list_calls(), vec![Some("T0".to_string())]);
    assert_eq!(harness.controller.subjects().len(), 1);
    assert!(harness.queue.is_empty());
}

#[tokio::test]
async fn start_without_stored_credential_lists_unauthenticated() {
    let harness = Harness::with(Arc::new(MockCredentialStore::default()), SyncConfig::default());
    harness.subjects.push_list(Err(rejected(401, r#"{"detail":"no"}"#)));

    harness.controller.start().await;

    assert!(!harness.controller.session().is_authenticated());
    assert_eq!(harness.subjects.list_calls(), vec![None]);
    assert!(harness.controller.subjects().is_empty());
    assert!(harness.queue.is_empty());
}

#[tokio::test]
async fn sign_in_establishes_session_and_reloads() {
    let harness = Harness::with(Arc::new(MockCredentialStore::default()), SyncConfig::default());
    harness.auth.push(Ok(TokenResponse { token: Some("T1".into()) }));

    assert!(harness.controller.sign_in("a", "b").await);

    assert_eq!(harness.auth.requests.lock().clone(), vec![("a".to_string(), "b".to_string())]);
    assert_eq!(
        harness.controller.session().credential(),
        Credential::parse("T1")
    );
    assert_eq!(harness.store.token().as_deref(), Some("T1"));
    assert_eq!(harness.subjects.list_calls(), vec![Some("T1".to_string())]);
    assert_eq!(harness.students.list_calls(), vec![Some("T1".to_string())]);
    assert_eq!(harness.queue.drain(), vec![Notification::success("Signed in")]);
}

#[tokio::test]
async fn sign_in_with_blank_input_makes_no_request() {
    let harness = Harness::new();

    assert!(!harness.controller.sign_in("  ", "pw").await);

    assert!(harness.auth.requests.lock().is_empty());
    assert_eq!(
        harness.queue.drain(),
        vec![Notification::error("Please enter username and password.")]
    );
}

#[tokio::test]
async fn sign_in_rejection_reports_server_reason() {
    let harness = Harness::with(Arc::new(MockCredentialStore::default()), SyncConfig::default());
    harness.auth.push(Err(rejected(
        400,
        r#"{"non_field_errors":["Unable to log in with provided credentials."]}"#,
    )));
    harness.auth.push(Err(rejected(500, "")));
    harness.auth.push(Ok(TokenResponse { token: None }));

    assert!(!harness.controller.sign_in("a", "wrong").await);
    assert!(!harness.controller.sign_in("a", "wrong").await);
    assert!(!harness.controller.sign_in("a", "b").await);

    let messages: Vec<String> = harness.queue.drain().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "Unable to log in with provided credentials.",
            "Login failed (check credentials)",
            "Login response missing token",
        ]
    );
    assert!(!harness.controller.session().is_authenticated());
    assert_eq!(harness.subjects.call_count(), 0);
}

#[tokio::test]
async fn sign_out_clears_storage_and_reloads_unauthenticated() {
    let harness = Harness::started().await;

    harness.controller.sign_out().await;

    assert!(!harness.controller.session().is_authenticated());
    assert_eq!(harness.store.token(), None);
    assert_eq!(harness.subjects.list_calls().last().cloned(), Some(None));
    assert_eq!(harness.students.list_calls().last().cloned(), Some(None));
    assert_eq!(harness.queue.drain(), vec![Notification::info("Signed out")]);
}

#[tokio::test]
async fn list_unauthorized_clears_silently() {
    let harness = Harness::new();
    harness.subjects.push_list(Ok(vec![Subject::new(1, "Art"), Subject::new(2, "Music")]));
    harness.controller.start().await;
    assert_eq!(harness.controller.subjects().len(), 2);

    harness.subjects.push_list(Err(rejected(401, "")));
    harness.controller.subjects().list().await;

    assert!(harness.controller.subjects().is_empty());
    assert!(harness.queue.is_empty());
    // A 401 never ends the session
    assert!(harness.controller.session().is_authenticated());
    assert_eq!(harness.store.token().as_deref(), Some("T0"));
}

#[tokio::test]
async fn list_failure_keeps_collection_and_reports_once() {
    let harness = Harness::new();
    harness.subjects.push_list(Ok(vec![Subject::new(1, "Art")]));
    harness.controller.start().await;

    harness.subjects.push_list(Err(rejected(500, "Server Error")));
    harness.controller.subjects().list().await;

    assert_eq!(harness.controller.subjects().items(), vec![Subject::new(1, "Art")]);
    assert_eq!(
        harness.queue.drain(),
        vec![Notification::error("Could not load subjects (Server Error)")]
    );

    harness.students.push_list(Err(transport()));
    harness.controller.students().list().await;
    let notes = harness.queue.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Error);
    assert_eq!(notes[0].message, "Network error: could not reach the server");
}

#[tokio::test]
async fn student_list_excludes_staff_and_admins() {
    let harness = Harness::new();
    let mut admin = student(3, "root@example.com", false);
    admin.is_admin = true;
    harness.students.push_list(Ok(vec![
        student(1, "s1@example.com", false),
        student(2, "teacher@example.com", true),
        admin,
        student(4, "s2@example.com", false),
    ]));

    harness.controller.start().await;

    let ids: Vec<ResourceId> =
        harness.controller.students().items().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![ResourceId::from(1), ResourceId::from(4)]);
}

#[tokio::test]
async fn create_prepends_and_notifies() {
    let harness = Harness::new();
    harness.subjects.push_list(Ok(vec![Subject::new(5, "History")]));
    harness.controller.start().await;
    harness.subjects.push_create(Ok(Subject::new(1, "Mathematics")));

    let created = harness.controller.subjects().create(NewSubject::new(" Mathematics ")).await;

    assert_eq!(created.map(|s| s.id), Some(ResourceId::from(1)));
    let items = harness.controller.subjects().items();
    assert_eq!(items[0].id, ResourceId::from(1));
    assert_eq!(items.len(), 2);
    assert_eq!(harness.subjects.created_drafts(), vec![NewSubject::new("Mathematics")]);
    assert_eq!(harness.queue.drain(), vec![Notification::success("Subject added")]);
}

#[tokio::test]
async fn created_staff_student_is_reported_but_hidden() {
    let harness = Harness::started().await;
    harness.students.push_create(Ok(student(9, "t@example.com", true)));

    let created =
        harness.controller.students().create(NewStudent::new("t@example.com", "secret1")).await;

    assert!(created.is_some());
    assert!(harness.controller.students().is_empty());
    assert_eq!(harness.queue.drain(), vec![Notification::success("Student created")]);
}

#[tokio::test]
async fn local_validation_short_circuits_the_network() {
    let harness = Harness::started().await;
    let subject_calls = harness.subjects.call_count();
    let student_calls = harness.students.call_count();

    harness.controller.subjects().create(NewSubject::new("   ")).await;
    harness.controller.students().create(NewStudent::new("s@example.com", "12345")).await;
    harness.controller.students().create(NewStudent::new("", "123456")).await;

    assert_eq!(harness.subjects.call_count(), subject_calls);
    assert_eq!(harness.students.call_count(), student_calls);
    assert_eq!(
        harness.queue.drain(),
        vec![
            Notification::error("Subject name required"),
            Notification::error("Password must be at least 6 characters"),
            Notification::error("Student email required"),
        ]
    );
}

#[tokio::test]
async fn create_failures_map_to_messages() {
    let harness = Harness::started().await;
    harness.subjects.push_create(Err(rejected(401, "")));
    harness.subjects.push_create(Err(rejected(
        400,
        r#"{"name":["subject with this name already exists."]}"#,
    )));
    harness.subjects.push_create(Err(rejected(400, "")));
    harness.subjects.push_create(Err(rejected(500, "boom")));
    harness.subjects.push_create(Err(transport()));
    harness.students.push_create(Err(rejected(503, "")));
    harness.students.push_create(Err(rejected(
        400,
        r#"{"password": ["This password is too common."], "email": ["Enter a valid email address."]}"#,
    )));

    for _ in 0..5 {
        assert!(harness.controller.subjects().create(NewSubject::new("Art")).await.is_none());
    }
    for _ in 0..2 {
        let draft = NewStudent::new("s@example.com", "123456");
        assert!(harness.controller.students().create(draft).await.is_none());
    }

    let messages: Vec<String> = harness.queue.drain().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "Unauthorized: please sign in".to_string(),
            r#"Error: {"name":["subject with this name already exists."]}"#.to_string(),
            "Validation error".to_string(),
            "Add failed: boom".to_string(),
            "Network error: could not reach the server".to_string(),
            "Create failed: status 503".to_string(),
            r#"Error: {"password": ["This password is too common."], "email": ["Enter a valid email address."]}"#
                .to_string(),
        ]
    );
    assert!(harness.controller.subjects().is_empty());
    assert!(harness.controller.students().is_empty());
}

#[tokio::test]
async fn cancel_makes_no_request() {
    let harness = Harness::new();
    harness.subjects.push_list(Ok(vec![Subject::new(1, "Art")]));
    harness.controller.start().await;
    let calls = harness.subjects.call_count();

    harness.controller.subjects().stage_delete(1);
    harness.controller.subjects().cancel_delete();

    assert_eq!(harness.controller.subjects().staged_delete(), None);
    assert_eq!(harness.controller.subjects().len(), 1);
    assert_eq!(harness.subjects.call_count(), calls);
    assert!(harness.queue.is_empty());
}

#[tokio::test]
async fn confirm_deletes_by_string_identity() {
    let harness = Harness::new();
    harness.subjects.push_list(Ok(vec![Subject::new(1, "Art"), Subject::new(2, "Music")]));
    harness.controller.start().await;

    harness.controller.subjects().stage_delete("1");
    assert!(harness.controller.subjects().confirm_delete().await);

    assert!(!harness.controller.subjects().contains(&ResourceId::from(1)));
    assert_eq!(harness.controller.subjects().len(), 1);
    assert_eq!(harness.controller.subjects().staged_delete(), None);
    assert_eq!(harness.subjects.deleted_ids(), vec![ResourceId::from("1")]);
    assert_eq!(harness.queue.drain(), vec![Notification::info("Subject deleted")]);
}

#[tokio::test]
async fn failed_delete_still_clears_staged_id() {
    let harness = Harness::new();
    harness.students.push_list(Ok(vec![student(4, "s@example.com", false)]));
    harness.controller.start().await;
    harness.students.push_delete(Err(rejected(401, "")));
    harness.students.push_delete(Err(rejected(404, r#"{"detail":"Not found."}"#)));
    harness.students.push_delete(Err(transport()));

    for _ in 0..3 {
        harness.controller.students().stage_delete(4);
        assert!(!harness.controller.students().confirm_delete().await);
        assert_eq!(harness.controller.students().staged_delete(), None);
    }

    assert_eq!(harness.controller.students().len(), 1);
    assert_eq!(
        harness.queue.drain(),
        vec![
            Notification::error("Unauthorized: please sign in"),
            Notification::error(r#"Delete failed: {"detail":"Not found."}"#),
            Notification::error("Network error: could not reach the server"),
        ]
    );
}

#[tokio::test]
async fn confirm_with_nothing_staged_is_a_no_op() {
    let harness = Harness::started().await;
    let calls = harness.subjects.call_count();

    assert!(!harness.controller.subjects().confirm_delete().await);

    assert_eq!(harness.subjects.call_count(), calls);
    assert!(harness.queue.is_empty());
}

#[tokio::test]
async fn staging_again_replaces_the_candidate() {
    let harness = Harness::started().await;

    harness.controller.subjects().stage_delete(1);
    harness.controller.subjects().stage_delete(2);
    harness.controller.subjects().confirm_delete().await;

    assert_eq!(harness.subjects.deleted_ids(), vec![ResourceId::from(2)]);
}

#[tokio::test]
async fn superseded_list_response_is_discarded() {
    let harness = Harness::started().await;
    harness.subjects.push_list(Ok(vec![Subject::new(1, "Stale")]));
    let gate = harness.subjects.gate_lists();

    let load = harness.controller.subjects().list();
    let switch = async {
        harness.controller.session().establish(Credential::parse("T2").unwrap());
        gate.notify_one();
    };
    tokio::join!(load, switch);

    assert!(harness.controller.subjects().is_empty());
    assert!(harness.queue.is_empty());
}

#[tokio::test]
async fn superseded_responses_apply_when_discard_is_disabled() {
    let harness = Harness::with(
        MockCredentialStore::with_token("T0"),
        SyncConfig { discard_superseded: false },
    );
    harness.controller.start().await;
    harness.subjects.push_list(Ok(vec![Subject::new(1, "Late")]));
    let gate = harness.subjects.gate_lists();

    let load = harness.controller.subjects().list();
    let switch = async {
        harness.controller.session().clear();
        gate.notify_one();
    };
    tokio::join!(load, switch);

    assert_eq!(harness.controller.subjects().items(), vec![Subject::new(1, "Late")]);
}

#[tokio::test]
async fn persistence_failure_keeps_session_in_memory() {
    let store = Arc::new(MockCredentialStore::default());
    *store.fail_writes.lock() = true;
    let harness = Harness::with(store, SyncConfig::default());
    harness.auth.push(Ok(TokenResponse { token: Some("T1".into()) }));

    assert!(harness.controller.sign_in("a", "b").await);

    assert!(harness.controller.session().is_authenticated());
    assert_eq!(harness.store.token(), None);
    assert_eq!(harness.subjects.list_calls(), vec![Some("T1".to_string())]);
}
