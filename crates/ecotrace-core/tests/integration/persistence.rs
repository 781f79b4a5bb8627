//! Durable snapshot behaviour with file-backed storage.

use ecotrace_core::{
    FileStorage, Identity, InitialStats, SESSION_KEY, SessionStorage, SessionStore,
};

use crate::common::{TestHarness, registration_form};

#[test]
fn test_every_mutation_is_on_disk() {
    let harness = TestHarness::new();
    let mut store = SessionStore::init(harness.storage());
    store
        .create_session(Identity::new("a@b.c", "A"), InitialStats::registration())
        .unwrap();

    store.award_points(50).unwrap();
    let reread = SessionStore::init(harness.storage());
    assert_eq!(reread.current().unwrap().points, 150);

    store.update_carbon_footprint(90.93).unwrap();
    let reread = SessionStore::init(harness.storage());
    assert_eq!(reread.current().unwrap().carbon_footprint, 90.93);
}

#[test]
fn test_logout_removes_snapshot_file() {
    let harness = TestHarness::new();
    let (mut app, presenter) = harness.start();
    app.register(&registration_form()).unwrap();
    assert!(harness.snapshot_path().exists());

    app.logout().unwrap();
    assert!(!harness.snapshot_path().exists());
    assert_eq!(presenter.last_notice().message, "Logged out successfully.");

    let (restarted, _) = harness.start();
    assert!(restarted.current_user().is_none());
}

#[test]
fn test_malformed_snapshot_file_is_no_session() {
    let harness = TestHarness::new();
    std::fs::write(harness.snapshot_path(), "{\"id\": 42, \"garbage\": true").unwrap();

    let (mut app, presenter) = harness.start();
    assert!(app.current_user().is_none());
    assert!(presenter.notices.borrow().is_empty());

    // A fresh registration overwrites the bad snapshot.
    app.register(&registration_form()).unwrap();
    let (restarted, _) = harness.start();
    assert!(restarted.current_user().is_some());
}

#[test]
fn test_web_client_record_loads() {
    let harness = TestHarness::new();
    let mut storage = FileStorage::new(harness.dir.path());
    storage
        .set_item(
            SESSION_KEY,
            r#"{"id":"x7k2m9q1p","email":"meera@example.com","name":"meera",
                "points":5230,"carbonFootprint":212,"wasteReduced":31,
                "communityRank":57,"joinDate":"2024-06-01T08:30:00.000Z"}"#,
        )
        .unwrap();

    let store = SessionStore::init(harness.storage());
    let session = store.current().unwrap();
    assert_eq!(session.id.as_str(), "x7k2m9q1p");
    assert_eq!(session.points, 5230);
    assert_eq!(session.community_rank, 57);
    assert!(session.badges.is_empty());
}

#[test]
fn test_failed_validation_writes_nothing() {
    let harness = TestHarness::new();
    let mut store = SessionStore::init(harness.storage());
    assert!(
        store
            .create_session(Identity::new("", ""), InitialStats::registration())
            .is_err()
    );
    assert!(!harness.snapshot_path().exists());
}
