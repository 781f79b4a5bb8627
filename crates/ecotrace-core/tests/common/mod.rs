//! Common test utilities and harness for EcoTrace integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use ecotrace_core::{
    Dashboard, EcoTrace, FileStorage, FixedStats, Notice, Presenter, RegistrationForm, SESSION_KEY,
    SessionStore,
};
use tempfile::TempDir;

/// Presenter that records everything it is asked to show.
#[derive(Default)]
pub struct RecordingPresenter {
    pub notices: RefCell<Vec<Notice>>,
    pub dashboards: RefCell<Vec<Dashboard>>,
}

impl RecordingPresenter {
    /// The most recent notice.
    pub fn last_notice(&self) -> Notice {
        self.notices
            .borrow()
            .last()
            .cloned()
            .expect("at least one notice")
    }
}

impl Presenter for RecordingPresenter {
    fn notify(&self, notice: &Notice) {
        self.notices.borrow_mut().push(notice.clone());
    }

    fn refresh(&self, dashboard: &Dashboard) {
        self.dashboards.borrow_mut().push(dashboard.clone());
    }
}

/// Test harness owning a temporary data directory.
///
/// Each call to [`TestHarness::start`] simulates a fresh process start
/// against the same directory.
pub struct TestHarness {
    pub dir: TempDir,
}

impl TestHarness {
    /// Creates a harness with an empty data directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    /// File storage rooted in the harness directory.
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.dir.path())
    }

    /// Path of the session snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join(format!("{SESSION_KEY}.json"))
    }

    /// Starts the application with fixed statistics.
    pub fn start(&self) -> (EcoTrace<FileStorage>, Rc<RecordingPresenter>) {
        let presenter = Rc::new(RecordingPresenter::default());
        let app = EcoTrace::init(
            SessionStore::init(self.storage()),
            Box::new(FixedStats::default()),
            Box::new(Rc::clone(&presenter)),
        );
        (app, presenter)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A fully filled-in registration form.
pub fn registration_form() -> RegistrationForm {
    RegistrationForm {
        first_name: "Asha".to_string(),
        last_name: "Verma".to_string(),
        email: "asha@example.com".to_string(),
        password: "correct horse".to_string(),
        community: "Sector 18, Noida".to_string(),
    }
}
