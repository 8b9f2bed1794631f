//! Helpers shared by the endpoint tests.

use tempfile::TempDir;

use crate::{AppState, Database};

/// Create an [AppState] backed by a fresh database file.
///
/// The returned [TempDir] must be kept alive for as long as the state is used.
#[track_caller]
pub fn must_create_test_state() -> (TempDir, AppState) {
    let dir = TempDir::new().expect("could not create temporary directory");
    let state = AppState::new(
        Database::new(dir.path().join("data.db")),
        "Etc/UTC",
        dir.path(),
    )
    .expect("could not create test state");

    (dir, state)
}
