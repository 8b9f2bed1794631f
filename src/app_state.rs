//! Implements a struct that holds the state of the REST server.

use std::path::{Path, PathBuf};

use axum::extract::FromRef;

use crate::{
    Error,
    db::{Database, initialize},
    timezone::resolve_local_offset,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where the operations are stored.
    pub database: Database,

    /// The local timezone as a canonical timezone name, e.g. "Europe/Madrid".
    pub local_timezone: String,

    /// The directory holding `templates/`, `static/`, `manifest.json` and
    /// `service-worker.js`.
    pub asset_dir: PathBuf,
}

impl AppState {
    /// Create a new [AppState] for the SQLite database `database`.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Europe/Madrid".
    ///
    /// # Errors
    /// Returns an error if the timezone is not valid or the database cannot be initialized.
    pub fn new(
        database: Database,
        local_timezone: &str,
        asset_dir: impl AsRef<Path>,
    ) -> Result<Self, Error> {
        resolve_local_offset(local_timezone)?;
        initialize(&database.connect()?)?;

        Ok(Self {
            database,
            local_timezone: local_timezone.to_owned(),
            asset_dir: asset_dir.as_ref().to_path_buf(),
        })
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.database.clone()
    }
}
