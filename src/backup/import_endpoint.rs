//! Defines the endpoint for restoring a backup.

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Database, Error,
    backup::core::{BackupEntry, import_operations},
    message::MessageResponse,
    timezone::resolve_local_offset,
};

/// The state needed to import operations.
#[derive(Debug, Clone)]
pub struct ImportBackupState {
    /// Where the operations are stored.
    pub database: Database,
    /// The local timezone as a canonical timezone name, used to stamp missing `fecha`s.
    pub local_timezone: String,
}

impl FromRef<AppState> for ImportBackupState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            database: state.database.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The JSON body of an import request.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ImportRequest {
    /// The operations to insert. A missing list imports nothing.
    #[serde(default)]
    pub operaciones: Vec<BackupEntry>,
}

/// A route handler that inserts every entry of the request as a new operation.
pub async fn import_backup_endpoint(
    State(state): State<ImportBackupState>,
    request: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, Error> {
    let Json(request) = request?;
    let local_offset = resolve_local_offset(&state.local_timezone)?;

    let inserted = state
        .database
        .run(move |connection| import_operations(request.operaciones, local_offset, connection))
        .await?;
    tracing::info!("Imported backup of {inserted} operations");

    Ok(Json(MessageResponse::new("Backup importado")))
}
