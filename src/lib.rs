//! Operaciones is a small record-keeping web service for financial operations.
//!
//! This library provides a JSON API for creating, listing, editing and
//! soft-deleting operations stored in a local SQLite database, plus bulk
//! export and import of the whole table for backups.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod backup;
mod database_id;
mod db;
pub mod endpoints;
mod logging;
mod message;
mod not_found;
mod operation;
mod pages;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;

pub use app_state::AppState;
pub use backup::{BackupEntry, BackupRow, ImportRecord, export_all_operations, import_operations};
pub use database_id::OperationId;
pub use db::{Database, initialize as initialize_db};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use message::MessageResponse;
pub use operation::{
    DEFAULT_STATUS, DELETED_STATUS, NewOperation, Operation, OperationPayload, coerce_amount,
    create_operation, get_all_operations, soft_delete_operation, update_operation,
};
pub use routing::build_router;
pub use timezone::{
    DEFAULT_TIMEZONE, FECHA_FORMAT, format_timestamp, get_local_offset, local_timestamp,
    local_timezone_or_system, system_timezone,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An amount field (`importe` or `usdt`) could not be converted to a
    /// number.
    ///
    /// Empty and missing amounts are treated as zero and never cause this
    /// error, only values such as `"abc"` or `[1, 2]` do.
    #[error("could not convert {field} value {value} to a number")]
    InvalidAmount {
        /// The name of the offending field.
        field: &'static str,
        /// The offending value as JSON text.
        value: String,
    },

    /// The request body was not valid JSON or did not have the expected shape.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The current time could not be formatted as a `fecha` string.
    #[error("could not format timestamp: {0}")]
    TimestampFormatError(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A blocking database task panicked or was cancelled.
    #[error("the database task failed: {0}")]
    DatabaseTaskError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

/// An operation ID that is not an integer cannot name any operation.
impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path: {}", rejection.body_text());
        Error::NotFound
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidAmount { .. } | Error::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error interno del servidor, revisa los logs del servidor".to_owned(),
                )
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
