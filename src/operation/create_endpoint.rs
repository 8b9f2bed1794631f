//! Defines the endpoint for creating a new operation.

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Database, Error,
    database_id::OperationId,
    operation::core::{DEFAULT_STATUS, OperationPayload, create_operation},
    timezone::{local_timestamp, resolve_local_offset},
};

/// The state needed to create an operation.
#[derive(Debug, Clone)]
pub struct CreateOperationState {
    /// Where the operations are stored.
    pub database: Database,
    /// The local timezone as a canonical timezone name, used to stamp `fecha`.
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateOperationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            database: state.database.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The response body for a created operation.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatedResponse {
    /// The acknowledgement text shown to the user.
    pub message: String,
    /// The ID assigned to the new operation.
    pub id: OperationId,
}

/// A route handler for creating a new operation, responds with the new ID.
pub async fn create_operation_endpoint(
    State(state): State<CreateOperationState>,
    payload: Result<Json<OperationPayload>, JsonRejection>,
) -> Result<impl IntoResponse, Error> {
    let Json(payload) = payload?;
    let operation = payload.into_new_operation(DEFAULT_STATUS)?;

    let local_offset = resolve_local_offset(&state.local_timezone)?;
    let fecha = local_timestamp(local_offset)?;

    let id = state
        .database
        .run(move |connection| create_operation(&operation, &fecha, connection))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Operación añadida".to_owned(),
            id,
        }),
    ))
}
