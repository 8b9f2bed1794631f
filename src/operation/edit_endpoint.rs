//! Defines the endpoint for updating an operation.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Database, Error,
    database_id::OperationId,
    message::MessageResponse,
    operation::core::{OperationPayload, update_operation},
};

/// A route handler for overwriting an operation's fields.
///
/// Missing text fields, `estado` included, are stored as empty text. An
/// unknown ID is acknowledged like any other update.
pub async fn edit_operation_endpoint(
    State(database): State<Database>,
    operation_id: Result<Path<OperationId>, PathRejection>,
    payload: Result<Json<OperationPayload>, JsonRejection>,
) -> Result<Json<MessageResponse>, Error> {
    let Path(operation_id) = operation_id?;
    let Json(payload) = payload?;
    let operation = payload.into_new_operation("")?;

    let rows_affected = database
        .run(move |connection| update_operation(operation_id, &operation, connection))
        .await?;

    if rows_affected == 0 {
        tracing::warn!("Tried to update operation {operation_id}, which does not exist");
    }

    Ok(Json(MessageResponse::new(format!(
        "Operación {operation_id} actualizada"
    ))))
}
