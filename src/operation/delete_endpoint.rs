//! Defines the endpoint for soft-deleting an operation.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use crate::{
    Database, Error, database_id::OperationId, message::MessageResponse,
    operation::core::soft_delete_operation,
};

/// A route handler for marking an operation as deleted.
///
/// The row is kept, only its `estado` changes. An unknown ID is acknowledged
/// like any other deletion.
pub async fn delete_operation_endpoint(
    State(database): State<Database>,
    operation_id: Result<Path<OperationId>, PathRejection>,
) -> Result<Json<MessageResponse>, Error> {
    let Path(operation_id) = operation_id?;

    let rows_affected = database
        .run(move |connection| soft_delete_operation(operation_id, connection))
        .await?;

    if rows_affected == 0 {
        tracing::warn!("Tried to delete operation {operation_id}, which does not exist");
    }

    Ok(Json(MessageResponse::new(format!(
        "Operación {operation_id} marcada como eliminada"
    ))))
}
