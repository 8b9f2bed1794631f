//! Defines the endpoint for listing operations.

use axum::{Json, extract::State};

use crate::{
    Database, Error,
    operation::core::{Operation, get_all_operations},
};

/// A route handler for listing every operation, most recent first.
///
/// Soft-deleted operations are included, clients filter them by `estado`.
pub async fn list_operations_endpoint(
    State(database): State<Database>,
) -> Result<Json<Vec<Operation>>, Error> {
    let operations = database
        .run(|connection| get_all_operations(connection))
        .await?;

    Ok(Json(operations))
}
