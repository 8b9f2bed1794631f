//! Defines the endpoint for downloading a backup of every operation.

use axum::{Json, extract::State};

use crate::{
    Database, Error,
    backup::core::{BackupRow, export_all_operations},
};

/// A route handler that responds with every stored row as an array of arrays.
pub async fn export_backup_endpoint(
    State(database): State<Database>,
) -> Result<Json<Vec<BackupRow>>, Error> {
    let rows = database
        .run(|connection| export_all_operations(connection))
        .await?;
    tracing::info!("Exporting backup of {} operations", rows.len());

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use axum::{Json, extract::State};

    use crate::{
        backup::export_endpoint::export_backup_endpoint,
        operation::{DEFAULT_STATUS, NewOperation, create_operation, soft_delete_operation},
        test_utils::must_create_test_state,
    };

    #[tokio::test]
    async fn soft_delete_does_not_shrink_export() {
        let (_dir, state) = must_create_test_state();
        let connection = state.database.connect().unwrap();
        let operation = NewOperation {
            tipo: "Compra".to_owned(),
            cliente: "Ana".to_owned(),
            importe: 1.0,
            usdt: 1.0,
            estado: DEFAULT_STATUS.to_owned(),
        };
        let id = create_operation(&operation, "2025-05-01 10:00:00", &connection).unwrap();
        create_operation(&operation, "2025-05-01 11:00:00", &connection).unwrap();
        let Json(before) = export_backup_endpoint(State(state.database.clone()))
            .await
            .unwrap();

        soft_delete_operation(id, &connection).unwrap();
        let Json(after) = export_backup_endpoint(State(state.database.clone()))
            .await
            .unwrap();

        assert_eq!(before.len(), 2);
        assert_eq!(after.len(), 2);
    }
}
