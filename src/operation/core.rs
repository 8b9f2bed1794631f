//! Defines the core data models and database queries for operations.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, database_id::OperationId, operation::amount::coerce_amount};

/// The status given to new operations that do not specify one.
pub const DEFAULT_STATUS: &str = "Finalizada";
/// The status that marks an operation as deleted.
pub const DELETED_STATUS: &str = "Eliminada";

// ============================================================================
// MODELS
// ============================================================================

/// A financial transaction record, e.g. a purchase of USDT for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The ID of the operation, assigned by the database.
    pub id: OperationId,
    /// The kind of operation, e.g. "Compra" or "Venta".
    pub tipo: String,
    /// Who the operation was made for.
    pub cliente: String,
    /// The amount in the source currency.
    pub importe: f64,
    /// The amount in USDT.
    pub usdt: f64,
    /// When the operation was created, formatted as `YYYY-MM-DD HH:MM:SS`.
    pub fecha: String,
    /// The status of the operation, e.g. "Finalizada" or "Eliminada".
    pub estado: String,
}

/// The mutable fields of an operation, with amounts already converted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOperation {
    /// The kind of operation.
    pub tipo: String,
    /// Who the operation was made for.
    pub cliente: String,
    /// The amount in the source currency.
    pub importe: f64,
    /// The amount in USDT.
    pub usdt: f64,
    /// The status of the operation.
    pub estado: String,
}

/// The JSON body for creating or updating an operation.
///
/// Every field is optional. Amounts are kept as raw JSON so that text and
/// blank values can be converted with [coerce_amount].
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationPayload {
    /// Defaults to empty text.
    pub tipo: Option<String>,
    /// Defaults to empty text.
    pub cliente: Option<String>,
    /// Converted with [coerce_amount].
    pub importe: Option<Value>,
    /// Converted with [coerce_amount].
    pub usdt: Option<Value>,
    /// Defaults to the value given to [OperationPayload::into_new_operation].
    pub estado: Option<String>,
}

impl OperationPayload {
    /// Convert the payload, using `default_estado` when `estado` is missing.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if `importe` or `usdt` is not a number.
    pub fn into_new_operation(self, default_estado: &str) -> Result<NewOperation, Error> {
        Ok(NewOperation {
            importe: coerce_amount("importe", self.importe.as_ref())?,
            usdt: coerce_amount("usdt", self.usdt.as_ref())?,
            tipo: self.tipo.unwrap_or_default(),
            cliente: self.cliente.unwrap_or_default(),
            estado: self
                .estado
                .unwrap_or_else(|| default_estado.to_owned()),
        })
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the operation table if it does not exist.
///
/// `AUTOINCREMENT` stops SQLite from handing out the ID of a previously
/// removed row again.
pub fn create_operation_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS operaciones (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tipo TEXT,
            cliente TEXT,
            importe REAL,
            usdt REAL,
            fecha TEXT,
            estado TEXT
        )",
        (),
    )?;

    Ok(())
}

/// Map a row selected in table column order to an [Operation].
///
/// `NULL` columns, which older data files may contain, are read as empty
/// text or zero.
pub fn map_row_to_operation(row: &Row) -> Result<Operation, rusqlite::Error> {
    Ok(Operation {
        id: row.get(0)?,
        tipo: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        cliente: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        importe: row.get::<_, Option<f64>>(3)?.unwrap_or_default(),
        usdt: row.get::<_, Option<f64>>(4)?.unwrap_or_default(),
        fecha: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        estado: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
    })
}

/// Insert a new operation stamped with `fecha` and return its ID.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn create_operation(
    operation: &NewOperation,
    fecha: &str,
    connection: &Connection,
) -> Result<OperationId, Error> {
    connection.execute(
        "INSERT INTO operaciones (tipo, cliente, importe, usdt, fecha, estado)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            operation.tipo,
            operation.cliente,
            operation.importe,
            operation.usdt,
            fecha,
            operation.estado
        ],
    )?;

    let id = connection.last_insert_rowid();
    tracing::debug!("Created operation {id}");

    Ok(id)
}

/// Get every operation, most recent first.
///
/// Operations created within the same second are ordered by ID, newest first.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_all_operations(connection: &Connection) -> Result<Vec<Operation>, Error> {
    connection
        .prepare(
            "SELECT id, tipo, cliente, importe, usdt, fecha, estado
             FROM operaciones
             ORDER BY fecha DESC, id DESC",
        )?
        .query_map([], map_row_to_operation)?
        .map(|maybe_operation| maybe_operation.map_err(Error::from))
        .collect()
}

/// The number of rows changed by a statement.
pub type RowsAffected = usize;

/// Overwrite every field of operation `id` except its ID and `fecha`.
///
/// Updating an ID that does not exist changes nothing and is not an error,
/// check the returned row count to tell the two cases apart.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn update_operation(
    id: OperationId,
    operation: &NewOperation,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE operaciones
            SET \
                tipo = ?1, \
                cliente = ?2, \
                importe = ?3, \
                usdt = ?4, \
                estado = ?5 \
            WHERE id = ?6",
            params![
                operation.tipo,
                operation.cliente,
                operation.importe,
                operation.usdt,
                operation.estado,
                id
            ],
        )
        .map_err(Error::from)
}

/// Mark operation `id` as [DELETED_STATUS] without removing the row.
///
/// Like [update_operation], a missing ID changes nothing and is not an error.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn soft_delete_operation(
    id: OperationId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE operaciones SET estado = ?1 WHERE id = ?2",
            params![DELETED_STATUS, id],
        )
        .map_err(Error::from)
}

#[cfg(test)]
pub(crate) fn count_operations(connection: &Connection) -> i64 {
    connection
        .query_row("SELECT COUNT(*) FROM operaciones", [], |row| row.get(0))
        .expect("could not count operations")
}

#[cfg(test)]
pub(crate) fn must_get_operation(id: OperationId, connection: &Connection) -> Operation {
    connection
        .query_row(
            "SELECT id, tipo, cliente, importe, usdt, fecha, estado FROM operaciones WHERE id = ?1",
            params![id],
            map_row_to_operation,
        )
        .expect("could not get operation from database")
}
