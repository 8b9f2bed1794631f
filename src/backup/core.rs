//! The backup format and the queries that produce and restore it.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::UtcOffset;

use crate::{
    Error,
    database_id::OperationId,
    operation::{DEFAULT_STATUS, coerce_amount},
    timezone::local_timestamp,
};

/// One raw row of the operation table, serialized as a JSON array in column
/// order: `[id, tipo, cliente, importe, usdt, fecha, estado]`.
///
/// Columns are kept exactly as stored, so `NULL`s come out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRow(
    pub OperationId,
    pub Option<String>,
    pub Option<String>,
    pub Option<f64>,
    pub Option<f64>,
    pub Option<String>,
    pub Option<String>,
);

fn map_row_to_backup_row(row: &Row) -> Result<BackupRow, rusqlite::Error> {
    Ok(BackupRow(
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

/// An operation to restore from a backup. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportRecord {
    /// Defaults to empty text.
    pub tipo: Option<String>,
    /// Defaults to empty text.
    pub cliente: Option<String>,
    /// Converted like the amounts of a new operation, defaults to zero.
    pub importe: Option<Value>,
    /// Converted like the amounts of a new operation, defaults to zero.
    pub usdt: Option<Value>,
    /// Defaults to the time the record is inserted.
    pub fecha: Option<String>,
    /// Defaults to [DEFAULT_STATUS].
    pub estado: Option<String>,
}

impl From<BackupRow> for ImportRecord {
    fn from(row: BackupRow) -> Self {
        let BackupRow(_id, tipo, cliente, importe, usdt, fecha, estado) = row;

        Self {
            tipo,
            cliente,
            importe: importe.map(Value::from),
            usdt: usdt.map(Value::from),
            fecha,
            estado,
        }
    }
}

/// An entry of an import request.
///
/// Either a record object, or a row exactly as produced by the export so a
/// downloaded backup can be uploaded again unchanged. The ID of a row is
/// ignored, restored operations always get a new ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BackupEntry {
    /// A mapping with optional `tipo`, `cliente`, `importe`, `usdt`, `fecha` and `estado`.
    Record(ImportRecord),
    /// A positional row from an export.
    Row(BackupRow),
}

impl From<BackupEntry> for ImportRecord {
    fn from(entry: BackupEntry) -> Self {
        match entry {
            BackupEntry::Record(record) => record,
            BackupEntry::Row(row) => row.into(),
        }
    }
}

/// Get every row of the operation table, soft-deleted operations included.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn export_all_operations(connection: &Connection) -> Result<Vec<BackupRow>, Error> {
    connection
        .prepare(
            "SELECT id, tipo, cliente, importe, usdt, fecha, estado
             FROM operaciones
             ORDER BY id",
        )?
        .query_map([], map_row_to_backup_row)?
        .map(|maybe_row| maybe_row.map_err(Error::from))
        .collect()
}

/// Insert every entry as a new operation.
///
/// A missing `fecha` is stamped with the current time at `local_offset`,
/// computed separately for each entry. All entries are inserted in a single
/// SQL transaction, so either the whole batch is stored or none of it is.
///
/// Returns the number of operations inserted.
///
/// # Errors
/// Returns [Error::InvalidAmount] if an amount is not a number, or
/// [Error::SqlError] if there is an SQL error. Nothing is stored in either case.
pub fn import_operations(
    entries: Vec<BackupEntry>,
    local_offset: UtcOffset,
    connection: &mut Connection,
) -> Result<usize, Error> {
    import_operations_stamped_by(entries, || local_timestamp(local_offset), connection)
}

/// Insert every entry as a new operation, calling `timestamp` for the
/// `fecha` of each entry that has none.
fn import_operations_stamped_by(
    entries: Vec<BackupEntry>,
    mut timestamp: impl FnMut() -> Result<String, Error>,
    connection: &mut Connection,
) -> Result<usize, Error> {
    let count = entries.len();
    let transaction = connection.transaction()?;

    {
        let mut statement = transaction.prepare(
            "INSERT INTO operaciones (tipo, cliente, importe, usdt, fecha, estado)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;

        for entry in entries {
            let record = ImportRecord::from(entry);
            let importe = coerce_amount("importe", record.importe.as_ref())?;
            let usdt = coerce_amount("usdt", record.usdt.as_ref())?;
            let fecha = match record.fecha {
                Some(fecha) => fecha,
                None => timestamp()?,
            };

            statement.execute(params![
                record.tipo.unwrap_or_default(),
                record.cliente.unwrap_or_default(),
                importe,
                usdt,
                fecha,
                record.estado.unwrap_or_else(|| DEFAULT_STATUS.to_owned()),
            ])?;
        }
    }

    transaction.commit()?;
    tracing::debug!("Imported {count} operations");

    Ok(count)
}
