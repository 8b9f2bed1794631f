/*! Access to the application's SQLite database file. */

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, operation::create_operation_table};

/// How long a connection waits on SQLite's file lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// The location of the application's SQLite database.
///
/// No connection is held between calls. Each request opens its own
/// connection with [Database::connect] and the connection is closed when it
/// goes out of scope, so concurrent writers are serialized by SQLite's file
/// locking alone.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Create a handle to the database file at `path`.
    ///
    /// The file is not touched until [Database::connect] is called.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a new connection to the database, creating the file if needed.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn connect(&self) -> Result<Connection, Error> {
        let connection = Connection::open(&self.path)?;
        connection.busy_timeout(BUSY_TIMEOUT)?;

        Ok(connection)
    }

    /// Open a connection and run `query` with it on tokio's blocking thread
    /// pool, so a locked database does not stall an async worker.
    ///
    /// The connection is closed when `query` returns.
    ///
    /// # Errors
    /// Returns the error from `query` or from opening the connection, or
    /// [Error::DatabaseTaskError] if the blocking task panicked.
    pub async fn run<T, F>(&self, query: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Connection) -> Result<T, Error> + Send + 'static,
        T: Send + 'static,
    {
        let database = self.clone();

        tokio::task::spawn_blocking(move || {
            let mut connection = database.connect()?;
            query(&mut connection)
        })
        .await
        .map_err(|error| {
            tracing::error!("Database task failed: {error}");
            Error::DatabaseTaskError(error.to_string())
        })?
    }
}

/// Create the tables for the domain models if they do not exist yet.
///
/// Safe to call on every start up, existing tables and rows are left alone.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_operation_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use tempfile::TempDir;

    use crate::Error;

    use super::{Database, initialize};

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        connection
            .execute(
                "INSERT INTO operaciones (tipo, cliente, importe, usdt, fecha, estado) \
                VALUES ('Compra', 'Ana', 1.0, 1.0, '2025-01-01 00:00:00', 'Finalizada')",
                (),
            )
            .unwrap();
        initialize(&connection).unwrap();

        let count: i64 = connection
            .query_row("SELECT COUNT(*) FROM operaciones", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn connections_share_the_same_file() {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().join("data.db"));

        initialize(&database.connect().unwrap()).unwrap();
        database
            .connect()
            .unwrap()
            .execute("INSERT INTO operaciones (tipo) VALUES ('Venta')", ())
            .unwrap();

        let tipo: String = database
            .connect()
            .unwrap()
            .query_row("SELECT tipo FROM operaciones", [], |row| row.get(0))
            .unwrap();
        assert_eq!(tipo, "Venta");
    }

    #[tokio::test]
    async fn run_returns_query_result() {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().join("data.db"));
        initialize(&database.connect().unwrap()).unwrap();

        let count = database
            .run(|connection| {
                connection.execute("INSERT INTO operaciones (tipo) VALUES ('Venta')", ())?;
                let count: i64 =
                    connection.query_row("SELECT COUNT(*) FROM operaciones", [], |row| row.get(0))?;
                Ok(count)
            })
            .await;

        assert_eq!(count, Ok(1));
    }

    #[tokio::test]
    async fn run_passes_query_errors_through() {
        let dir = TempDir::new().unwrap();
        let database = Database::new(dir.path().join("data.db"));

        let got: Result<(), Error> = database.run(|_| Err(Error::NotFound)).await;

        assert_eq!(got, Err(Error::NotFound));
    }
}
