pub mod error;
pub mod models;
pub mod queries;
pub mod schema;

pub use error::ContainerError;
pub use schema::SchemaNames;

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, ContainerError>;

/// Read-only handle on a `.qdb` container.
///
/// Holds no open connection. Each call to [`Container::with_conn`] opens a
/// fresh read-only connection and closes it before returning, whatever the
/// closure's outcome.
pub struct Container {
    path: PathBuf,
    schema: SchemaNames,
}

impl Container {
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_schema(path, SchemaNames::default())
    }

    pub fn open_with_schema(path: &Path, schema: SchemaNames) -> Result<Self> {
        if !path.is_file() {
            return Err(ContainerError::NotFound(path.to_path_buf()));
        }

        info!("Container found at {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            schema,
        })
    }

    pub fn schema(&self) -> &SchemaNames {
        &self.schema
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!("Opened read-only connection to {}", self.path.display());

        let result = f(&conn);

        // A close failure only matters if the batch itself succeeded.
        if let Err((_, e)) = conn.close() {
            if result.is_ok() {
                return Err(e.into());
            }
        }
        debug!("Closed connection to {}", self.path.display());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_container(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("qdb_db_{}_{}.qdb", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE Users (id INTEGER, name TEXT);")
            .unwrap();
        path
    }

    #[test]
    fn missing_file_is_reported() {
        let path = std::env::temp_dir().join("qdb_db_definitely_missing.qdb");
        match Container::open(&path) {
            Err(ContainerError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn connections_are_read_only() {
        let path = temp_container("read_only");
        let container = Container::open(&path).unwrap();

        let err = container
            .with_conn(|conn| {
                conn.execute("INSERT INTO Users VALUES (1, 'x')", [])?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, ContainerError::Sqlite(_)));

        // A failed batch does not poison later ones.
        let tables = container.list_tables().unwrap();
        assert_eq!(tables, vec!["Users"]);

        let _ = std::fs::remove_file(&path);
    }
}
