//! Database configuration from environment and flags.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rusqlite::Connection;

/// Environment variable naming the SQLite database file.
pub const DB_PATH_ENV: &str = "FDA_DB_PATH";

/// Resolve the database path from the `--database` flag or `FDA_DB_PATH`.
///
/// A missing value is a fatal startup condition: nothing is allowed to
/// touch an implicitly chosen database.
pub fn database_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path);
    }
    match std::env::var_os(DB_PATH_ENV) {
        Some(value) if !value.is_empty() => Ok(PathBuf::from(value)),
        _ => bail!("{DB_PATH_ENV} is not set and --database was not given"),
    }
}

/// Open the database connection for one pipeline run.
///
/// The connection is a scoped value owned by the caller and dropped at the
/// end of the run; there is no process-wide handle.
pub fn open_database(flag: Option<PathBuf>) -> Result<Connection> {
    let path = database_path(flag)?;
    Connection::open(&path).with_context(|| format!("open database {}", path.display()))
}
