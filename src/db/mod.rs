pub mod migrations;
pub mod queries;

use std::path::Path;

use anyhow::Context;
use rusqlite::Connection;

pub fn init_db(path: &str, migrations_dir: impl AsRef<Path>) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    migrations::run_migrations(&conn, migrations_dir.as_ref())?;

    Ok(conn)
}
