use anyhow::Context;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

/// Applies every pending `.sql` file from `dir` in filename order, recording
/// applied names so reruns are no-ops. The directory is configurable so the
/// binary can run from outside the crate root.
pub fn run_migrations(conn: &Connection, dir: &Path) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create migrations table")?;

    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "migrations directory not found, skipping");
        return Ok(());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("failed to read migrations directory: {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();

    files.sort();

    for path in files {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => continue,
        };

        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _migrations WHERE name = ?1",
                [&name],
                |row| row.get(0),
            )
            .context("failed to check migration status")?;

        if already_applied {
            continue;
        }

        let sql = fs::read_to_string(&path)
            .with_context(|| format!("failed to read migration file: {name}"))?;

        conn.execute_batch(&sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;

        conn.execute("INSERT INTO _migrations (name) VALUES (?1)", [&name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!("applied migration: {name}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, table: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_applies_booking_schema() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, Path::new("migrations")).unwrap();
        assert!(table_exists(&conn, "bookings"));
        assert!(table_exists(&conn, "attendees"));
        assert!(table_exists(&conn, "users"));
    }

    #[test]
    fn test_rerun_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, Path::new("migrations")).unwrap();
        run_migrations(&conn, Path::new("migrations")).unwrap();

        let applied: i64 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(applied, 1);
    }

    #[test]
    fn test_missing_directory_is_skipped() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, Path::new("no-such-dir")).unwrap();
        assert!(!table_exists(&conn, "bookings"));
    }
}
