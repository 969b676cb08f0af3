use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL DEFAULT 'member',
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS funds (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    status TEXT NOT NULL DEFAULT 'active',
    created_at TEXT DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS transactions (
    id TEXT PRIMARY KEY,
    fund_id TEXT NOT NULL,
    type TEXT NOT NULL,
    payment_method TEXT NOT NULL DEFAULT 'cash',
    amount REAL NOT NULL,
    category TEXT NOT NULL,
    description TEXT,
    event_name TEXT NOT NULL,
    date TEXT NOT NULL,
    created_by TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT DEFAULT (datetime('now')),
    FOREIGN KEY (fund_id) REFERENCES funds(id),
    FOREIGN KEY (created_by) REFERENCES users(id)
);

CREATE TABLE IF NOT EXISTS imports (
    id INTEGER PRIMARY KEY,
    filename TEXT NOT NULL,
    import_date TEXT DEFAULT (datetime('now')),
    row_count INTEGER,
    imported INTEGER,
    errors INTEGER,
    checksum TEXT
);
";

// (name, description)
const DEFAULT_FUNDS: &[(&str, &str)] = &[
    ("Kas Umum", "Dana operasional gereja"),
    ("Kas Ibadah", "Dana untuk keperluan ibadah"),
    ("Kas Sosial", "Dana untuk kegiatan sosial"),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM funds", [], |row| row.get(0))?;
    if count == 0 {
        for (name, description) in DEFAULT_FUNDS {
            conn.execute(
                "INSERT INTO funds (id, name, description) VALUES (?1, ?2, ?3)",
                rusqlite::params![uuid::Uuid::new_v4().to_string(), name, description],
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["users", "funds", "transactions", "imports"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
        let count: i64 = conn.query_row("SELECT count(*) FROM funds", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_init_db_seeds_funds() {
        let (_dir, conn) = test_db();
        let names: Vec<String> = conn
            .prepare("SELECT name FROM funds ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(names, vec!["Kas Ibadah", "Kas Sosial", "Kas Umum"]);
    }

    #[test]
    fn test_fund_names_are_unique() {
        let (_dir, conn) = test_db();
        let dup = conn.execute(
            "INSERT INTO funds (id, name) VALUES (?1, 'Kas Umum')",
            [uuid::Uuid::new_v4().to_string()],
        );
        assert!(dup.is_err());
    }
}
