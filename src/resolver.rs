use std::collections::HashMap;

use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::error::Result;

/// Well-known identifier for the user that historical imports are
/// attributed to.
pub const SYSTEM_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Maps canonical event names to fund ids for one import run, creating
/// funds on first reference. The memo keeps repeated names from hitting the
/// store again; lookups stay idempotent because fund names are unique.
pub struct FundResolver<'a> {
    conn: &'a Connection,
    cache: HashMap<String, Uuid>,
}

impl<'a> FundResolver<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            cache: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, fund_name: &str) -> Result<Uuid> {
        let name = fund_name.trim();
        let name = if name.is_empty() { "Default Fund" } else { name };

        if let Some(id) = self.cache.get(name) {
            return Ok(*id);
        }

        let existing: Option<String> = self
            .conn
            .query_row("SELECT id FROM funds WHERE name = ?1", [name], |row| {
                row.get(0)
            })
            .optional()?;

        let id = match existing {
            Some(id) => Uuid::parse_str(&id)
                .map_err(|e| crate::error::ArusError::Other(format!("bad fund id: {e}")))?,
            None => {
                let id = Uuid::new_v4();
                self.conn.execute(
                    "INSERT INTO funds (id, name, description) VALUES (?1, ?2, ?3)",
                    rusqlite::params![
                        id.to_string(),
                        name,
                        format!("Imported from CSV: {name}")
                    ],
                )?;
                id
            }
        };

        self.cache.insert(name.to_string(), id);
        Ok(id)
    }
}

/// Make sure the import attribution user exists before any row is written.
pub fn ensure_system_user(conn: &Connection, user_id: Uuid) -> Result<()> {
    let exists: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM users WHERE id = ?1",
            [user_id.to_string()],
            |row| row.get(0),
        )
        .optional()?;
    if exists.is_none() {
        conn.execute(
            "INSERT INTO users (id, name, email, role) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                user_id.to_string(),
                "System Admin",
                "system@admin.local",
                "admin"
            ],
        )?;
    }
    Ok(())
}
