use comfy_table::{Cell, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::settings::db_path;

pub fn list() -> Result<()> {
    let conn = get_connection(&db_path())?;
    let mut stmt =
        conn.prepare("SELECT name, description, status FROM funds ORDER BY name")?;
    let rows: Vec<(String, Option<String>, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(vec!["Name", "Description", "Status"]);
    for (name, description, status) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(description.unwrap_or_default()),
            Cell::new(status),
        ]);
    }
    println!("Funds\n{table}");
    Ok(())
}
