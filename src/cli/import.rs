use std::path::PathBuf;

use uuid::Uuid;

use crate::db::get_connection;
use crate::error::{ArusError, Result};
use crate::importer::import_file;
use crate::resolver::SYSTEM_USER_ID;
use crate::settings::db_path;

pub fn run(file: &str, user: Option<&str>) -> Result<()> {
    let file_path = PathBuf::from(file);
    let user_id = Uuid::parse_str(user.unwrap_or(SYSTEM_USER_ID))
        .map_err(|e| ArusError::Other(format!("invalid user id: {e}")))?;

    let conn = get_connection(&db_path())?;
    let summary = import_file(&conn, &file_path, user_id)?;

    println!();
    println!("Imported: {}", summary.imported);
    println!("Errors:   {}", summary.errors);
    println!("Total:    {}", summary.imported + summary.errors);

    // Already-committed rows stay committed; a non-zero tally is still a
    // partial failure worth a non-zero exit.
    if summary.errors > 0 {
        return Err(ArusError::PartialImport(summary.errors));
    }
    Ok(())
}
