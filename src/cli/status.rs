use crate::db::get_connection;
use crate::error::Result;
use crate::settings::{db_path, load_settings};

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db = db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db.display());

    if db.exists() {
        let conn = get_connection(&db)?;

        let funds: i64 = conn.query_row("SELECT count(*) FROM funds", [], |r| r.get(0))?;
        let transactions: i64 =
            conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
        let users: i64 = conn.query_row("SELECT count(*) FROM users", [], |r| r.get(0))?;
        let imports: i64 = conn.query_row("SELECT count(*) FROM imports", [], |r| r.get(0))?;

        println!();
        println!("Funds:         {funds}");
        println!("Transactions:  {transactions}");
        println!("Users:         {users}");
        println!("Imports:       {imports}");
    } else {
        println!();
        println!("Database not found. Run `arus init` to set up.");
    }

    Ok(())
}
