use colored::Colorize;
use rusqlite::Connection;

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::rupiah;
use crate::settings::db_path;

// Amounts outside this band usually mean a mis-parsed row.
const MIN_PLAUSIBLE: f64 = 100.0;
const MAX_PLAUSIBLE: f64 = 100_000_000.0;

fn print_sample(conn: &Connection, label: &str, order: &str) -> Result<()> {
    let sql = format!(
        "SELECT date, event_name, amount, type, payment_method \
         FROM transactions ORDER BY date {order} LIMIT 5"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows: Vec<(String, String, f64, String, String)> = stmt
        .query_map([], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    println!("\n{label}:");
    for (date, event, amount, txn_type, method) in rows {
        println!("  {date} | {event} | {} | {txn_type} | {method}", rupiah(amount));
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let conn = get_connection(&db_path())?;

    let txns: i64 = conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
    let funds: i64 = conn.query_row("SELECT count(*) FROM funds", [], |r| r.get(0))?;

    println!("=== Database Summary ===");
    println!("Total Transactions: {txns}");
    println!("Total Funds: {funds}");

    let mut stmt = conn.prepare(
        "SELECT f.name, count(t.id) FROM funds f \
         LEFT JOIN transactions t ON t.fund_id = f.id \
         GROUP BY f.name ORDER BY f.name",
    )?;
    let per_fund: Vec<(String, i64)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    println!("\nFunds:");
    for (name, count) in per_fund {
        println!("  - {name} ({count} transactions)");
    }

    if txns > 0 {
        print_sample(&conn, "First 5 Transactions", "ASC")?;
        print_sample(&conn, "Last 5 Transactions", "DESC")?;
    }

    let mut stmt = conn.prepare(
        "SELECT date, description, amount, type FROM transactions \
         WHERE amount < ?1 OR amount > ?2",
    )?;
    let suspicious: Vec<(String, String, f64, String)> = stmt
        .query_map([MIN_PLAUSIBLE, MAX_PLAUSIBLE], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if suspicious.is_empty() {
        println!("\n{}", "All amounts look reasonable.".green());
    } else {
        println!(
            "\n{}",
            format!("Found {} transactions with unusual amounts:", suspicious.len()).yellow()
        );
        for (date, description, amount, txn_type) in suspicious {
            println!("  {date} | {description} | {} | {txn_type}", rupiah(amount));
        }
    }

    let income: f64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE type = 'income'",
        [],
        |r| r.get(0),
    )?;
    let expense: f64 = conn.query_row(
        "SELECT COALESCE(SUM(amount), 0) FROM transactions WHERE type = 'expense'",
        [],
        |r| r.get(0),
    )?;
    println!("\nTotal income:  {}", rupiah(income));
    println!("Total expense: {}", rupiah(expense));
    println!("Balance:       {}", rupiah(income - expense));

    Ok(())
}
