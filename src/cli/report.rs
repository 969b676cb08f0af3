use comfy_table::{Cell, CellAlignment, Table};

use crate::db::get_connection;
use crate::error::Result;
use crate::fmt::rupiah;
use crate::reports::fund_summary;
use crate::settings::db_path;

pub fn summary(year: Option<i32>) -> Result<()> {
    let conn = get_connection(&db_path())?;
    let report = fund_summary(&conn, year)?;

    let mut table = Table::new();
    table.set_header(vec!["Fund", "Income", "Expense", "Net", "Txns"]);
    for fund in &report.funds {
        table.add_row(vec![
            Cell::new(&fund.fund),
            Cell::new(rupiah(fund.income)).set_alignment(CellAlignment::Right),
            Cell::new(rupiah(fund.expense)).set_alignment(CellAlignment::Right),
            Cell::new(rupiah(fund.net())).set_alignment(CellAlignment::Right),
            Cell::new(fund.txn_count).set_alignment(CellAlignment::Right),
        ]);
    }

    match year {
        Some(y) => println!("Fund Summary — {y}\n{table}"),
        None => println!("Fund Summary\n{table}"),
    }
    println!(
        "Total income:  {}\nTotal expense: {}\nNet:           {}",
        rupiah(report.total_income),
        rupiah(report.total_expense),
        rupiah(report.total_income - report.total_expense),
    );
    Ok(())
}
