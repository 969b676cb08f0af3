use rusqlite::Connection;

use crate::error::Result;

pub struct FundTotals {
    pub fund: String,
    pub income: f64,
    pub expense: f64,
    pub txn_count: i64,
}

impl FundTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

pub struct SummaryReport {
    pub funds: Vec<FundTotals>,
    pub total_income: f64,
    pub total_expense: f64,
}

/// Per-fund income/expense totals, optionally restricted to one year.
pub fn fund_summary(conn: &Connection, year: Option<i32>) -> Result<SummaryReport> {
    let (clause, params) = match year {
        Some(y) => ("WHERE t.date LIKE ?1", vec![format!("{y}%")]),
        None => ("", Vec::new()),
    };

    let sql = format!(
        "SELECT f.name, \
                COALESCE(SUM(CASE WHEN t.type = 'income' THEN t.amount END), 0), \
                COALESCE(SUM(CASE WHEN t.type = 'expense' THEN t.amount END), 0), \
                COUNT(t.id) \
         FROM funds f JOIN transactions t ON t.fund_id = f.id \
         {clause} \
         GROUP BY f.name ORDER BY f.name"
    );
    let mut stmt = conn.prepare(&sql)?;
    let param_values: Vec<&dyn rusqlite::types::ToSql> = params
        .iter()
        .map(|p| p as &dyn rusqlite::types::ToSql)
        .collect();
    let funds = stmt
        .query_map(param_values.as_slice(), |row| {
            Ok(FundTotals {
                fund: row.get(0)?,
                income: row.get(1)?,
                expense: row.get(2)?,
                txn_count: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let total_income: f64 = funds.iter().map(|f| f.income).sum();
    let total_expense: f64 = funds.iter().map(|f| f.expense).sum();

    Ok(SummaryReport {
        funds,
        total_income,
        total_expense,
    })
}
