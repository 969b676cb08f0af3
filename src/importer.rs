use std::path::Path;

use colored::Colorize;
use rusqlite::Connection;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::classify::classify;
use crate::error::Result;
use crate::models::ClassifiedTransaction;
use crate::parser::read_rows;
use crate::resolver::{ensure_system_user, FundResolver};

pub struct ImportSummary {
    pub imported: usize,
    pub errors: usize,
}

fn compute_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

fn insert_transaction(
    conn: &Connection,
    txn: &ClassifiedTransaction,
    fund_id: Uuid,
    created_by: Uuid,
) -> Result<()> {
    conn.execute(
        "INSERT INTO transactions \
         (id, fund_id, type, payment_method, amount, category, description, event_name, date, created_by, status) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 'approved')",
        rusqlite::params![
            Uuid::new_v4().to_string(),
            fund_id.to_string(),
            txn.txn_type.as_str(),
            txn.payment_method.as_str(),
            txn.amount,
            txn.category,
            txn.description,
            txn.event_name,
            txn.date.format("%Y-%m-%d").to_string(),
            created_by.to_string(),
        ],
    )?;
    Ok(())
}

/// Bulk-import a historical cashflow sheet.
///
/// Row failures are tallied and logged, never fatal; the batch always runs
/// to the end. Imported rows land directly in `approved` status since the
/// old books are trusted by convention. Re-running the same file creates
/// the transactions again — only fund resolution is idempotent.
pub fn import_file(conn: &Connection, file_path: &Path, user_id: Uuid) -> Result<ImportSummary> {
    let rows = read_rows(file_path)?;

    ensure_system_user(conn, user_id)?;

    let mut resolver = FundResolver::new(conn);
    let mut imported = 0usize;
    let mut errors = 0usize;
    let mut row_count = 0usize;

    for row in rows {
        row_count += 1;
        let txn = match classify(&row) {
            Ok(txn) => txn,
            Err(skip) => {
                eprintln!(
                    "{} {} ({skip})",
                    "skipped:".yellow(),
                    row.description
                );
                errors += 1;
                continue;
            }
        };
        let fund_id = match resolver.resolve(&txn.event_name) {
            Ok(id) => id,
            Err(e) => {
                eprintln!(
                    "{} fund '{}' for '{}': {e}",
                    "failed:".red(),
                    txn.event_name,
                    row.description
                );
                errors += 1;
                continue;
            }
        };
        if let Err(e) = insert_transaction(conn, &txn, fund_id, user_id) {
            eprintln!("{} '{}': {e}", "failed:".red(), row.description);
            errors += 1;
            continue;
        }
        imported += 1;
        if imported % 50 == 0 {
            println!("Imported {imported} transactions...");
        }
    }

    let checksum = compute_checksum(file_path)?;
    conn.execute(
        "INSERT INTO imports (filename, row_count, imported, errors, checksum) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            file_path.file_name().and_then(|n| n.to_str()).unwrap_or(""),
            row_count as i64,
            imported as i64,
            errors as i64,
            checksum,
        ],
    )?;

    Ok(ImportSummary { imported, errors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{get_connection, init_db};
    use crate::resolver::SYSTEM_USER_ID;
    use std::path::PathBuf;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    fn system_user() -> Uuid {
        Uuid::parse_str(SYSTEM_USER_ID).unwrap()
    }

    // (date, description, debit_bank, debit_cash, credit_bank, credit_cash,
    //  saldo_bank, saldo_cash, source)
    fn write_cashflow(
        dir: &Path,
        name: &str,
        rows: &[(&str, &str, &str, &str, &str, &str, &str, &str, &str)],
    ) -> PathBuf {
        let path = dir.join(name);
        let mut content = String::from(
            ",Cashflow Utama,,,,,,,,,\n\
             ,Tanggal,Keterangan,Debit,,Kredit,,Saldo,,,Sumber\n\
             ,,,Bank,Cash,Bank,Cash,Bank,Cash,,\n",
        );
        for r in rows {
            content.push_str(&format!(
                ",{},{},{},{},{},{},{},{},,{}\n",
                r.0, r.1, r.2, r.3, r.4, r.5, r.6, r.7, r.8
            ));
        }
        std::fs::write(&path, &content).unwrap();
        path
    }

    #[test]
    fn test_import_counts_and_store_contents() {
        let (dir, conn) = test_db();
        let path = write_cashflow(dir.path(), "cashflow.csv", &[
            ("01/07/25", "Iuran anggota", "", "Rp 50.000", "", "", "", "", "Karpil Cup"),
            ("02/07/25", "Pembayaran sewa lapangan", "", "", "Rp 150.000", "", "", "", "Karpil Cup"),
            ("03/07/25", "Transfer ke BCA", "Rp 500.000", "", "", "", "", "", "Karpil Cup"),
            ("04/07/25", "Catatan rapat", "", "", "", "", "", "", "Karpil Cup"),
            ("05/07/25", "Donasi natal", "Rp 200.000", "", "", "", "", "", "Natal KPPM"),
        ]);

        let summary = import_file(&conn, &path, system_user()).unwrap();
        assert_eq!(summary.imported, 3);
        assert_eq!(summary.errors, 2);

        let txns: i64 = conn
            .query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(txns, 3);

        // 3 seeded funds plus the two referenced by classified rows.
        let funds: i64 = conn.query_row("SELECT count(*) FROM funds", [], |r| r.get(0)).unwrap();
        assert_eq!(funds, 5);

        let statuses: i64 = conn
            .query_row(
                "SELECT count(*) FROM transactions WHERE status = 'approved'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(statuses, 3);
    }

    #[test]
    fn test_import_creates_system_user() {
        let (dir, conn) = test_db();
        let path = write_cashflow(dir.path(), "cashflow.csv", &[
            ("01/07/25", "Iuran anggota", "", "Rp 50.000", "", "", "", "", "Kas KPPM"),
        ]);
        import_file(&conn, &path, system_user()).unwrap();
        let created_by: String = conn
            .query_row("SELECT created_by FROM transactions LIMIT 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(created_by, SYSTEM_USER_ID);
        let email: String = conn
            .query_row("SELECT email FROM users WHERE id = ?1", [SYSTEM_USER_ID], |r| r.get(0))
            .unwrap();
        assert_eq!(email, "system@admin.local");
    }

    #[test]
    fn test_import_normalizes_event_to_fund() {
        let (dir, conn) = test_db();
        let path = write_cashflow(dir.path(), "cashflow.csv", &[
            ("01/07/25", "Iuran anggota", "", "Rp 50.000", "", "", "", "", "Kas KPPM"),
            ("02/07/25", "Donasi jemaat", "", "Rp 25.000", "", "", "", "", "kaskppm"),
        ]);
        let summary = import_file(&conn, &path, system_user()).unwrap();
        assert_eq!(summary.imported, 2);
        // Both spellings normalize to one canonical fund.
        let count: i64 = conn
            .query_row("SELECT count(*) FROM funds WHERE name = 'Dana Kas KPPM'", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
        let attributed: i64 = conn
            .query_row(
                "SELECT count(*) FROM transactions t JOIN funds f ON t.fund_id = f.id \
                 WHERE f.name = 'Dana Kas KPPM'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(attributed, 2);
    }

    #[test]
    fn test_import_records_audit_row() {
        let (dir, conn) = test_db();
        let path = write_cashflow(dir.path(), "juli.csv", &[
            ("01/07/25", "Iuran anggota", "", "Rp 50.000", "", "", "", "", "Kas KPPM"),
            ("02/07/25", "Catatan rapat", "", "", "", "", "", "", "Kas KPPM"),
        ]);
        import_file(&conn, &path, system_user()).unwrap();
        let (filename, rows, imported, errors, checksum): (String, i64, i64, i64, String) = conn
            .query_row(
                "SELECT filename, row_count, imported, errors, checksum FROM imports LIMIT 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
            )
            .unwrap();
        assert_eq!(filename, "juli.csv");
        assert_eq!(rows, 2);
        assert_eq!(imported, 1);
        assert_eq!(errors, 1);
        assert_eq!(checksum.len(), 64);
    }

    #[test]
    fn test_rerun_duplicates_transactions_not_funds() {
        let (dir, conn) = test_db();
        let path = write_cashflow(dir.path(), "cashflow.csv", &[
            ("01/07/25", "Iuran anggota", "", "Rp 50.000", "", "", "", "", "Karpil Cup"),
        ]);
        import_file(&conn, &path, system_user()).unwrap();
        import_file(&conn, &path, system_user()).unwrap();
        let txns: i64 = conn
            .query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))
            .unwrap();
        assert_eq!(txns, 2);
        let funds: i64 = conn
            .query_row("SELECT count(*) FROM funds WHERE name = 'Karpil Cup'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(funds, 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let (_dir, conn) = test_db();
        let result = import_file(&conn, Path::new("/nonexistent.csv"), system_user());
        assert!(result.is_err());
    }
}
