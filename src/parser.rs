use std::path::Path;

use csv::StringRecord;

use crate::currency::clean_currency;
use crate::error::Result;
use crate::models::RawRow;

// Fallback data offset when no "Tanggal" header row is found: the sheet
// normally opens with an empty row, a title, the main header and the
// Bank/Cash sub-header before data begins.
const DEFAULT_DATA_START: usize = 5;

// A data row carries date, description, four movement columns, two saldo
// columns, a spacer and the source label.
const MIN_FIELDS: usize = 11;

/// Lazy, forward-only stream of data rows from a cashflow sheet.
///
/// The sheet layout is located eagerly (the whole file is small and the
/// header scan needs to know whether "Tanggal" ever appears); rows are then
/// extracted one at a time. Blank separator rows and rows too short to hold
/// the full column set are dropped silently.
pub struct Rows {
    records: std::vec::IntoIter<StringRecord>,
}

impl Iterator for Rows {
    type Item = RawRow;

    fn next(&mut self) -> Option<RawRow> {
        for record in self.records.by_ref() {
            if record.len() < MIN_FIELDS {
                continue;
            }
            let date = record[1].trim();
            let description = record[2].trim();
            if date.is_empty() || description.is_empty() {
                continue;
            }
            return Some(RawRow {
                date: date.to_string(),
                description: description.to_string(),
                debit_bank: clean_currency(&record[3]),
                debit_cash: clean_currency(&record[4]),
                credit_bank: clean_currency(&record[5]),
                credit_cash: clean_currency(&record[6]),
                saldo_bank: clean_currency(&record[7]),
                saldo_cash: clean_currency(&record[8]),
                // The source label goes through the cleaner too, so spacing
                // variants collapse before event-name normalization.
                source: clean_currency(&record[10]),
            });
        }
        None
    }
}

/// Open a cashflow CSV and position past its multi-level header block.
pub fn read_rows(file_path: &Path) -> Result<Rows> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let mut records = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    // The main header row has "Tanggal" in its second column; data starts
    // two rows below it, past the Bank/Cash sub-header.
    let data_start = records
        .iter()
        .position(|r| r.len() > 1 && r[1].to_lowercase().contains("tanggal"))
        .map(|i| i + 2)
        .unwrap_or(DEFAULT_DATA_START);

    let records = if data_start < records.len() {
        records.split_off(data_start)
    } else {
        Vec::new()
    };

    Ok(Rows {
        records: records.into_iter(),
    })
}
