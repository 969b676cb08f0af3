use chrono::NaiveDate;
use thiserror::Error;

use crate::currency::{parse_amount, parse_date};
use crate::models::{ClassifiedTransaction, PaymentMethod, RawRow, TxnType};

/// Why a row was dropped instead of becoming a transaction. These are the
/// row-level tier: the batch keeps going, the caller tallies them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowSkip {
    #[error("internal transfer")]
    InternalTransfer,
    #[error("zero balance")]
    ZeroBalance,
    #[error("insufficient data")]
    InsufficientData,
    #[error("unclear type")]
    UnclearType,
    #[error("zero amount")]
    ZeroAmount,
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

// ---------------------------------------------------------------------------
// Rule tables
//
// Every keyword decision below is an ordered table checked first-match-wins
// against the lowercased description. Precedence lives in the row order, not
// in nesting, so shadowed entries are visible at a glance.
// ---------------------------------------------------------------------------

// Mixed debit+credit rows matching any of these are booked as income for the
// full debit amount, with the credit side discarded. Carried over from the
// source data's bookkeeping habits; there is no accounting justification on
// record for ignoring the credit leg.
const MIXED_INCOME_KEYWORDS: &[&str] =
    &["sisa dana", "setor", "pelunasan", "pengembalian", "reimburse"];

// Keyword fallbacks for rows with no recorded movement, where only the
// running saldo columns hint at the amount.
const SALDO_INCOME_KEYWORDS: &[&str] = &[
    "setor",
    "pendaftar",
    "pelunasan",
    "persembahan gereja",
    "pengembalian",
    "reimburse",
    "donasi",
    "penjualan",
    "penghasilan",
];

const SALDO_EXPENSE_KEYWORDS: &[&str] = &[
    "pembayaran",
    "pembelian",
    "bayar",
    "sewa",
    "honor",
    "fee",
    "transport",
    "konsum",
    "operasional",
    "gaji",
    "dp ",
    "pkt ",
];

// Canonical event names, matched against the cleaned source label. The
// spacing-free variants exist because the row parser strips spaces from the
// label before it gets here.
const EVENT_RULES: &[(fn(&str) -> bool, &str)] = &[
    (
        |s: &str| s.contains("retret") && s.contains("gabungan"),
        "Retret Gabungan KMD 2025",
    ),
    (|s: &str| s.contains("natal"), "Natal KPPM 2024"),
    (
        |s: &str| s.contains("kas kppm") || s.contains("kaskppm"),
        "Dana Kas KPPM",
    ),
    (|s: &str| s.contains("karpil"), "Karpil Cup"),
    (
        |s: &str| s.contains("dana usaha") || s.contains("danausaha"),
        "Dana Usaha KPPM",
    ),
    (|s: &str| s.contains("csr"), "CSR"),
];

// Category tables, keyed by the already-decided type. Each row is
// (any-of keywords, label); the first matching row wins. Note "persembahan"
// under PKT is shadowed by the Donasi row above it — kept as the books have
// always categorized it.
const EXPENSE_CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["sewa"], "Sewa"),
    (&["transport", "grab", "bensin"], "Transport"),
    (&["makan", "konsum", "bazar"], "Konsumsi"),
    (&["honor", "fee", "gaji", "wasit"], "Honor"),
    (&["peralatan", "barang", "belanja", "pembelian"], "Peralatan"),
    (&["perbaikan", "maintenance"], "Perbaikan"),
];
const OTHER_EXPENSE: &str = "Pengeluaran Lain";

const INCOME_CATEGORY_RULES: &[(&[&str], &str)] = &[
    (&["penjualan", "jualan"], "Penjualan"),
    (&["persembahan", "iuran", "donasi", "setor"], "Donasi"),
    (&["bazar"], "Bazar"),
    (&["ngamen"], "Ngamen"),
    (&["pkt", "persembahan"], "PKT"),
    (&["sisa dana", "pendaftar", "pelunasan"], "Pendapatan Khusus"),
];
const OTHER_INCOME: &str = "Pendapatan Lain";

fn contains_any(desc: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| desc.contains(k))
}

/// Canonicalize a free-text source label into the fund lookup key.
/// Unmatched labels pass through unchanged.
pub fn normalize_event_name(source: &str) -> String {
    let source = source.trim();
    let lower = source.to_lowercase();
    for (matches, canonical) in EVENT_RULES {
        if matches(&lower) {
            return (*canonical).to_string();
        }
    }
    source.to_string()
}

/// Pick a category label for a classified row from its description.
pub fn extract_category(description: &str, txn_type: TxnType) -> String {
    let desc = description.to_lowercase();
    let (rules, fallback) = match txn_type {
        TxnType::Expense => (EXPENSE_CATEGORY_RULES, OTHER_EXPENSE),
        TxnType::Income => (INCOME_CATEGORY_RULES, OTHER_INCOME),
    };
    for (keywords, label) in rules {
        if contains_any(&desc, keywords) {
            return (*label).to_string();
        }
    }
    fallback.to_string()
}

fn amount(raw: &str) -> f64 {
    // Malformed cells count as zero here; strict parsing is for callers
    // that need the distinction.
    parse_amount(raw).unwrap_or_default()
}

/// Decide type and amount for one row, or the reason it has neither.
///
/// Tier order: explicit movement first (pure debit, pure credit, mixed),
/// then the saldo-and-keyword fallback for rows where no movement was
/// recorded at all.
fn classify_movement(
    desc: &str,
    total_debit: f64,
    total_credit: f64,
    saldo_total: f64,
) -> Result<(TxnType, f64), RowSkip> {
    if total_debit > 0.0 && total_credit == 0.0 {
        return Ok((TxnType::Income, total_debit));
    }
    if total_credit > 0.0 && total_debit == 0.0 {
        return Ok((TxnType::Expense, total_credit));
    }
    if total_debit > 0.0 && total_credit > 0.0 {
        if contains_any(desc, MIXED_INCOME_KEYWORDS) {
            return Ok((TxnType::Income, total_debit));
        }
        if total_debit > total_credit {
            return Ok((TxnType::Income, total_debit - total_credit));
        }
        return Ok((TxnType::Expense, total_credit - total_debit));
    }

    // No movement recorded; fall back to the saldo columns.
    if total_debit == 0.0 && total_credit == 0.0 {
        if desc.contains("sisa dana") {
            // Opening balance carried forward.
            if saldo_total > 0.0 {
                return Ok((TxnType::Income, saldo_total));
            }
            return Err(RowSkip::ZeroBalance);
        }
        if contains_any(desc, SALDO_INCOME_KEYWORDS) {
            if saldo_total > 0.0 {
                return Ok((TxnType::Income, saldo_total));
            }
            return Err(RowSkip::InsufficientData);
        }
        if contains_any(desc, SALDO_EXPENSE_KEYWORDS) {
            if saldo_total > 0.0 {
                return Ok((TxnType::Expense, saldo_total));
            }
            return Err(RowSkip::InsufficientData);
        }
    }
    Err(RowSkip::UnclearType)
}

/// Turn one raw row into a transaction, or the reason it was skipped.
pub fn classify(row: &RawRow) -> Result<ClassifiedTransaction, RowSkip> {
    let date: NaiveDate =
        parse_date(&row.date).ok_or_else(|| RowSkip::InvalidDate(row.date.clone()))?;

    let desc = row.description.to_lowercase();

    // Internal transfers move money between rails of the same fund; booking
    // them would double-count. "Transfer Hadiah" is a real prize payout.
    if desc.contains("pindah saldo")
        || (desc.contains("transfer") && !desc.contains("transfer hadiah"))
    {
        return Err(RowSkip::InternalTransfer);
    }

    let debit_bank = amount(&row.debit_bank);
    let debit_cash = amount(&row.debit_cash);
    let credit_bank = amount(&row.credit_bank);
    let credit_cash = amount(&row.credit_cash);
    let saldo_bank = amount(&row.saldo_bank);
    let saldo_cash = amount(&row.saldo_cash);

    let (txn_type, amount) = classify_movement(
        &desc,
        debit_bank + debit_cash,
        credit_bank + credit_cash,
        saldo_bank + saldo_cash,
    )?;

    if amount <= 0.0 {
        return Err(RowSkip::ZeroAmount);
    }

    let payment_method = if debit_bank > 0.0 || credit_bank > 0.0 {
        PaymentMethod::Bank
    } else if saldo_bank > 0.0 && saldo_cash == 0.0 {
        PaymentMethod::Bank
    } else {
        PaymentMethod::Cash
    };

    let event_name = normalize_event_name(&row.source);
    let category = extract_category(&row.description, txn_type);

    Ok(ClassifiedTransaction {
        txn_type,
        amount,
        category,
        event_name,
        payment_method,
        description: row.description.clone(),
        date,
    })
}
