pub mod funds;
pub mod import;
pub mod init;
pub mod report;
pub mod status;
pub mod verify;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arus", about = "Fund-ledger bookkeeping CLI for church treasuries.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up Arus: choose a data directory and initialize the database.
    Init {
        /// Path for Arus data (default: ~/Documents/arus)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Bulk-import a historical cashflow CSV export.
    Import {
        /// Path to the cashflow CSV file
        file: String,
        /// User id the imported rows are attributed to
        /// (default: the fixed system import user)
        #[arg(long)]
        user: Option<String>,
    },
    /// Manage funds.
    Funds {
        #[command(subcommand)]
        command: FundsCommands,
    },
    /// Generate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Show current database and summary statistics.
    Status,
    /// Sanity-check imported data: counts, date range, unusual amounts.
    Verify,
}

#[derive(Subcommand)]
pub enum FundsCommands {
    /// List all funds.
    List,
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Per-fund income/expense/net totals.
    Summary {
        /// Year filter: YYYY
        #[arg(long)]
        year: Option<i32>,
    },
}
