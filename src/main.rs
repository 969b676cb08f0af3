mod classify;
mod cli;
mod currency;
mod db;
mod error;
mod fmt;
mod importer;
mod models;
mod parser;
mod reports;
mod resolver;
mod settings;

use clap::Parser;

use cli::{Cli, Commands, FundsCommands, ReportCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import { file, user } => cli::import::run(&file, user.as_deref()),
        Commands::Funds { command } => match command {
            FundsCommands::List => cli::funds::list(),
        },
        Commands::Report { command } => match command {
            ReportCommands::Summary { year } => cli::report::summary(year),
        },
        Commands::Status => cli::status::run(),
        Commands::Verify => cli::verify::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
