use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use loan_ledger::cli::{
    handle_config_command, handle_report_command, resolve_source, run_browse, ConfigCommands,
    ReportCommands,
};
use loan_ledger::config::{LedgerPaths, Settings};
use loan_ledger::logging::init_tracing;
use loan_ledger::services::{ImportOptions, ImportService, LedgerCache};

#[derive(Parser)]
#[command(
    name = "loanledger",
    version,
    about = "Daily loan and interest reports from a transaction ledger",
    long_about = "loanledger reads a loan ledger (a \"Transactions\" sheet saved as CSV, \
                  or a JSON array of records) and reports daily totals, overdue \
                  customers, interest by payment frequency and the collection trend."
)]
struct Cli {
    /// Ledger file (.xlsx, .xls, .ods, .csv, .tsv or .json); defaults to
    /// default_source in config.json
    #[arg(short, long, global = true, env = "LOAN_LEDGER_FILE")]
    file: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Report(ReportCommands),

    /// Pick dates interactively and see the dashboard for each
    Browse,

    /// Show or initialize configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings.log_level, cli.verbose);

    let loader = ImportService::new(ImportOptions::from_settings(&settings));
    let mut cache = LedgerCache::new();

    match cli.command {
        Some(Commands::Report(cmd)) => {
            let source = resolve_source(cli.file, &settings)?;
            let ledger = cache.get_or_load(&source, &loader)?;
            handle_report_command(&ledger, &settings, cmd)?;
        }
        Some(Commands::Browse) => {
            let source = resolve_source(cli.file, &settings)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_browse(
                stdin.lock(),
                &mut stdout.lock(),
                &source,
                &mut cache,
                &loader,
                &settings,
            )?;
        }
        Some(Commands::Config { action }) => {
            handle_config_command(&paths, &settings, action)?;
        }
        None => {
            println!("loanledger - daily loan and interest reports");
            println!();
            println!("Run 'loanledger --help' for usage information.");
            println!("Run 'loanledger dashboard --file <PATH>' to see every report at once.");
        }
    }

    Ok(())
}
