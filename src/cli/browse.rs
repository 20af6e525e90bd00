//! Interactive dashboard browsing
//!
//! Reads commands line by line and answers each selected date with a
//! freshly generated dashboard. The ledger comes from the cache, so repeated
//! dates cost no re-read unless the file changes or `reload` is issued.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::parse_date_arg;
use crate::config::Settings;
use crate::error::LedgerResult;
use crate::models::Ledger;
use crate::reports::{Dashboard, Report};
use crate::services::{ImportService, LedgerCache};

const HELP: &str = "\
Commands:
  YYYY-MM-DD   show the dashboard for that date
  dates        list the dates present in the ledger
  reload       re-read the ledger from disk
  help         show this message
  quit, exit   leave (end of input also leaves)
";

/// Run the browse loop until `quit`, `exit` or end of input
///
/// Load failures after the initial load are reported and the loop keeps
/// going, so a half-saved ledger file does not end the session.
pub fn run_browse<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    source: &Path,
    cache: &mut LedgerCache,
    loader: &ImportService,
    settings: &Settings,
) -> LedgerResult<()> {
    let ledger = cache.get_or_load(source, loader)?;
    let start = Dashboard::default_date(&ledger, chrono::Local::now().date_naive());

    writeln!(
        output,
        "Loaded {} records from {}",
        ledger.len(),
        source.display()
    )?;
    write!(
        output,
        "{}",
        Dashboard::generate(&ledger, start).format_terminal(settings)
    )?;
    writeln!(output, "\nEnter a date (YYYY-MM-DD) or 'help'.")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        debug!(command, "Browse command");

        match command.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => write!(output, "{}", HELP)?,
            "dates" => {
                if let Some(ledger) = current_ledger(output, source, cache, loader)? {
                    let dates = ledger.dates();
                    if dates.is_empty() {
                        writeln!(output, "Ledger has no records.")?;
                    }
                    for date in dates {
                        writeln!(output, "{}", date)?;
                    }
                }
            }
            "reload" => {
                cache.invalidate(source);
                if let Some(ledger) = current_ledger(output, source, cache, loader)? {
                    writeln!(output, "Reloaded {} records.", ledger.len())?;
                }
            }
            _ => match parse_date_arg(command, "dashboard") {
                Ok(date) => {
                    if let Some(ledger) = current_ledger(output, source, cache, loader)? {
                        write!(
                            output,
                            "{}",
                            Dashboard::generate(&ledger, date).format_terminal(settings)
                        )?;
                    }
                }
                Err(e) => writeln!(output, "{}", e)?,
            },
        }
        output.flush()?;
    }

    Ok(())
}

/// The cached ledger, or `None` after printing why it could not be loaded
fn current_ledger<W: Write>(
    output: &mut W,
    source: &Path,
    cache: &mut LedgerCache,
    loader: &ImportService,
) -> LedgerResult<Option<Arc<Ledger>>> {
    match cache.get_or_load(source, loader) {
        Ok(ledger) => Ok(Some(ledger)),
        Err(e) => {
            writeln!(output, "Error: {}", e)?;
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const LEDGER: &str = "\
Date,Name of Customer,Frequency,Debit,Collection,Interest Paid,Overdue Flag
2024-01-01,Asha,Weekly,100,80,5,Overdue
2024-01-01,Ravi,Daily,50,20,2,Not Overdue
2024-01-02,Ravi,Daily,10,10,1,Not Overdue
";

    fn browse(dir: &TempDir, script: &str) -> (String, LedgerCache) {
        let path = dir.path().join("ledger.csv");
        if !path.exists() {
            fs::write(&path, LEDGER).unwrap();
        }

        let mut cache = LedgerCache::new();
        let mut out = Vec::new();
        run_browse(
            script.as_bytes(),
            &mut out,
            &path,
            &mut cache,
            &ImportService::default(),
            &Settings::default(),
        )
        .unwrap();
        (String::from_utf8(out).unwrap(), cache)
    }

    #[test]
    fn test_starts_on_earliest_date() {
        let dir = TempDir::new().unwrap();
        let (out, cache) = browse(&dir, "");

        assert!(out.starts_with("Loaded 3 records from"));
        assert!(out.contains("Summary for January 01, 2024"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_commands() {
        let dir = TempDir::new().unwrap();
        let (out, _) = browse(&dir, "dates\n2024-01-02\nnot-a-date\nhelp\nreload\n");

        assert!(out.contains("2024-01-01\n2024-01-02\n"));
        assert!(out.contains("Summary for January 02, 2024"));
        assert!(out.contains("Invalid dashboard date format: not-a-date"));
        assert!(out.contains("Commands:"));
        assert!(out.contains("Reloaded 3 records."));
    }

    #[test]
    fn test_quit_stops_reading() {
        let dir = TempDir::new().unwrap();
        let (out, _) = browse(&dir, "quit\n2024-01-02\n");
        assert!(!out.contains("Summary for January 02, 2024"));
    }

    #[test]
    fn test_initial_load_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.csv");
        fs::write(&path, "Date,Frequency\n").unwrap();

        let mut cache = LedgerCache::new();
        let mut out = Vec::new();
        let result = run_browse(
            "help\n".as_bytes(),
            &mut out,
            &path,
            &mut cache,
            &ImportService::default(),
            &Settings::default(),
        );
        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
