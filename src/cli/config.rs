//! CLI commands for configuration

use clap::Subcommand;

use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;

/// Config subcommands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ConfigCommands {
    /// Show configuration paths and current settings
    Show,

    /// Write config.json with the current settings
    Init {
        /// Replace an existing config.json with defaults
        #[arg(long)]
        force: bool,
    },
}

/// Handle config commands; no subcommand means `show`
pub fn handle_config_command(
    paths: &LedgerPaths,
    settings: &Settings,
    cmd: Option<ConfigCommands>,
) -> LedgerResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => print!("{}", describe(paths, settings)),
        ConfigCommands::Init { force } => {
            if paths.is_initialized() && !force {
                println!(
                    "Already initialized: {}",
                    paths.settings_file().display()
                );
                println!("Use --force to reset it to defaults.");
                return Ok(());
            }

            let to_write = if force {
                Settings::default()
            } else {
                settings.clone()
            };
            to_write.save(paths)?;
            println!("Wrote settings to: {}", paths.settings_file().display());
        }
    }

    Ok(())
}

/// Human-readable configuration listing
pub fn describe(paths: &LedgerPaths, settings: &Settings) -> String {
    let source = settings
        .default_source
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    let mut out = String::new();
    out.push_str("loan-ledger Configuration\n");
    out.push_str("=========================\n");
    out.push_str(&format!("Config directory: {}\n", paths.base_dir().display()));
    out.push_str(&format!(
        "Settings file:    {}{}\n",
        paths.settings_file().display(),
        if paths.is_initialized() {
            ""
        } else {
            " (not created; defaults in use)"
        }
    ));
    out.push('\n');
    out.push_str("Settings:\n");
    out.push_str(&format!("  Currency symbol:     {}\n", settings.currency_symbol));
    out.push_str(&format!("  Input date format:   {}\n", settings.input_date_format));
    out.push_str(&format!("  Display date format: {}\n", settings.display_date_format));
    out.push_str(&format!("  CSV delimiter:       {:?}\n", settings.csv_delimiter));
    out.push_str(&format!("  Default source:      {}\n", source));
    out.push_str(&format!("  Log level:           {}\n", settings.log_level));
    out.push_str(&format!("  Chart width:         {}\n", settings.chart_width));
    out
}
