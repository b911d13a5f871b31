//! The `config` subcommand.
//!
//! Runs before the configuration is loaded for other commands, so a broken
//! file can still be shown and diagnosed.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use super::ConfigCommand;
use crate::config::Config;
use crate::error::Result;

/// Run a `config` subcommand, writing its report to `out`.
///
/// `config_path` is the `--config` flag, if given.
///
/// # Errors
///
/// Returns an error if `show` cannot load the configuration, or if writing
/// to `out` fails. A failed `validate` is reported through the exit code.
pub fn run(config_path: Option<PathBuf>, cmd: ConfigCommand, out: &mut impl Write) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            } else {
                write_summary(&config, out)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            writeln!(out, "{}", path.display())?;
            Ok(ExitCode::SUCCESS)
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            writeln!(out, "Validating configuration: {}", path.display())?;
            if !path.exists() {
                writeln!(out, "No file at this path; defaults and environment apply.")?;
            }
            match Config::load_from(Some(path)) {
                Ok(_) => {
                    writeln!(out, "Configuration is valid.")?;
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    writeln!(out, "Configuration error: {e}")?;
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

fn write_summary(config: &Config, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Current Configuration")?;
    writeln!(out, "=====================")?;
    writeln!(out)?;
    writeln!(out, "[Storage]")?;
    writeln!(out, "  Database path:      {}", config.database_path().display())?;
    writeln!(out, "  Key:                {}", config.storage.key)?;
    writeln!(out)?;
    writeln!(out, "[Display]")?;
    writeln!(out, "  Locale:             {}", config.display.locale)?;
    match config.display.utc_offset_minutes {
        Some(minutes) => writeln!(out, "  UTC offset (min):   {minutes}")?,
        None => writeln!(out, "  UTC offset (min):   local")?,
    }
    writeln!(out, "  Author max chars:   {}", config.display.author_max_chars)?;
    Ok(())
}
