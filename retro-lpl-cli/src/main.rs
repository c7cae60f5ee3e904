//! retro-lpl CLI
//!
//! Regenerates RetroArch playlists from a ROM folder tree and launches the
//! emulator.

mod cli_types;
mod commands;
mod error;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use retro_lpl_lib::{Settings, settings_path};

use crate::cli_types::{Cli, Commands, ConfigAction};
use crate::error::CliError;

fn init_logging(quiet: bool, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));
    if verbose {
        builder.format_timestamp_millis();
    } else {
        // Bare messages, no level or timestamp
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }
    builder.init();
}

fn load_settings(cli: &Cli) -> Result<(PathBuf, Settings), CliError> {
    let path = cli.config_file.clone().unwrap_or_else(settings_path);
    let mut settings = Settings::load(&path)?;
    if let Some(base) = &cli.base_dir {
        settings.paths.base_dir = Some(base.clone());
    }
    Ok((path, settings))
}

fn run(cli: Cli) -> Result<i32, CliError> {
    let (path, mut settings) = load_settings(&cli)?;

    match cli.command {
        Commands::Update { update } => {
            update.apply(&mut settings);
            settings.validate()?;
            commands::update::run_update(&settings)?;
            Ok(0)
        }
        Commands::Launch {
            update,
            emulator,
            emulator_config,
            skip_update,
        } => {
            update.apply(&mut settings);
            if let Some(emulator) = emulator {
                settings.launcher.emulator = emulator;
            }
            if let Some(config) = emulator_config {
                settings.launcher.config = config;
            }
            settings.validate()?;
            commands::launch::run_launch(&settings, skip_update)
        }
        Commands::Consoles => {
            commands::consoles::run_consoles(&settings);
            Ok(0)
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => commands::config::run_config_show(&path, &settings)?,
                ConfigAction::Path => commands::config::run_config_path(&path),
                ConfigAction::Init { force } => commands::config::run_config_init(&path, force)?,
            }
            Ok(0)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            log::error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
