use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_lpl_lib::Settings;

use crate::error::CliError;

/// Show the settings file location and the effective settings.
pub(crate) fn run_config_show(path: &Path, settings: &Settings) -> Result<(), CliError> {
    log::info!(
        "{}",
        "retro-lpl Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    let options = settings.update_options();
    log::info!("");
    log::info!("  ROMs:        {}", options.roms_root.display());
    log::info!("  Thumbnails:  {}", options.thumbnails_root.display());
    log::info!("  Playlists:   {}", options.playlists_root.display());
    log::info!("  Workers:     {}", options.worker_count());
    log::info!("");

    for line in settings.to_toml_string()?.lines() {
        log::info!("  {}", line);
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path(path: &Path) {
    println!("{}", path.display());
}

/// Write a settings file holding the defaults.
pub(crate) fn run_config_init(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Settings::default().save(path)?;
    log::info!(
        "{} {}",
        "Wrote".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("retro-lpl").join("settings.toml");

        run_config_init(&path, false).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[matching]\nthreshold = 0.5\n").unwrap();

        assert!(matches!(
            run_config_init(&path, false),
            Err(CliError::Config(_))
        ));
        assert_eq!(Settings::load(&path).unwrap().matching.threshold, 0.5);

        run_config_init(&path, true).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }
}
