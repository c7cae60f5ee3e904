use std::time::{Duration, Instant};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_lpl_lib::{Settings, UpdateSummary, update_playlists};

use crate::error::CliError;

/// Purge and regenerate every playlist described by `settings`.
pub(crate) fn run_update(settings: &Settings) -> Result<UpdateSummary, CliError> {
    let options = settings.update_options();
    log::info!(
        "Scanning {}",
        options
            .roms_root
            .display()
            .if_supports_color(Stdout, |t| t.cyan()),
    );

    let rt = tokio::runtime::Runtime::new().map_err(|e| CliError::runtime(e.to_string()))?;
    let started = Instant::now();
    let summary = rt.block_on(update_playlists(&options))?;
    let elapsed = started.elapsed();

    if summary.purged > 0 {
        log::debug!("Removed {} old playlist(s)", summary.purged);
    }
    for path in &summary.written {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::info!("  {}", name.if_supports_color(Stdout, |t| t.bold()));
    }
    log::info!(
        "{} {}",
        "Done:".if_supports_color(Stdout, |t| t.green()),
        summary_line(&summary, elapsed),
    );

    Ok(summary)
}

/// `"<n> entries in <p> playlist(s) from <f> file(s)[, <s> skipped] in <t> seconds"`
fn summary_line(summary: &UpdateSummary, elapsed: Duration) -> String {
    let skipped = if summary.skipped > 0 {
        format!(", {} skipped", summary.skipped)
    } else {
        String::new()
    };
    format!(
        "{} entries in {} playlist(s) from {} file(s){} in {:.3} seconds",
        summary.entries,
        summary.written.len(),
        summary.files_seen,
        skipped,
        elapsed.as_secs_f64(),
    )
}
