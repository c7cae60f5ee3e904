use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_lpl_lib::Settings;

use crate::commands::update::run_update;
use crate::error::CliError;

/// Update playlists, then run the emulator with the media center paused.
///
/// Returns the emulator's exit code.
pub(crate) fn run_launch(settings: &Settings, skip_update: bool) -> Result<i32, CliError> {
    if !skip_update {
        run_update(settings)?;
    }

    // The terminal delivers SIGINT to the emulator too; the launcher stays
    // alive long enough to resume the media center.
    ctrlc::set_handler(|| log::warn!("Interrupted, waiting for the emulator to exit"))
        .map_err(|e| CliError::runtime(format!("Failed to set signal handler: {}", e)))?;

    let launch = settings.emulator_launch();
    let media_center = &settings.launcher.media_center;

    let status = {
        let _paused = media_center.pause();
        launch.run()
    }?;

    match status.code() {
        Some(0) => Ok(0),
        Some(code) => {
            log::warn!(
                "{} exited with code {}",
                launch.program.display(),
                code.if_supports_color(Stdout, |t| t.yellow()),
            );
            Ok(code)
        }
        None => {
            log::warn!("{} was terminated by a signal", launch.program.display());
            Ok(1)
        }
    }
}
