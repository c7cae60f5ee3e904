use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_lpl_core::ConsoleMap;
use retro_lpl_lib::Settings;

pub(crate) fn run_consoles(settings: &Settings) {
    let builtin = ConsoleMap::builtin();
    let consoles = settings.console_map();

    log::info!("Console folders:");
    log::info!("");

    let width = consoles.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, name) in consoles.iter() {
        let custom = builtin.lookup(key) != Some(name);
        log::info!(
            "  {}  {}{}",
            format!("{:<width$}", key).if_supports_color(Stdout, |t| t.bold()),
            name.if_supports_color(Stdout, |t| t.cyan()),
            if custom {
                format!(" {}", "(settings)".if_supports_color(Stdout, |t| t.green()))
            } else {
                String::new()
            },
        );
    }
}
