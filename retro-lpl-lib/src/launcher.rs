//! Emulator handoff and media-center suspension.
//!
//! The launch sequence is: update playlists, pause the media center, run
//! the emulator to completion, resume the media center. Resumption is tied
//! to a guard's `Drop`, so it also happens when the emulator fails to start
//! or the launcher unwinds.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::LaunchError;

/// How the competing media-center process is paused and resumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaCenter {
    /// Leave it alone
    #[default]
    None,
    /// `systemctl stop` / `systemctl start` a unit
    Systemd {
        unit: String,
        /// Use the user service manager (`systemctl --user`)
        #[serde(default)]
        user: bool,
    },
    /// `pkill -STOP` / `pkill -CONT` a process by exact name
    Signal { process: String },
}

impl MediaCenter {
    pub fn pause_command(&self) -> Option<Command> {
        match self {
            Self::None => None,
            Self::Systemd { unit, user } => Some(systemctl(*user, "stop", unit)),
            Self::Signal { process } => Some(pkill("-STOP", process)),
        }
    }

    pub fn resume_command(&self) -> Option<Command> {
        match self {
            Self::None => None,
            Self::Systemd { unit, user } => Some(systemctl(*user, "start", unit)),
            Self::Signal { process } => Some(pkill("-CONT", process)),
        }
    }

    /// Pause the media center and return a guard that resumes it on drop.
    pub fn pause(&self) -> PausedMediaCenter<'_> {
        if let Some(cmd) = self.pause_command() {
            log::info!("Pausing media center ({})", self);
            run_control(cmd);
        }
        PausedMediaCenter { media_center: self }
    }
}

impl std::fmt::Display for MediaCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Systemd { unit, user: false } => write!(f, "systemd unit {}", unit),
            Self::Systemd { unit, user: true } => write!(f, "systemd user unit {}", unit),
            Self::Signal { process } => write!(f, "process {}", process),
        }
    }
}

/// Resumes the media center when dropped.
#[must_use = "the media center resumes as soon as the guard is dropped"]
pub struct PausedMediaCenter<'a> {
    media_center: &'a MediaCenter,
}

impl Drop for PausedMediaCenter<'_> {
    fn drop(&mut self) {
        if let Some(cmd) = self.media_center.resume_command() {
            log::info!("Resuming media center ({})", self.media_center);
            run_control(cmd);
        }
    }
}

fn systemctl(user: bool, action: &str, unit: &str) -> Command {
    let mut cmd = Command::new("systemctl");
    if user {
        cmd.arg("--user");
    }
    cmd.arg(action).arg(unit);
    cmd
}

fn pkill(signal: &str, process: &str) -> Command {
    let mut cmd = Command::new("pkill");
    cmd.arg(signal).arg("-x").arg(process);
    cmd
}

/// Run a control command, logging instead of failing. No retries.
fn run_control(mut cmd: Command) {
    let program = cmd.get_program().to_string_lossy().into_owned();
    match cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("{} exited with {}", program, status),
        Err(e) => log::warn!("Failed to run {}: {}", program, e),
    }
}

/// The emulator invocation: `<program> --config <config>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmulatorLaunch {
    pub program: PathBuf,
    pub config: PathBuf,
    /// Prepended to `LD_LIBRARY_PATH`
    pub library_dir: Option<PathBuf>,
}

impl EmulatorLaunch {
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--config").arg(&self.config);
        if let Some(lib) = &self.library_dir {
            cmd.env("LD_LIBRARY_PATH", library_path(lib, std::env::var_os("LD_LIBRARY_PATH")));
        }
        cmd
    }

    /// Run the emulator in the foreground and wait for it to exit.
    pub fn run(&self) -> Result<ExitStatus, LaunchError> {
        log::info!("Starting {}", self.program.display());
        self.command().status().map_err(|source| LaunchError::Spawn {
            program: self.program.clone(),
            source,
        })
    }
}

/// `lib` followed by any inherited search path entries.
fn library_path(lib: &std::path::Path, inherited: Option<OsString>) -> OsString {
    let mut paths = vec![lib.to_path_buf()];
    if let Some(existing) = inherited {
        paths.extend(std::env::split_paths(&existing).filter(|p| !p.as_os_str().is_empty()));
    }
    std::env::join_paths(paths).unwrap_or_else(|_| lib.as_os_str().to_owned())
}

#[cfg(test)]
#[path = "tests/launcher_tests.rs"]
mod tests;
