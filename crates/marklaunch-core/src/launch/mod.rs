//! Launch dispatch: turns a confirmed bookmark into a handler process.
//!
//! The target is always passed as one literal argument. No shell is involved,
//! so a target such as `a; rm -rf ~` reaches the handler unchanged.

mod target;

pub use target::normalize_target;

use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// Two-element command: handler executable and its single argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub argument: String,
}

impl LaunchCommand {
    /// Command for opening `target` with `handler`; the target is normalized.
    #[must_use]
    pub fn new(handler: impl Into<PathBuf>, target: &str) -> Self {
        Self {
            program: handler.into(),
            argument: normalize_target(target),
        }
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program.display(), self.argument)
    }
}

/// Process boundary. Implementations start the program without waiting on it.
pub trait Spawner {
    /// # Errors
    ///
    /// Returns the spawn-time error; `NotFound` means the executable is missing.
    fn spawn(&self, command: &LaunchCommand) -> std::io::Result<()>;
}

/// Spawns real processes with all I/O redirected to null (fire and forget).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn spawn(&self, command: &LaunchCommand) -> std::io::Result<()> {
        let child = Command::new(&command.program)
            .arg(&command.argument)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        info!("Spawned pid {} for {command}", child.id());
        Ok(())
    }
}

/// Hand `command` to `spawner`, classifying spawn failures.
///
/// # Errors
///
/// Returns `LaunchNotFound` when the handler executable does not exist and
/// `LaunchSpawn` for any other spawn failure.
pub fn dispatch<S: Spawner + ?Sized>(spawner: &S, command: &LaunchCommand) -> Result<()> {
    info!("Launching {command}");
    spawner.spawn(command).map_err(|source| {
        warn!("Launch of {command} failed: {source}");
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::LaunchNotFound {
                path: command.program.clone(),
                source,
            }
        } else {
            Error::LaunchSpawn {
                target: command.argument.clone(),
                source,
            }
        }
    })
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingSpawner;
    use super::*;

    #[test]
    fn test_dispatch_passes_target_literally() {
        let spawner = RecordingSpawner::default();
        let cmd = LaunchCommand::new("/bin/h", "http://a?q=1&x=$(id)");

        dispatch(&spawner, &cmd).unwrap();

        let calls = spawner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, PathBuf::from("/bin/h"));
        assert_eq!(calls[0].argument, "http://a?q=1&x=$(id)");
    }

    #[test]
    fn test_dispatch_not_found() {
        let spawner = RecordingSpawner::failing(std::io::ErrorKind::NotFound);
        let err = dispatch(&spawner, &LaunchCommand::new("/bin/missing", "x")).unwrap_err();

        assert!(matches!(err, Error::LaunchNotFound { ref path, .. } if path == &PathBuf::from("/bin/missing")));
    }

    #[test]
    fn test_dispatch_other_failure() {
        let spawner = RecordingSpawner::failing(std::io::ErrorKind::PermissionDenied);
        let err = dispatch(&spawner, &LaunchCommand::new("/bin/h", "x")).unwrap_err();

        assert!(matches!(err, Error::LaunchSpawn { ref target, .. } if target == "x"));
    }

    #[test]
    fn test_command_normalizes_path_targets() {
        let cmd = LaunchCommand::new("/usr/bin/open", "/srv//docs/./a/../b");
        assert_eq!(cmd.argument, "/srv/docs/b");
        assert_eq!(cmd.to_string(), "/usr/bin/open /srv/docs/b");
    }

    #[test]
    fn test_process_spawner_missing_executable() {
        let cmd = LaunchCommand::new("/nonexistent/marklaunch-handler-xyz", "x");
        let err = dispatch(&ProcessSpawner, &cmd).unwrap_err();
        assert!(matches!(err, Error::LaunchNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_spawner_starts_program() {
        let cmd = LaunchCommand::new("/bin/sh", "/dev/null");
        assert!(dispatch(&ProcessSpawner, &cmd).is_ok());
    }
}
