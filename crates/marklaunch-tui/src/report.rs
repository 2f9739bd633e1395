//! User-facing reports for errors and session outcomes.

use marklaunch_core::{Error, Outcome};
use std::fmt::Write as _;

/// A titled message with optional details, printed after the terminal is restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

impl Report {
    /// Report for an error that aborted startup or a launch.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let message = match err {
            Error::Usage(_) => {
                "Usage: marklaunch <foreground_exe> <x> <y> <width> <height>".to_string()
            }
            Error::ConfigNotFound { .. } => "Required file could not be found.".to_string(),
            Error::ConfigParse { .. } => {
                "Failed to parse bookmarks.yml due to invalid format.".to_string()
            }
            Error::Schema(_) => "Invalid configuration or input.".to_string(),
            Error::Io(_) => "Could not read the bookmark registry.".to_string(),
            Error::LaunchNotFound { path, .. } => format!(
                "Could not launch {}. Verify the executable path.",
                path.display()
            ),
            Error::LaunchSpawn { target, .. } => format!("Error launching {target}"),
        };

        Self {
            title: err.title().to_string(),
            message,
            details: Some(error_chain(err)),
        }
    }

    /// Report for anything outside the core error type.
    #[must_use]
    pub fn unexpected(err: &anyhow::Error) -> Self {
        if let Some(core) = err.downcast_ref::<Error>() {
            return Self::from_error(core);
        }
        Self {
            title: "Unexpected Error".to_string(),
            message: "An unexpected error occurred while running the launcher.".to_string(),
            details: Some(format!("{err:#}")),
        }
    }

    #[must_use]
    pub fn no_match(identifier: &str) -> Self {
        Self {
            title: "No matching category".to_string(),
            message: format!("No category found for EXE: {identifier}"),
            details: None,
        }
    }

    /// Report for a finished session; only failed launches produce one.
    #[must_use]
    pub fn from_outcome(outcome: &Outcome) -> Option<Self> {
        match outcome {
            Outcome::LaunchFailed { error, .. } => Some(Self::from_error(error)),
            Outcome::Launched(_) | Outcome::Cancelled | Outcome::FocusTimeout => None,
        }
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.title, self.message)?;
        if let Some(details) = &self.details {
            write!(f, "\n\nDetails:\n{details}")?;
        }
        Ok(())
    }
}

/// Error message followed by each underlying cause.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\n  caused by: {cause}");
        source = cause.source();
    }
    out
}
