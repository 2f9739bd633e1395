//! CLI argument parsing for marklaunch.

use clap::Parser;
use clap::error::ErrorKind;
use marklaunch_core::Error;
use marklaunch_core::session::DEFAULT_GRACE;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "marklaunch")]
#[command(
    about = "Typeahead bookmark picker for the foreground application",
    version,
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Foreground application identifier, matched against handler keys
    pub foreground: String,

    /// Picker column inside the terminal
    pub x: i32,

    /// Picker row inside the terminal
    pub y: i32,

    /// Picker width in columns
    pub width: i32,

    /// Picker height in rows
    pub height: i32,

    /// Read bookmarks from PATH instead of bookmarks.yml next to the binary
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Initial query text
    #[arg(long, default_value = "")]
    pub query: String,

    /// How long focus may be lost before the picker closes
    #[arg(long, value_name = "MS", default_value_t = default_grace_ms())]
    pub grace_ms: u64,

    /// Print the filtered bookmarks as JSON lines instead of opening the picker
    #[arg(long)]
    pub print: bool,

    /// Enable debug logging (logs to the temp dir as marklaunch.log)
    #[arg(short, long)]
    pub debug: bool,
}

/// Outcome of argument parsing that did not produce a [`Cli`].
#[derive(Debug)]
pub enum CliExit {
    /// `--help` or `--version`; clap prints it and exits 0.
    Informational(clap::Error),
    Usage(Error),
}

impl Cli {
    /// Parse `args`, mapping every parse failure to a usage error.
    ///
    /// # Errors
    ///
    /// Returns `CliExit::Usage` for wrong argument counts or non-integer
    /// geometry, and `CliExit::Informational` for help/version requests.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, CliExit>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|err| match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => CliExit::Informational(err),
            _ => CliExit::Usage(Error::Usage(err.render().to_string().trim_end().to_string())),
        })
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }
}

fn default_grace_ms() -> u64 {
    u64::try_from(DEFAULT_GRACE.as_millis()).unwrap_or(u64::MAX)
}

/// Requested picker placement, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    /// Clamp the requested placement into `area`.
    ///
    /// Falls back to the whole `area` when nothing of the request is visible.
    #[must_use]
    pub fn viewport(&self, area: Rect) -> Rect {
        let cells = |v: i32| u16::try_from(v.max(0)).unwrap_or(u16::MAX);

        let x = cells(self.x).min(area.width);
        let y = cells(self.y).min(area.height);
        let width = cells(self.width).min(area.width - x);
        let height = cells(self.height).min(area.height - y);

        if width == 0 || height == 0 {
            return area;
        }
        Rect::new(area.x + x, area.y + y, width, height)
    }
}
