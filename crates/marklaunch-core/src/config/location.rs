use crate::error::Result;
use std::path::{Path, PathBuf};

/// File name of the bookmark registry.
pub const REGISTRY_FILE: &str = "bookmarks.yml";

/// Where the registry is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryLocation {
    pub path: PathBuf,
}

impl RegistryLocation {
    /// The registry next to the running binary, unless `override_path` is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the executable's own path cannot be determined.
    pub fn resolve(override_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = override_path {
            return Ok(Self {
                path: path.to_path_buf(),
            });
        }

        let exe_path = std::env::current_exe()?;
        let exe_dir = exe_path.parent().unwrap_or(&exe_path);
        Ok(Self::in_dir(exe_dir))
    }

    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(REGISTRY_FILE),
        }
    }
}
