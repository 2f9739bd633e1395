use std::path::PathBuf;
use thiserror::Error;

/// Structural problems found while reading the bookmark registry.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("registry root must be a mapping of categories")]
    RootNotMapping,

    #[error("bookmarks in category '{category}' must be a mapping")]
    BookmarksNotMapping { category: String },

    #[error("bookmark '{bookmark}' in category '{category}' must be a mapping with a 'url' key")]
    BookmarkMissingTarget { category: String, bookmark: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Config file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid YAML in {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Could not launch {}: executable not found", path.display())]
    LaunchNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error launching {target}: {source}")]
    LaunchSpawn {
        target: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Heading shown to the user above the detailed message.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Usage(_) => "Usage Error",
            Self::ConfigNotFound { .. } | Self::Io(_) => "File Error",
            Self::ConfigParse { .. } => "YAML Parsing Error",
            Self::Schema(_) => "Configuration Error",
            Self::LaunchNotFound { .. } | Self::LaunchSpawn { .. } => "Launch Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display_usage() {
        let err = Error::Usage("expected 5 arguments".to_string());
        assert_eq!(err.to_string(), "Usage error: expected 5 arguments");
        assert_eq!(err.title(), "Usage Error");
    }

    #[test]
    fn test_error_display_config_not_found() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/opt/marklaunch/bookmarks.yml"),
        };
        assert_eq!(
            err.to_string(),
            "Config file not found: /opt/marklaunch/bookmarks.yml"
        );
        assert_eq!(err.title(), "File Error");
    }

    #[test]
    fn test_error_display_config_parse_keeps_source() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [b").unwrap_err();
        let err = Error::ConfigParse {
            path: PathBuf::from("bookmarks.yml"),
            source: yaml_err,
        };
        assert!(err.to_string().starts_with("Invalid YAML in bookmarks.yml"));
        assert!(err.source().is_some());
        assert_eq!(err.title(), "YAML Parsing Error");
    }

    #[test]
    fn test_schema_error_messages() {
        assert_eq!(
            SchemaError::RootNotMapping.to_string(),
            "registry root must be a mapping of categories"
        );
        assert_eq!(
            SchemaError::BookmarksNotMapping {
                category: "browser".to_string()
            }
            .to_string(),
            "bookmarks in category 'browser' must be a mapping"
        );
        assert_eq!(
            SchemaError::BookmarkMissingTarget {
                category: "browser".to_string(),
                bookmark: "gh".to_string(),
            }
            .to_string(),
            "bookmark 'gh' in category 'browser' must be a mapping with a 'url' key"
        );
    }

    #[test]
    fn test_from_schema_error() {
        let err: Error = SchemaError::RootNotMapping.into();
        assert!(matches!(err, Error::Schema(SchemaError::RootNotMapping)));
        assert_eq!(err.title(), "Configuration Error");
        assert_eq!(err.to_string(), "registry root must be a mapping of categories");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_launch_errors_share_title() {
        let not_found = Error::LaunchNotFound {
            path: PathBuf::from("/bin/missing"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let spawn = Error::LaunchSpawn {
            target: "http://a".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(not_found.title(), "Launch Error");
        assert_eq!(spawn.title(), "Launch Error");
        assert!(not_found.to_string().contains("/bin/missing"));
        assert!(spawn.to_string().contains("http://a"));
    }
}
