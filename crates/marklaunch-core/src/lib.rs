//! Typeahead bookmark picker engine.
//!
//! Loads the bookmark registry, picks the category for the foreground
//! application, filters its bookmarks as the user types, tracks the active row
//! and launches the confirmed bookmark through the category's handler.

pub mod config;
pub mod launch;
pub mod search;
pub mod selection;
pub mod session;

mod error;

pub use config::{BookmarkItem, MatchedContext, Registry, RegistryLocation};
pub use error::{Error, Result, SchemaError};
pub use launch::{LaunchCommand, ProcessSpawner, Spawner};
pub use selection::{Direction, Selection};
pub use session::{Outcome, Session, SessionEvent, Startup, Step, View};
