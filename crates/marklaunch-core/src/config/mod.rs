mod location;
mod registry;
mod validation;

pub use location::{REGISTRY_FILE, RegistryLocation};
pub use registry::{BookmarkItem, Category, Handler, MatchedContext, Registry};
