//! Bookmark registry loaded from `bookmarks.yml`.
//!
//! The file maps category names to a `handlers` table (foreground application
//! id to handler executable) and a `bookmarks` table (key to `url` and an
//! optional `dsp` label). Every key and scalar value is coerced to its string
//! form before it is compared or stored, so `42:` and `"42":` behave the same.

use super::validation::{BOOKMARK_KEYS, CATEGORY_KEYS, warn_unknown_fields};
use crate::error::{Error, Result, SchemaError};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A handler binding: foreground application id to handler executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    pub key: String,
    pub path: PathBuf,
}

/// A category eligible for context matching.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub handlers: Vec<Handler>,
    /// Left unvalidated until the category is matched.
    bookmarks: Option<Value>,
}

/// Flattened bookmark shown in the picker and handed to the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkItem {
    pub key: String,
    pub label: String,
    pub target: String,
}

impl BookmarkItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            target: target.into(),
        }
    }
}

/// The category selected for this session together with its bookmarks.
#[derive(Debug, Clone)]
pub struct MatchedContext {
    pub category: String,
    pub handler_path: PathBuf,
    /// Sorted ascending by key; fixed for the whole session.
    pub items: Vec<BookmarkItem>,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    categories: Vec<Category>,
}

impl Registry {
    /// Read and parse the registry file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file does not exist, `ConfigParse` for
    /// malformed YAML and `Schema` if the root is not a mapping.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let parse_error = |source: serde_yaml::Error| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        };
        let mut value: Value = serde_yaml::from_str(&content).map_err(parse_error)?;
        // `<<: *anchor` keys are inherited, not left behind as literal fields.
        value.apply_merge().map_err(parse_error)?;

        let registry = Self::from_value(value)?;
        debug!(
            "Loaded {} eligible categories from {}",
            registry.categories.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Build a registry from an already parsed YAML document.
    ///
    /// Categories that are not mappings, or that have no usable `handlers`
    /// table, are skipped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::RootNotMapping` if `value` is not a mapping.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Mapping(root) = value else {
            return Err(SchemaError::RootNotMapping.into());
        };

        let mut categories = Vec::new();
        for (name, body) in root {
            let Some(name) = scalar_string(&name) else {
                warn!("Skipping category with a non-scalar name");
                continue;
            };
            if let Some(category) = Category::from_value(name, body) {
                categories.push(category);
            }
        }

        Ok(Self { categories })
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Find the category whose handler key equals `identifier`, ignoring case.
    ///
    /// The first matching handler in file order wins. Returns `Ok(None)` when no
    /// category handles `identifier`.
    ///
    /// # Errors
    ///
    /// Returns a `Schema` error if the matched category's bookmarks are malformed.
    pub fn match_context(&self, identifier: &str) -> Result<Option<MatchedContext>> {
        let wanted = identifier.to_lowercase();

        let found = self.categories.iter().find_map(|category| {
            category
                .handlers
                .iter()
                .find(|handler| handler.key.to_lowercase() == wanted)
                .map(|handler| (category, handler))
        });

        let Some((category, handler)) = found else {
            debug!("No category handles {identifier}");
            return Ok(None);
        };

        let items = category.bookmark_items()?;
        info!(
            "Matched category '{}' via handler '{}' ({} bookmarks)",
            category.name,
            handler.key,
            items.len()
        );

        Ok(Some(MatchedContext {
            category: category.name.clone(),
            handler_path: handler.path.clone(),
            items,
        }))
    }
}

impl Category {
    fn from_value(name: String, body: Value) -> Option<Self> {
        let Value::Mapping(mut body) = body else {
            debug!("Skipping category '{name}': not a mapping");
            return None;
        };
        warn_unknown_fields(&body, CATEGORY_KEYS, &name);

        let handlers = match body.remove("handlers") {
            Some(Value::Mapping(table)) => parse_handlers(&name, table),
            Some(_) => {
                warn!("Skipping category '{name}': handlers must be a mapping");
                return None;
            }
            None => {
                debug!("Skipping category '{name}': no handlers");
                return None;
            }
        };

        Some(Self {
            name,
            handlers,
            bookmarks: body.remove("bookmarks"),
        })
    }

    /// Flatten and validate this category's bookmarks, sorted by key.
    ///
    /// # Errors
    ///
    /// Returns `BookmarksNotMapping` if `bookmarks` is absent or not a mapping and
    /// `BookmarkMissingTarget` if an entry has no `url`.
    pub fn bookmark_items(&self) -> Result<Vec<BookmarkItem>> {
        let Some(Value::Mapping(table)) = &self.bookmarks else {
            return Err(SchemaError::BookmarksNotMapping {
                category: self.name.clone(),
            }
            .into());
        };

        let mut items = Vec::with_capacity(table.len());
        for (key, props) in table {
            let Some(key) = scalar_string(key) else {
                warn!("Skipping bookmark with a non-scalar key in '{}'", self.name);
                continue;
            };
            items.push(self.bookmark_item(key, props)?);
        }
        items.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(items)
    }

    fn bookmark_item(&self, key: String, props: &Value) -> Result<BookmarkItem> {
        let missing_target = || SchemaError::BookmarkMissingTarget {
            category: self.name.clone(),
            bookmark: key.clone(),
        };

        let Value::Mapping(props) = props else {
            return Err(missing_target().into());
        };
        warn_unknown_fields(props, BOOKMARK_KEYS, &format!("{}.{key}", self.name));

        let target = props
            .get("url")
            .and_then(scalar_string)
            .ok_or_else(missing_target)?;
        let label = props
            .get("dsp")
            .and_then(scalar_string)
            .unwrap_or_else(|| key.clone());

        Ok(BookmarkItem { key, label, target })
    }
}

fn parse_handlers(category: &str, table: Mapping) -> Vec<Handler> {
    table
        .into_iter()
        .filter_map(|(key, path)| {
            let key = scalar_string(&key)?;
            let Some(path) = scalar_string(&path) else {
                warn!("Skipping handler '{key}' in '{category}': path must be a scalar");
                return None;
            };
            Some(Handler {
                key,
                path: PathBuf::from(path),
            })
        })
        .collect()
}

/// Canonical string form of a YAML scalar. Sequences and mappings have none.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const SAMPLE: &str = r#"
app:
  handlers:
    app.exe: /bin/h
  bookmarks:
    abc:
      dsp: ABC Site
      url: http://b
    ab:
      url: http://a
"#;

    fn registry(yaml: &str) -> Registry {
        Registry::from_value(serde_yaml::from_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn test_match_context_case_insensitive() {
        let ctx = registry(SAMPLE).match_context("APP.EXE").unwrap().unwrap();

        assert_eq!(ctx.category, "app");
        assert_eq!(ctx.handler_path, PathBuf::from("/bin/h"));
        assert_eq!(
            ctx.items,
            vec![
                BookmarkItem::new("ab", "ab", "http://a"),
                BookmarkItem::new("abc", "ABC Site", "http://b"),
            ]
        );
    }

    #[test]
    fn test_match_context_no_match() {
        assert!(registry(SAMPLE).match_context("other.exe").unwrap().is_none());
    }

    #[test]
    fn test_match_context_first_category_wins() {
        let reg = registry(
            r"
first:
  handlers: { tool: /bin/one }
  bookmarks: { a: { url: x } }
second:
  handlers: { TOOL: /bin/two }
  bookmarks: { b: { url: y } }
",
        );
        let ctx = reg.match_context("tool").unwrap().unwrap();
        assert_eq!(ctx.category, "first");
        assert_eq!(ctx.handler_path, PathBuf::from("/bin/one"));
    }

    #[test]
    fn test_categories_without_handlers_are_skipped() {
        let reg = registry(
            r"
notes: just a string
plain:
  bookmarks: { a: { url: x } }
broken:
  handlers: [not, a, map]
real:
  handlers: { tool: /bin/t }
  bookmarks: {}
",
        );
        let names: Vec<_> = reg.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["real"]);
        assert!(reg.match_context("tool").unwrap().unwrap().items.is_empty());
    }

    #[test]
    fn test_root_not_mapping() {
        let value: Value = serde_yaml::from_str("- a\n- b\n").unwrap();
        let err = Registry::from_value(value).unwrap_err();
        assert!(matches!(err, Error::Schema(SchemaError::RootNotMapping)));
    }

    #[test]
    fn test_bookmarks_not_mapping() {
        let reg = registry("c:\n  handlers: { tool: /bin/t }\n  bookmarks: [a, b]\n");
        let err = reg.match_context("tool").unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::BookmarksNotMapping { ref category }) if category == "c"
        ));
    }

    #[test]
    fn test_missing_bookmarks_rejected_only_when_matched() {
        let reg = registry(
            r"
bare:
  handlers: { bare.exe: /bin/b }
full:
  handlers: { full.exe: /bin/f }
  bookmarks: { a: { url: x } }
",
        );
        assert!(reg.match_context("full.exe").unwrap().is_some());
        assert!(matches!(
            reg.match_context("bare.exe").unwrap_err(),
            Error::Schema(SchemaError::BookmarksNotMapping { .. })
        ));
    }

    #[test]
    fn test_bookmark_missing_target() {
        let reg = registry("c:\n  handlers: { tool: /bin/t }\n  bookmarks: { gh: { dsp: GitHub } }\n");
        let err = reg.match_context("tool").unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::BookmarkMissingTarget { ref bookmark, .. }) if bookmark == "gh"
        ));
    }

    #[test]
    fn test_bookmark_not_a_mapping_is_missing_target() {
        let reg = registry("c:\n  handlers: { tool: /bin/t }\n  bookmarks: { gh: http://x }\n");
        assert!(matches!(
            reg.match_context("tool").unwrap_err(),
            Error::Schema(SchemaError::BookmarkMissingTarget { .. })
        ));
    }

    #[test]
    fn test_numeric_keys_and_values_are_coerced() {
        let reg = registry(
            r"
2024:
  handlers: { 7: 42 }
  bookmarks:
    10: { url: 3.5, dsp: true }
    9: { url: http://nine }
",
        );
        let ctx = reg.match_context("7").unwrap().unwrap();
        assert_eq!(ctx.category, "2024");
        assert_eq!(ctx.handler_path, PathBuf::from("42"));
        assert_eq!(ctx.items[0], BookmarkItem::new("10", "true", "3.5"));
        // String ordering, not numeric: "10" < "9"
        assert_eq!(ctx.items[1].key, "9");
    }

    #[test]
    fn test_scalar_string_forms() {
        assert_eq!(scalar_string(&Value::Null).as_deref(), Some("null"));
        assert_eq!(scalar_string(&Value::Bool(false)).as_deref(), Some("false"));
        assert_eq!(
            scalar_string(&Value::String("x".to_string())).as_deref(),
            Some("x")
        );
        assert!(scalar_string(&Value::Sequence(Vec::new())).is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let reg = Registry::load(file.path()).unwrap();
        assert_eq!(reg.categories().len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.yml");
        let err = Registry::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { path: ref p } if p == &path));
    }

    #[test]
    fn test_load_malformed_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"app: [unclosed\n").unwrap();

        let err = Registry::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_resolves_merge_keys() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br"
base: &base
  handlers: { a.exe: /bin/a }
  bookmarks: { gh: { url: http://g } }
other:
  <<: *base
  handlers: { b.exe: /bin/b }
",
        )
        .unwrap();

        let reg = Registry::load(file.path()).unwrap();
        let ctx = reg.match_context("b.exe").unwrap().unwrap();
        assert_eq!(ctx.category, "other");
        assert_eq!(ctx.handler_path, PathBuf::from("/bin/b"));
        assert_eq!(ctx.items, vec![BookmarkItem::new("gh", "gh", "http://g")]);

        // Keys set directly on the category replace the merged ones
        let other = &reg.categories()[1];
        assert_eq!(other.name, "other");
        assert_eq!(
            other.handlers,
            vec![Handler {
                key: "b.exe".to_string(),
                path: PathBuf::from("/bin/b"),
            }]
        );
    }

    #[test]
    fn test_load_duplicate_keys_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"app:\n  handlers: { a.exe: /bin/a }\napp:\n  handlers: {}\n")
            .unwrap();

        let err = Registry::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_scalar_root() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"just text\n").unwrap();

        let err = Registry::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Schema(SchemaError::RootNotMapping)));
    }
}
