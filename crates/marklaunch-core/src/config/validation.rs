//! Registry validation - warns about unknown fields

use serde_yaml::Mapping;
use tracing::warn;

/// Keys a category mapping may carry.
pub(crate) const CATEGORY_KEYS: &[&str] = &["handlers", "bookmarks"];

/// Keys a bookmark mapping may carry.
pub(crate) const BOOKMARK_KEYS: &[&str] = &["url", "dsp"];

/// Warn about keys in `mapping` that are not in `expected`.
pub(crate) fn warn_unknown_fields(mapping: &Mapping, expected: &[&str], context: &str) {
    for path in find_unknown_keys(mapping, expected, context) {
        warn!("Unknown field in bookmarks.yml: {path}");
    }
}

/// Returns dotted paths like "browser.icons" for keys outside `expected`.
fn find_unknown_keys(mapping: &Mapping, expected: &[&str], prefix: &str) -> Vec<String> {
    mapping
        .keys()
        .filter_map(super::registry::scalar_string)
        .filter(|key| !expected.contains(&key.as_str()))
        .map(|key| {
            if prefix.is_empty() {
                key
            } else {
                format!("{prefix}.{key}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_find_unknown_keys_none() {
        let map = mapping("handlers: {}\nbookmarks: {}\n");
        assert!(find_unknown_keys(&map, CATEGORY_KEYS, "browser").is_empty());
    }

    #[test]
    fn test_find_unknown_keys_reports_path() {
        let map = mapping("url: http://a\ndsp: A\nicon: star\n");
        let unknown = find_unknown_keys(&map, BOOKMARK_KEYS, "browser.gh");
        assert_eq!(unknown, vec!["browser.gh.icon".to_string()]);
    }

    #[test]
    fn test_find_unknown_keys_without_prefix() {
        let map = mapping("colour: red\n");
        assert_eq!(
            find_unknown_keys(&map, CATEGORY_KEYS, ""),
            vec!["colour".to_string()]
        );
    }

    #[test]
    fn test_find_unknown_keys_coerces_numeric_keys() {
        let map = mapping("42: x\nurl: y\n");
        assert_eq!(
            find_unknown_keys(&map, BOOKMARK_KEYS, "c.b"),
            vec!["c.b.42".to_string()]
        );
    }
}
