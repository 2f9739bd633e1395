use std::path::{Component, Path, PathBuf};

/// Normalize a bookmark target before it is handed to the handler.
///
/// URLs (`scheme://...`) pass through untouched. Anything else is treated as a
/// filesystem path and normalized lexically: repeated separators and `.`
/// components are dropped and `name/..` pairs collapse. The filesystem is
/// never consulted.
#[must_use]
pub fn normalize_target(target: &str) -> String {
    if has_url_scheme(target) {
        return target.to_string();
    }

    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in Path::new(target).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is `/`
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return ".".to_string();
    }
    parts
        .iter()
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}

fn has_url_scheme(target: &str) -> bool {
    let Some((scheme, _)) = target.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
