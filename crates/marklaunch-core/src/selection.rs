//! Active-row tracking for the filtered view.

use crate::config::BookmarkItem;
use crate::search::normalize_query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Which row of the filtered view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// The filtered view has no rows.
    #[default]
    Empty,
    Active(usize),
}

impl Selection {
    /// Selection for a freshly filtered view.
    ///
    /// A row whose key equals the query (ignoring case and surrounding
    /// whitespace) becomes active; when several do, the last one wins.
    /// Otherwise the first row is active.
    #[must_use]
    pub fn after_filter<'a, I>(query: &str, view: I) -> Self
    where
        I: IntoIterator<Item = &'a BookmarkItem>,
    {
        let needle = normalize_query(query);
        let mut len = 0;
        let mut exact = None;

        for (idx, item) in view.into_iter().enumerate() {
            if item.key.to_lowercase() == needle {
                exact = Some(idx);
            }
            len += 1;
        }

        match exact {
            Some(idx) => Self::Active(idx),
            None if len > 0 => Self::Active(0),
            None => Self::Empty,
        }
    }

    /// Move within a view of `len` rows. Never wraps.
    #[must_use]
    pub fn navigate(self, direction: Direction, len: usize) -> Self {
        match (self, direction) {
            (Self::Active(idx), Direction::Up) if idx > 0 => Self::Active(idx - 1),
            (Self::Active(idx), Direction::Down) if idx + 1 < len => Self::Active(idx + 1),
            (Self::Empty, Direction::Down) if len > 0 => Self::Active(0),
            (current, _) => current,
        }
    }

    #[must_use]
    pub fn index(self) -> Option<usize> {
        match self {
            Self::Active(idx) => Some(idx),
            Self::Empty => None,
        }
    }
}
