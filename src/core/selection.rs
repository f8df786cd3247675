/*
 * The selection collector. Turns whatever the host hands us as "the current
 * selection" into a `PathList`: an ordered list of filesystem paths with empty
 * and duplicate entries removed. Items that cannot be resolved to a filesystem
 * path (virtual folders, library entries, ...) are skipped with a debug log
 * line; nothing here ever fails the caller.
 */
use super::archive_names;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The host could not report how many items are selected.
    CountUnavailable(String),
    /// The item at `index` could not be fetched from the host.
    ItemUnavailable { index: usize, reason: String },
    /// The item exists but has no filesystem path.
    NotFileSystem { index: usize },
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::CountUnavailable(reason) => {
                write!(f, "Selection count unavailable: {reason}")
            }
            SelectionError::ItemUnavailable { index, reason } => {
                write!(f, "Selection item {index} unavailable: {reason}")
            }
            SelectionError::NotFileSystem { index } => {
                write!(f, "Selection item {index} has no filesystem path")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/*
 * An ordered, indexable collection of selected shell items. The Windows
 * implementation wraps an `IShellItemArray`; tests use plain vectors.
 */
pub trait SelectionSource {
    fn item_count(&self) -> Result<usize, SelectionError>;
    fn item_path(&self, index: usize) -> Result<String, SelectionError>;
}

/// An empty selection, e.g. when the host passes no item array at all.
pub struct EmptySelection;

impl SelectionSource for EmptySelection {
    fn item_count(&self) -> Result<usize, SelectionError> {
        Ok(0)
    }

    fn item_path(&self, index: usize) -> Result<String, SelectionError> {
        Err(SelectionError::ItemUnavailable {
            index,
            reason: "empty selection".to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathList {
    paths: Vec<String>,
}

impl PathList {
    /// Builds a list keeping the first occurrence of each non-empty path.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let paths = paths
            .into_iter()
            .map(Into::<String>::into)
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();
        PathList { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.paths.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    /// True when every path has a recognised archive extension. Vacuously true when empty.
    pub fn is_all_archives(&self) -> bool {
        self.iter().all(archive_names::is_archive_like)
    }
}

pub fn collect(source: &dyn SelectionSource) -> PathList {
    let count = match source.item_count() {
        Ok(count) => count,
        Err(e) => {
            log::debug!("Selection: {e}. Treating selection as empty.");
            return PathList::default();
        }
    };

    let resolved = (0..count).filter_map(|index| match source.item_path(index) {
        Ok(path) => Some(path),
        Err(e) => {
            log::debug!("Selection: Skipping item: {e}");
            None
        }
    });
    let list = PathList::from_paths(resolved);
    log::trace!(
        "Selection: Collected {} path(s) from {count} item(s).",
        list.len()
    );
    list
}

#[cfg(test)]
pub(crate) struct VecSelection {
    pub(crate) items: Vec<Result<String, SelectionError>>,
}

#[cfg(test)]
impl VecSelection {
    pub(crate) fn of(paths: &[&str]) -> Self {
        VecSelection {
            items: paths.iter().map(|p| Ok(p.to_string())).collect(),
        }
    }
}

#[cfg(test)]
impl SelectionSource for VecSelection {
    fn item_count(&self) -> Result<usize, SelectionError> {
        Ok(self.items.len())
    }

    fn item_path(&self, index: usize) -> Result<String, SelectionError> {
        self.items
            .get(index)
            .cloned()
            .unwrap_or(Err(SelectionError::ItemUnavailable {
                index,
                reason: "out of range".to_string(),
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenCount;

    impl SelectionSource for BrokenCount {
        fn item_count(&self) -> Result<usize, SelectionError> {
            Err(SelectionError::CountUnavailable("mocked".to_string()))
        }
        fn item_path(&self, _index: usize) -> Result<String, SelectionError> {
            unreachable!("item_path must not be called when the count fails")
        }
    }

    #[test]
    fn test_collect_preserves_selection_order() {
        let source = VecSelection::of(&[r"C:\b.zip", r"C:\a.zip", r"C:\c"]);
        let list = collect(&source);
        assert_eq!(list.as_slice(), &[r"C:\b.zip", r"C:\a.zip", r"C:\c"]);
    }

    #[test]
    fn test_collect_skips_unresolvable_items() {
        let source = VecSelection {
            items: vec![
                Ok(r"C:\a.zip".to_string()),
                Err(SelectionError::NotFileSystem { index: 1 }),
                Err(SelectionError::ItemUnavailable {
                    index: 2,
                    reason: "mocked".to_string(),
                }),
                Ok(r"C:\d.7z".to_string()),
            ],
        };
        let list = collect(&source);
        assert_eq!(list.as_slice(), &[r"C:\a.zip", r"C:\d.7z"]);
    }

    #[test]
    fn test_collect_drops_empty_and_duplicate_paths() {
        let source = VecSelection::of(&[r"C:\a.zip", "", r"C:\a.zip", r"C:\b.zip"]);
        let list = collect(&source);
        assert_eq!(list.as_slice(), &[r"C:\a.zip", r"C:\b.zip"]);
    }

    #[test]
    fn test_collect_empty_and_failing_sources_yield_empty_list() {
        assert!(collect(&EmptySelection).is_empty());
        assert!(collect(&BrokenCount).is_empty());
    }

    #[test]
    fn test_is_all_archives() {
        assert!(PathList::from_paths([r"C:\a.ZIP", r"C:\b.7z"]).is_all_archives());
        assert!(!PathList::from_paths([r"C:\a.zip", r"C:\notes.txt"]).is_all_archives());
    }
}
