/*
 * Abstracts the two filesystem questions the command model asks: whether a
 * selected path is a directory (folder names keep their dots, file names lose
 * their extension) and whether a candidate tool executable exists. The trait
 * lets the catalog and the tool resolver be tested without touching disk.
 */
use std::path::Path;

pub trait PathProbeOperations: Send + Sync {
    fn is_dir(&self, path: &str) -> bool;
    fn is_file(&self, path: &Path) -> bool;
}

pub struct CorePathProbe {}

impl CorePathProbe {
    pub fn new() -> Self {
        CorePathProbe {}
    }
}

impl Default for CorePathProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl PathProbeOperations for CorePathProbe {
    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/*
 * Fixed answers for tests: a set of directory paths (shell strings) and a set
 * of existing files. Everything else is reported as missing.
 */
#[cfg(test)]
pub(crate) struct StaticProbe {
    pub(crate) dirs: std::collections::HashSet<String>,
    pub(crate) files: std::collections::HashSet<std::path::PathBuf>,
}

#[cfg(test)]
impl StaticProbe {
    pub(crate) fn new() -> Self {
        StaticProbe {
            dirs: Default::default(),
            files: Default::default(),
        }
    }

    pub(crate) fn with_dirs(dirs: &[&str]) -> Self {
        let mut probe = Self::new();
        probe.dirs = dirs.iter().map(|d| d.to_string()).collect();
        probe
    }
}

#[cfg(test)]
impl PathProbeOperations for StaticProbe {
    fn is_dir(&self, path: &str) -> bool {
        self.dirs.contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_core_probe_distinguishes_files_and_directories() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("7zG.exe");
        File::create(&file_path).unwrap();

        let probe = CorePathProbe::new();
        assert!(probe.is_dir(&dir.path().to_string_lossy()));
        assert!(!probe.is_dir(&file_path.to_string_lossy()));
        assert!(probe.is_file(&file_path));
        assert!(!probe.is_file(dir.path()));
        assert!(!probe.is_file(&dir.path().join("missing.exe")));
    }
}
