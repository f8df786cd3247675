/*
 * Locates the three 7-Zip executables the menu drives. Each role has a fixed
 * file name; the resolver probes its search directories in order (an optional
 * configured tools directory, then the directory the shell extension was
 * loaded from) and falls back to the bare file name so the shell can find it
 * on `PATH`.
 */
use super::file_probe::PathProbeOperations;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolRole {
    /// `7zG.exe`: dialogs and progress UI for add/extract/test.
    GuiArchiver,
    /// `7z.exe`: console archiver, used for hashing.
    CliArchiver,
    /// `7zFM.exe`: the file manager, used to open an archive.
    GuiManager,
}

impl ToolRole {
    pub fn file_name(self) -> &'static str {
        match self {
            ToolRole::GuiArchiver => "7zG.exe",
            ToolRole::CliArchiver => "7z.exe",
            ToolRole::GuiManager => "7zFM.exe",
        }
    }
}

pub struct ToolResolver {
    search_dirs: Vec<PathBuf>,
    probe: Arc<dyn PathProbeOperations>,
}

impl ToolResolver {
    pub fn new(search_dirs: Vec<PathBuf>, probe: Arc<dyn PathProbeOperations>) -> Self {
        ToolResolver { search_dirs, probe }
    }

    pub fn resolve(&self, role: ToolRole) -> PathBuf {
        let name = role.file_name();
        for dir in &self.search_dirs {
            let candidate = dir.join(name);
            if self.probe.is_file(&candidate) {
                log::trace!("ToolResolver: Found {name} at {candidate:?}.");
                return candidate;
            }
        }
        log::debug!("ToolResolver: {name} not found next to the extension, relying on PATH.");
        PathBuf::from(name)
    }

    /// Icon reference for the flyout: first icon of the file manager executable.
    pub fn root_icon(&self) -> String {
        format!("{},0", self.resolve(ToolRole::GuiManager).display())
    }
}
