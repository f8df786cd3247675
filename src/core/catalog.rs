/*
 * The command catalog: every entry of the "7-Zip" flyout, its fixed fallback
 * title, the rule that renders its live title, the rule that decides whether it
 * is shown, and the children it enumerates. Dispatch is a plain `match` over
 * the closed `CommandId` set; `CommandNode` only adds the per-menu-open tree
 * shape (root flyout owning its children, hash submenu owning its four leaves).
 */
use super::archive_names::{self, EXT_7Z, EXT_ZIP};
use super::file_probe::PathProbeOperations;
use super::selection::PathList;
use std::cell::OnceCell;

pub const ROOT_TITLE: &str = "7-Zip";

/// Canonical name reported for the flyout; matches the registered CLSID.
pub const ROOT_CANONICAL_NAME: &str = "{7C9F3AA6-4D07-4E1D-8B86-0F5A4E4F44AC}";

const EXTRACT_TO_PLACEHOLDER: &str = "Extract to \\<Folder>\\";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Open,
    Test,
    ExtractFiles,
    ExtractHere,
    ExtractTo,
    AddToArchive,
    AddTo7z,
    AddToZip,
    EmailArchive,
    EmailTo7z,
    EmailToZip,
    HashMenu,
    HashCrc32,
    HashCrc64,
    HashSha1,
    HashSha256,
}

/// Direct children of the flyout, in on-screen order.
pub const ROOT_COMMANDS: [CommandId; 12] = [
    CommandId::Open,
    CommandId::ExtractFiles,
    CommandId::ExtractHere,
    CommandId::ExtractTo,
    CommandId::Test,
    CommandId::AddToArchive,
    CommandId::AddTo7z,
    CommandId::AddToZip,
    CommandId::EmailArchive,
    CommandId::EmailTo7z,
    CommandId::EmailToZip,
    CommandId::HashMenu,
];

pub const HASH_COMMANDS: [CommandId; 4] = [
    CommandId::HashCrc32,
    CommandId::HashCrc64,
    CommandId::HashSha1,
    CommandId::HashSha256,
];

/// Visibility of a menu entry as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityState {
    Hidden,
    Enabled,
    Disabled,
}

impl CommandId {
    pub fn fallback_title(self) -> &'static str {
        match self {
            CommandId::Open => "Open archive",
            CommandId::Test => "Test archive",
            CommandId::ExtractFiles => "Extract files...",
            CommandId::ExtractHere => "Extract Here",
            CommandId::ExtractTo => EXTRACT_TO_PLACEHOLDER,
            CommandId::AddToArchive => "Add to archive...",
            CommandId::AddTo7z => "Add to \"<Name>.7z\"",
            CommandId::AddToZip => "Add to \"<Name>.zip\"",
            CommandId::EmailArchive => "Compress and email...",
            CommandId::EmailTo7z => "Compress to \"<Name>.7z\" and email",
            CommandId::EmailToZip => "Compress to \"<Name>.zip\" and email",
            CommandId::HashMenu => "CRC SHA",
            CommandId::HashCrc32 => "CRC-32",
            CommandId::HashCrc64 => "CRC-64",
            CommandId::HashSha1 => "SHA-1",
            CommandId::HashSha256 => "SHA-256",
        }
    }

    /// Target extension for the entries that name a single derived archive.
    pub fn archive_extension(self) -> Option<&'static str> {
        match self {
            CommandId::AddTo7z | CommandId::EmailTo7z => Some(EXT_7Z),
            CommandId::AddToZip | CommandId::EmailToZip => Some(EXT_ZIP),
            _ => None,
        }
    }

    /// Algorithm name passed to the command-line archiver's `-scrc` switch.
    pub fn hash_algorithm(self) -> Option<&'static str> {
        match self {
            CommandId::HashCrc32 => Some("CRC32"),
            CommandId::HashCrc64 => Some("CRC64"),
            CommandId::HashSha1 => Some("SHA1"),
            CommandId::HashSha256 => Some("SHA256"),
            _ => None,
        }
    }

    pub fn children(self) -> &'static [CommandId] {
        match self {
            CommandId::HashMenu => &HASH_COMMANDS,
            _ => &[],
        }
    }

    pub fn has_subcommands(self) -> bool {
        !self.children().is_empty()
    }

    pub fn title(self, paths: &PathList, probe: &dyn PathProbeOperations) -> String {
        match self {
            CommandId::AddTo7z | CommandId::AddToZip => {
                let ext = self.archive_extension().unwrap_or(EXT_7Z);
                let name = archive_names::default_archive_name(paths.as_slice(), ext, probe);
                format!("Add to \"{name}\"")
            }
            CommandId::EmailTo7z | CommandId::EmailToZip => {
                let ext = self.archive_extension().unwrap_or(EXT_7Z);
                let name = archive_names::default_archive_name(paths.as_slice(), ext, probe);
                format!("Compress to \"{name}\" and email")
            }
            // Only the first item names the folder, even though invoking extracts every item into its own.
            CommandId::ExtractTo => match paths.first() {
                Some(first) => format!(
                    "Extract to \"{}\\\"",
                    archive_names::base_name(first, probe)
                ),
                None => EXTRACT_TO_PLACEHOLDER.to_string(),
            },
            _ => self.fallback_title().to_string(),
        }
    }

    pub fn state(self, paths: &PathList) -> VisibilityState {
        if paths.is_empty() {
            return VisibilityState::Hidden;
        }
        let visible = match self {
            CommandId::Open => paths.len() == 1 && paths.is_all_archives(),
            CommandId::Test
            | CommandId::ExtractFiles
            | CommandId::ExtractHere
            | CommandId::ExtractTo => paths.is_all_archives(),
            _ => true,
        };
        if visible {
            VisibilityState::Enabled
        } else {
            VisibilityState::Hidden
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Flyout,
    Command(CommandId),
}

/*
 * One entry of the menu tree for a single menu-open. The root flyout and the
 * hash submenu create their children the first time they are enumerated; the
 * children are owned by their parent and never point back at it.
 */
#[derive(Debug)]
pub struct CommandNode {
    kind: NodeKind,
    children: OnceCell<Vec<CommandNode>>,
}

impl CommandNode {
    pub fn root() -> Self {
        CommandNode {
            kind: NodeKind::Flyout,
            children: OnceCell::new(),
        }
    }

    fn command(id: CommandId) -> Self {
        CommandNode {
            kind: NodeKind::Command(id),
            children: OnceCell::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn id(&self) -> Option<CommandId> {
        match self.kind {
            NodeKind::Flyout => None,
            NodeKind::Command(id) => Some(id),
        }
    }

    pub fn fallback_title(&self) -> &'static str {
        match self.kind {
            NodeKind::Flyout => ROOT_TITLE,
            NodeKind::Command(id) => id.fallback_title(),
        }
    }

    pub fn has_subcommands(&self) -> bool {
        match self.kind {
            NodeKind::Flyout => true,
            NodeKind::Command(id) => id.has_subcommands(),
        }
    }

    pub fn children(&self) -> &[CommandNode] {
        self.children.get_or_init(|| {
            let ids: &[CommandId] = match self.kind {
                NodeKind::Flyout => &ROOT_COMMANDS,
                NodeKind::Command(id) => id.children(),
            };
            ids.iter().copied().map(CommandNode::command).collect()
        })
    }

    pub fn title(&self, paths: &PathList, probe: &dyn PathProbeOperations) -> String {
        match self.kind {
            NodeKind::Flyout => ROOT_TITLE.to_string(),
            NodeKind::Command(id) => id.title(paths, probe),
        }
    }

    pub fn state(&self, paths: &PathList) -> VisibilityState {
        match self.kind {
            NodeKind::Flyout => VisibilityState::Enabled,
            NodeKind::Command(id) => id.state(paths),
        }
    }

    pub fn canonical_name(&self) -> Option<&'static str> {
        match self.kind {
            NodeKind::Flyout => Some(ROOT_CANONICAL_NAME),
            NodeKind::Command(_) => None,
        }
    }

    /// Depth-first lookup of the node carrying `id` below (or at) this node.
    pub fn find(&self, id: CommandId) -> Option<&CommandNode> {
        if self.id() == Some(id) {
            return Some(self);
        }
        if !self.has_subcommands() {
            return None;
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}
