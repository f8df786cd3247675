/*
 * Pure naming helpers shared by the catalog and the planner: recognising
 * archive-like paths by extension, deriving the display/base name of a
 * selected item, and deriving the default archive name that "Add to" and
 * "Compress to ... and email" propose for a selection.
 */
use super::file_probe::PathProbeOperations;
use super::shell_path;

/// Extensions treated as archives, compared case-insensitively.
pub const ARCHIVE_EXTENSIONS: [&str; 12] = [
    ".7z", ".zip", ".rar", ".tar", ".gz", ".xz", ".bz2", ".cab", ".wim", ".lzma", ".zst", ".arj",
];

pub const EXT_7Z: &str = ".7z";
pub const EXT_ZIP: &str = ".zip";

const FALLBACK_ARCHIVE_STEM: &str = "Archive";

pub fn is_archive_like(path: &str) -> bool {
    shell_path::extension(path).is_some_and(|ext| {
        ARCHIVE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    })
}

/// Folder name for a directory, file name without extension otherwise.
pub fn base_name(path: &str, probe: &dyn PathProbeOperations) -> String {
    if probe.is_dir(path) {
        shell_path::file_name(path).to_string()
    } else {
        shell_path::stem(path).to_string()
    }
}

/*
 * Derives the archive name proposed for a selection.
 *
 * A single item is named after itself. Several items are named after their
 * shared parent folder, provided they all live in exactly the same folder and
 * that folder has a name (a drive root does not). Everything else, including an
 * empty selection, gets `Archive<ext>`.
 */
pub fn default_archive_name<S: AsRef<str>>(
    paths: &[S],
    ext: &str,
    probe: &dyn PathProbeOperations,
) -> String {
    match paths {
        [] => format!("{FALLBACK_ARCHIVE_STEM}{ext}"),
        [single] => format!("{}{ext}", base_name(single.as_ref(), probe)),
        [first, rest @ ..] => {
            let shared_parent = shell_path::parent(first.as_ref());
            let all_same_parent = rest
                .iter()
                .all(|p| shell_path::parent(p.as_ref()) == shared_parent);
            let parent_name = shared_parent.map(shell_path::file_name).unwrap_or("");

            if all_same_parent && !parent_name.is_empty() {
                format!("{parent_name}{ext}")
            } else {
                log::trace!(
                    "ArchiveNames: No named common parent for {} items, using fallback name.",
                    paths.len()
                );
                format!("{FALLBACK_ARCHIVE_STEM}{ext}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::file_probe::StaticProbe;

    #[test]
    fn test_is_archive_like_is_case_insensitive() {
        assert!(is_archive_like(r"C:\a\x.7z"));
        assert!(is_archive_like(r"C:\a\X.ZIP"));
        assert!(is_archive_like(r"C:\a\backup.tar.Gz"));
        assert!(is_archive_like(r"C:\a\disk.Wim"));
    }

    #[test]
    fn test_is_archive_like_rejects_other_and_missing_extensions() {
        assert!(!is_archive_like(r"C:\a\report.txt"));
        assert!(!is_archive_like(r"C:\a\Photos"));
        assert!(!is_archive_like(r"C:\a\.zip"));
        assert!(!is_archive_like(r"C:\a\x.tgz"));
        assert!(!is_archive_like(r"C:\a\x.7z.bak"));
    }

    #[test]
    fn test_base_name_keeps_dots_in_directory_names() {
        let probe = StaticProbe::with_dirs(&[r"C:\data\v1.2"]);
        assert_eq!(base_name(r"C:\data\v1.2", &probe), "v1.2");
        assert_eq!(base_name(r"C:\data\notes.v1.txt", &probe), "notes.v1");
    }

    #[test]
    fn test_default_archive_name_reference_cases() {
        let probe = StaticProbe::new();
        let empty: [&str; 0] = [];
        assert_eq!(default_archive_name(&empty, EXT_7Z, &probe), "Archive.7z");
        assert_eq!(
            default_archive_name(&[r"C:\a\report.txt"], EXT_7Z, &probe),
            "report.7z"
        );
        assert_eq!(
            default_archive_name(&[r"C:\a\x.txt", r"C:\a\y.txt"], EXT_7Z, &probe),
            "a.7z"
        );
        assert_eq!(
            default_archive_name(&[r"C:\a\x.txt", r"C:\b\y.txt"], EXT_7Z, &probe),
            "Archive.7z"
        );
    }

    #[test]
    fn test_default_archive_name_single_directory_uses_folder_name() {
        let probe = StaticProbe::with_dirs(&[r"C:\data\Photos.2024"]);
        assert_eq!(
            default_archive_name(&[r"C:\data\Photos.2024"], EXT_ZIP, &probe),
            "Photos.2024.zip"
        );
    }

    #[test]
    fn test_default_archive_name_common_parent_ignores_order() {
        let probe = StaticProbe::new();
        let forward = [r"C:\work\src\a.rs", r"C:\work\src\b.rs", r"C:\work\src\c.rs"];
        let backward = [r"C:\work\src\c.rs", r"C:\work\src\a.rs", r"C:\work\src\b.rs"];
        assert_eq!(default_archive_name(&forward, EXT_ZIP, &probe), "src.zip");
        assert_eq!(
            default_archive_name(&forward, EXT_ZIP, &probe),
            default_archive_name(&backward, EXT_ZIP, &probe)
        );
    }

    #[test]
    fn test_default_archive_name_items_in_drive_root_fall_back() {
        let probe = StaticProbe::new();
        assert_eq!(
            default_archive_name(&[r"C:\x.txt", r"C:\y.txt"], EXT_7Z, &probe),
            "Archive.7z"
        );
    }

    #[test]
    fn test_default_archive_name_parent_comparison_is_exact() {
        let probe = StaticProbe::new();
        assert_eq!(
            default_archive_name(&[r"C:\A\x.txt", r"C:\a\y.txt"], EXT_7Z, &probe),
            "Archive.7z"
        );
    }
}
