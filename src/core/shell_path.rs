/*
 * Windows-style decomposition of shell path strings. Explorer always hands the
 * menu Windows paths, so splitting is done on the string itself with `\` and
 * `/` as separators, independent of the platform the crate is compiled for.
 * A drive root (`C:\`) has an empty file name and no parent.
 */

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

fn is_drive_spec(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/*
 * Splits a path into its parent and its final component.
 *
 * Trailing separators are ignored, so `C:\data\Photos\` behaves like
 * `C:\data\Photos`. The parent keeps its separator when it is a root
 * (`C:\x.txt` has parent `C:\`), matching how the shell reports it.
 */
fn split_last(path: &str) -> (Option<&str>, &str) {
    let trimmed = path.trim_end_matches(is_separator);
    if trimmed.is_empty() || is_drive_spec(trimmed) {
        return (None, "");
    }

    match trimmed.rfind(is_separator) {
        Some(index) => {
            let name = &trimmed[index + 1..];
            let head = &trimmed[..index];
            let parent_text = head.trim_end_matches(is_separator);
            let parent = if parent_text.is_empty() || is_drive_spec(parent_text) {
                // Root: keep the separator that follows the drive letter.
                &trimmed[..parent_text.len() + 1]
            } else {
                parent_text
            };
            (Some(parent), name)
        }
        None => (None, trimmed),
    }
}

pub fn file_name(path: &str) -> &str {
    split_last(path).1
}

pub fn parent(path: &str) -> Option<&str> {
    split_last(path).0
}

/// The extension of the final component, including its leading dot.
pub fn extension(path: &str) -> Option<&str> {
    let name = file_name(path);
    if name == "." || name == ".." {
        return None;
    }
    match name.rfind('.') {
        Some(0) | None => None,
        Some(index) => Some(&name[index..]),
    }
}

/// The final component without its extension (`backup.tar.gz` -> `backup.tar`).
pub fn stem(path: &str) -> &str {
    let name = file_name(path);
    match extension(path) {
        Some(ext) => &name[..name.len() - ext.len()],
        None => name,
    }
}
