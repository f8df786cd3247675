/*
 * Locates the per-user directory the shell extension writes its log file to.
 * The directory lives under the platform's local (non-roaming) data directory
 * (e.g. AppData/Local on Windows) and is created on first use.
 */
use directories::ProjectDirs;
use std::fs;
use std::path::PathBuf;

const LOG_SUBFOLDER_NAME: &str = "logs";

/*
 * Returns `<local data dir>/<app_name>/logs`, creating it if needed.
 *
 * Returns `None` when `ProjectDirs` cannot determine a home directory or the
 * directory cannot be created; callers treat that as "no file logging".
 */
pub fn get_log_dir(app_name: &str) -> Option<PathBuf> {
    let proj_dirs = ProjectDirs::from("", "", app_name)?;
    let log_dir = proj_dirs.data_local_dir().join(LOG_SUBFOLDER_NAME);
    if !log_dir.is_dir() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            // No logger may be installed yet, so this cannot be logged.
            eprintln!("PathUtils: Failed to create log directory {log_dir:?}: {e}");
            return None;
        }
    }
    Some(log_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remove_app_dir(app_name: &str) {
        if let Some(proj_dirs) = ProjectDirs::from("", "", app_name) {
            let app_dir = proj_dirs.data_local_dir();
            if app_dir.exists() {
                if let Err(e) = fs::remove_dir_all(app_dir) {
                    eprintln!("Test cleanup failed for {app_dir:?}: {e}");
                }
            }
        }
    }

    #[test]
    fn test_get_log_dir_creates_and_reuses_directory() {
        let unique_app_name = format!("TestApp_ShellMenuLogs_{}", rand::random::<u128>());

        let first = get_log_dir(&unique_app_name).expect("log dir should be available");
        assert!(first.is_dir());
        assert!(first.ends_with(LOG_SUBFOLDER_NAME));
        assert!(
            first
                .to_string_lossy()
                .to_lowercase()
                .contains(&unique_app_name.to_lowercase()),
            "Path should contain the app name. Path: {first:?}"
        );

        let second = get_log_dir(&unique_app_name).expect("second lookup should succeed");
        assert_eq!(first, second);

        remove_app_dir(&unique_app_name);
    }
}
