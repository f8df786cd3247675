/*
 * Installs the process-wide file logger. Explorer gives an in-process
 * extension no console, so log lines go to `shell_menu.log` under the per-user
 * log directory. Installation happens at most once per process; if the file
 * cannot be opened the extension simply runs without a logger.
 */
use super::config::ShellMenuConfig;
use super::path_utils;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Once;

pub const APP_NAME_FOR_LOGS: &str = "SevenZipShellMenu";
const LOG_FILENAME: &str = "shell_menu.log";

static INSTALL_LOGGER: Once = Once::new();

pub fn parse_level_filter(text: &str) -> LevelFilter {
    LevelFilter::from_str(text.trim()).unwrap_or(LevelFilter::Info)
}

pub fn install_file_logger(config: &ShellMenuConfig) {
    if !config.file_logging {
        return;
    }
    let level = parse_level_filter(&config.log_level);
    INSTALL_LOGGER.call_once(|| {
        let Some(log_dir) = path_utils::get_log_dir(APP_NAME_FOR_LOGS) else {
            return;
        };
        let log_path = log_dir.join(LOG_FILENAME);
        let file = match OpenOptions::new().create(true).append(true).open(&log_path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Logging: Could not open {log_path:?}: {e}");
                return;
            }
        };
        let log_config = ConfigBuilder::new()
            .set_thread_level(LevelFilter::Off)
            .set_target_level(LevelFilter::Off)
            .build();
        if WriteLogger::init(level, log_config, file).is_ok() {
            log::info!("Logging: File logger installed at level {level} ({log_path:?}).");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_filter_accepts_known_levels_case_insensitively() {
        assert_eq!(parse_level_filter("trace"), LevelFilter::Trace);
        assert_eq!(parse_level_filter("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level_filter(" off "), LevelFilter::Off);
    }

    #[test]
    fn test_parse_level_filter_falls_back_to_info() {
        assert_eq!(parse_level_filter("verbose"), LevelFilter::Info);
        assert_eq!(parse_level_filter(""), LevelFilter::Info);
    }
}
