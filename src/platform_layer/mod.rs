/*
 * Everything that touches the operating system on behalf of the command model:
 * reading Explorer's selection, starting the 7-Zip processes, and the DLL's
 * own load/unload bookkeeping. The Win32 pieces are compiled only for Windows;
 * the launcher and module lookup carry portable fallbacks so the crate builds
 * and tests everywhere.
 */
pub mod error;
pub mod launcher;
pub mod module;
#[cfg(target_os = "windows")]
pub mod shell_selection;

pub use error::{PlatformError, Result as PlatformResult};
pub use launcher::ShellLauncher;
pub use module::{MODULE_LIFETIME, ObjectGuard, module_directory};
#[cfg(target_os = "windows")]
pub use shell_selection::ShellItemSelection;
