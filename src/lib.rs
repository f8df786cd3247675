/*
 * 7-Zip context-menu command model for Windows Explorer.
 *
 * `core` holds the platform-independent pieces: selection collection, the
 * command catalog (titles, visibility, submenus), archive name derivation and
 * the invocation planner. `platform_layer` reads Explorer's selection, starts
 * the 7-Zip tools and carries the DLL's lifetime bookkeeping. `app_logic`
 * ties both together behind `ShellMenuHandler`, the object a menu host drives.
 */
pub mod app_logic;
pub mod core;
pub mod platform_layer;

pub use app_logic::ShellMenuHandler;
pub use crate::core::{CommandId, CommandNode, CoreConfigManager, PathList, VisibilityState};
