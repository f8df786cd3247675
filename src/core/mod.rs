/*
 * This module consolidates the platform-agnostic command model of the shell
 * extension: the selection collector (`PathList`), the command catalog
 * (`CommandId`, `CommandNode`), the invocation planner (`plan_invocation`,
 * `dispatch`), the naming helpers they share, and the ambient pieces (read-only
 * configuration, file logging). Filesystem and process access go through the
 * `PathProbeOperations` and `ProcessLauncherOperations` traits.
 */
pub mod archive_names;
pub mod catalog;
pub mod config;
pub mod file_probe;
pub mod logging;
pub mod path_utils;
pub mod planner;
pub mod selection;
pub mod shell_path;
pub mod tools;

pub use archive_names::{base_name, default_archive_name, is_archive_like};

pub use catalog::{CommandId, CommandNode, NodeKind, VisibilityState};

pub use config::{
    ConfigError, ConfigManagerOperations, CoreConfigManager, ShellMenuConfig,
};

pub use file_probe::{CorePathProbe, PathProbeOperations};

pub use planner::{
    LaunchArg, LaunchError, LaunchRequest, ProcessLauncherOperations, dispatch, plan_invocation,
};

pub use selection::{EmptySelection, PathList, SelectionError, SelectionSource};

pub use tools::{ToolResolver, ToolRole};
