use crate::core::{
    self, CommandNode, ConfigManagerOperations, CorePathProbe, PathList, PathProbeOperations,
    ProcessLauncherOperations, SelectionSource, ShellMenuConfig, ToolResolver, VisibilityState,
};
use crate::platform_layer::{self, ObjectGuard, ShellLauncher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/*
 * The object the menu host talks to for one menu-open. It owns the freshly
 * built command tree plus the injected filesystem probe, tool resolver and
 * process launcher, and answers the host's per-node questions (title, state,
 * children, icon) and clicks (invoke).
 *
 * Every call re-collects the selection: nothing derived from it is cached
 * between calls, and nothing survives the handler.
 */
pub struct ShellMenuHandler {
    root: CommandNode,
    probe: Arc<dyn PathProbeOperations>,
    resolver: ToolResolver,
    launcher: Arc<dyn ProcessLauncherOperations>,
    _lifetime: ObjectGuard,
}

impl ShellMenuHandler {
    pub fn new(
        probe: Arc<dyn PathProbeOperations>,
        resolver: ToolResolver,
        launcher: Arc<dyn ProcessLauncherOperations>,
    ) -> Self {
        ShellMenuHandler {
            root: CommandNode::root(),
            probe,
            resolver,
            launcher,
            _lifetime: ObjectGuard::acquire(),
        }
    }

    /*
     * Builds a handler wired to the real system: configuration from the
     * module directory, the file logger, tools searched in the configured
     * directory and then next to the module, and the shell launcher.
     * Problems with the module path or the configuration file are logged and
     * the defaults are used.
     */
    pub fn from_environment(config_manager: &dyn ConfigManagerOperations) -> Self {
        let module_dir = match platform_layer::module_directory() {
            Ok(dir) => Some(dir),
            Err(e) => {
                log::warn!("ShellMenuHandler: {e}. Tools will be looked up on PATH.");
                None
            }
        };

        let config = Self::load_config_or_default(config_manager, module_dir.as_deref());
        core::logging::install_file_logger(&config);

        let search_dirs = Self::tool_search_dirs(&config, module_dir);
        log::debug!("ShellMenuHandler: Tool search directories: {search_dirs:?}");

        let probe: Arc<dyn PathProbeOperations> = Arc::new(CorePathProbe::new());
        let resolver = ToolResolver::new(search_dirs, Arc::clone(&probe));
        Self::new(probe, resolver, Arc::new(ShellLauncher::new()))
    }

    /// A missing module directory or an unreadable config file yields the defaults.
    pub(crate) fn load_config_or_default(
        config_manager: &dyn ConfigManagerOperations,
        module_dir: Option<&Path>,
    ) -> ShellMenuConfig {
        let Some(dir) = module_dir else {
            return ShellMenuConfig::default();
        };
        config_manager.load_config(dir).unwrap_or_else(|e| {
            log::warn!("ShellMenuHandler: {e}. Using default configuration.");
            ShellMenuConfig::default()
        })
    }

    pub(crate) fn tool_search_dirs(
        config: &ShellMenuConfig,
        module_dir: Option<PathBuf>,
    ) -> Vec<PathBuf> {
        config.tools_dir.iter().cloned().chain(module_dir).collect()
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    pub fn children<'a>(&self, node: &'a CommandNode) -> &'a [CommandNode] {
        node.children()
    }

    pub fn has_subcommands(&self, node: &CommandNode) -> bool {
        node.has_subcommands()
    }

    pub fn canonical_name(&self, node: &CommandNode) -> Option<&'static str> {
        node.canonical_name()
    }

    pub fn title(&self, node: &CommandNode, selection: &dyn SelectionSource) -> String {
        let paths = core::selection::collect(selection);
        node.title(&paths, self.probe.as_ref())
    }

    pub fn state(&self, node: &CommandNode, selection: &dyn SelectionSource) -> VisibilityState {
        let paths = core::selection::collect(selection);
        node.state(&paths)
    }

    /// Only the flyout carries an icon.
    pub fn icon(&self, node: &CommandNode) -> Option<String> {
        match node.id() {
            None => Some(self.resolver.root_icon()),
            Some(_) => None,
        }
    }

    /*
     * Runs the command behind `node` against the current selection. Launches
     * are fire-and-forget: failures are logged, never returned, and an empty
     * selection or a submenu node is a no-op.
     */
    pub fn invoke(&self, node: &CommandNode, selection: &dyn SelectionSource) {
        let Some(id) = node.id() else {
            log::trace!("ShellMenuHandler: Invoke on the flyout ignored.");
            return;
        };
        let paths = core::selection::collect(selection);
        self.invoke_with_paths(id, &paths);
    }

    fn invoke_with_paths(&self, id: core::CommandId, paths: &PathList) {
        let plan = core::plan_invocation(id, paths, self.probe.as_ref());
        if plan.is_empty() {
            log::debug!(
                "ShellMenuHandler: {id:?} planned no launches for {} path(s).",
                paths.len()
            );
            return;
        }
        let accepted = core::dispatch(&plan, &self.resolver, self.launcher.as_ref());
        log::info!(
            "ShellMenuHandler: {id:?} issued {accepted} of {} launch(es).",
            plan.len()
        );
    }
}
