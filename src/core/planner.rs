/*
 * The invocation planner. Maps a command and the current `PathList` to the
 * external-tool launches it needs: which 7-Zip executable, which argument
 * tokens, which working directory, and how many separate launches (the
 * foldered extract commands fan out to one launch per archive).
 *
 * Planning is pure; `dispatch` hands the plan to a `ProcessLauncherOperations`
 * implementation and never reports launch failures back to the host.
 */
use super::archive_names::{self, EXT_7Z, EXT_ZIP};
use super::catalog::CommandId;
use super::file_probe::PathProbeOperations;
use super::selection::PathList;
use super::shell_path;
use super::tools::{ToolResolver, ToolRole};
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchArg {
    /// Emitted verbatim: command letters and flags such as `x`, `-y`, `-tzip`.
    Plain(String),
    /// A path or archive name, wrapped in double quotes on the command line.
    Quoted(String),
    /// A switch whose value is quoted right after it, e.g. `-o"Photos\"`.
    QuotedSwitch { switch: &'static str, value: String },
}

impl LaunchArg {
    fn plain(text: &str) -> Self {
        LaunchArg::Plain(text.to_string())
    }

    /// Windows command-line form.
    pub fn render(&self) -> String {
        match self {
            LaunchArg::Plain(text) => text.clone(),
            LaunchArg::Quoted(value) => format!("\"{value}\""),
            LaunchArg::QuotedSwitch { switch, value } => format!("{switch}\"{value}\""),
        }
    }

    /// Unquoted form, for launchers that pass an argument vector.
    pub fn as_os_arg(&self) -> String {
        match self {
            LaunchArg::Plain(text) | LaunchArg::Quoted(text) => text.clone(),
            LaunchArg::QuotedSwitch { switch, value } => format!("{switch}{value}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub tool: ToolRole,
    pub args: Vec<LaunchArg>,
    pub working_dir: Option<String>,
}

impl LaunchRequest {
    fn new(tool: ToolRole, args: Vec<LaunchArg>, anchor: &str) -> Self {
        LaunchRequest {
            tool,
            args,
            working_dir: shell_path::parent(anchor).map(str::to_string),
        }
    }

    pub fn command_line(&self) -> String {
        self.args
            .iter()
            .map(LaunchArg::render)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The `-o` destination folder, if this launch extracts into one.
    pub fn output_folder(&self) -> Option<&str> {
        self.args.iter().find_map(|arg| match arg {
            LaunchArg::QuotedSwitch { switch: "-o", value } => Some(value.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug)]
pub enum LaunchError {
    Io(io::Error),
    Rejected(String),
}

impl From<io::Error> for LaunchError {
    fn from(err: io::Error) -> Self {
        LaunchError::Io(err)
    }
}

impl std::fmt::Display for LaunchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LaunchError::Io(e) => write!(f, "Launch I/O error: {e}"),
            LaunchError::Rejected(reason) => write!(f, "Launch rejected: {reason}"),
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::Io(e) => Some(e),
            LaunchError::Rejected(_) => None,
        }
    }
}

/*
 * Starts an external process without waiting for it. Implementations return
 * as soon as the process has been requested; they never capture output or
 * exit codes.
 */
pub trait ProcessLauncherOperations: Send + Sync {
    fn launch(&self, program: &Path, request: &LaunchRequest) -> Result<(), LaunchError>;
}

fn quoted_paths(paths: &PathList) -> impl Iterator<Item = LaunchArg> + '_ {
    paths.iter().map(|p| LaunchArg::Quoted(p.to_string()))
}

fn on_all_paths(tool: ToolRole, leading: Vec<LaunchArg>, paths: &PathList) -> LaunchRequest {
    let anchor = paths.first().unwrap_or_default();
    let args = leading.into_iter().chain(quoted_paths(paths)).collect();
    LaunchRequest::new(tool, args, anchor)
}

fn extract_into_own_folder(path: &str, probe: &dyn PathProbeOperations) -> LaunchRequest {
    let folder = format!("{}\\", archive_names::base_name(path, probe));
    LaunchRequest::new(
        ToolRole::GuiArchiver,
        vec![
            LaunchArg::plain("x"),
            LaunchArg::plain("-y"),
            LaunchArg::QuotedSwitch {
                switch: "-o",
                value: folder,
            },
            LaunchArg::Quoted(path.to_string()),
        ],
        path,
    )
}

fn add_named(paths: &PathList, ext: &str, probe: &dyn PathProbeOperations) -> LaunchRequest {
    let mut leading = vec![LaunchArg::plain("a")];
    if ext == EXT_ZIP {
        leading.push(LaunchArg::plain("-tzip"));
    }
    leading.push(LaunchArg::Quoted(archive_names::default_archive_name(
        paths.as_slice(),
        ext,
        probe,
    )));
    on_all_paths(ToolRole::GuiArchiver, leading, paths)
}

pub fn plan_invocation(
    id: CommandId,
    paths: &PathList,
    probe: &dyn PathProbeOperations,
) -> Vec<LaunchRequest> {
    let Some(first) = paths.first() else {
        return Vec::new();
    };

    match id {
        CommandId::Open => vec![LaunchRequest::new(
            ToolRole::GuiManager,
            vec![LaunchArg::Quoted(first.to_string())],
            first,
        )],
        CommandId::Test => vec![on_all_paths(
            ToolRole::GuiArchiver,
            vec![LaunchArg::plain("t")],
            paths,
        )],
        CommandId::ExtractFiles => vec![on_all_paths(
            ToolRole::GuiArchiver,
            vec![LaunchArg::plain("x")],
            paths,
        )],
        CommandId::ExtractHere if paths.len() == 1 => vec![on_all_paths(
            ToolRole::GuiArchiver,
            vec![LaunchArg::plain("x"), LaunchArg::plain("-y")],
            paths,
        )],
        // Several archives extracted "here" would mix their contents, so each gets its own folder.
        CommandId::ExtractHere | CommandId::ExtractTo => paths
            .iter()
            .map(|p| extract_into_own_folder(p, probe))
            .collect(),
        CommandId::AddToArchive | CommandId::EmailArchive => vec![on_all_paths(
            ToolRole::GuiArchiver,
            vec![LaunchArg::plain("a")],
            paths,
        )],
        CommandId::AddTo7z | CommandId::EmailTo7z => vec![add_named(paths, EXT_7Z, probe)],
        CommandId::AddToZip | CommandId::EmailToZip => vec![add_named(paths, EXT_ZIP, probe)],
        CommandId::HashCrc32 | CommandId::HashCrc64 | CommandId::HashSha1 | CommandId::HashSha256 => {
            let algorithm = id.hash_algorithm().unwrap_or("CRC32");
            vec![on_all_paths(
                ToolRole::CliArchiver,
                vec![
                    LaunchArg::plain("h"),
                    LaunchArg::Plain(format!("-scrc{algorithm}")),
                ],
                paths,
            )]
        }
        CommandId::HashMenu => Vec::new(),
    }
}

/*
 * Issues every planned launch in order, resolving each tool just before use.
 * A failed launch is logged and the remaining launches still go out. Returns
 * the number of launches the launcher accepted.
 */
pub fn dispatch(
    requests: &[LaunchRequest],
    resolver: &ToolResolver,
    launcher: &dyn ProcessLauncherOperations,
) -> usize {
    let mut accepted = 0;
    for request in requests {
        let program = resolver.resolve(request.tool);
        log::debug!(
            "Planner: Launching {:?} with '{}' (cwd {:?}).",
            program,
            request.command_line(),
            request.working_dir
        );
        match launcher.launch(&program, request) {
            Ok(()) => accepted += 1,
            Err(e) => log::warn!("Planner: Launch of {program:?} failed: {e}"),
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::file_probe::StaticProbe;

    fn lines(requests: &[LaunchRequest]) -> Vec<String> {
        requests.iter().map(LaunchRequest::command_line).collect()
    }

    #[test]
    fn test_empty_selection_plans_nothing() {
        let probe = StaticProbe::new();
        for id in crate::core::catalog::ROOT_COMMANDS
            .into_iter()
            .chain(crate::core::catalog::HASH_COMMANDS)
        {
            assert!(plan_invocation(id, &PathList::default(), &probe).is_empty());
        }
    }

    #[test]
    fn test_open_uses_file_manager_with_single_path() {
        let probe = StaticProbe::new();
        let plan = plan_invocation(
            CommandId::Open,
            &PathList::from_paths([r"C:\in\a.7z"]),
            &probe,
        );
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].tool, ToolRole::GuiManager);
        assert_eq!(plan[0].command_line(), r#""C:\in\a.7z""#);
        assert_eq!(plan[0].working_dir.as_deref(), Some(r"C:\in"));
    }

    #[test]
    fn test_test_and_extract_files_cover_all_paths_in_one_launch() {
        let probe = StaticProbe::new();
        let paths = PathList::from_paths([r"C:\in\a.7z", r"C:\in\b.zip"]);
        let test = plan_invocation(CommandId::Test, &paths, &probe);
        let extract = plan_invocation(CommandId::ExtractFiles, &paths, &probe);
        assert_eq!(lines(&test), vec![r#"t "C:\in\a.7z" "C:\in\b.zip""#]);
        assert_eq!(lines(&extract), vec![r#"x "C:\in\a.7z" "C:\in\b.zip""#]);
        assert_eq!(test[0].tool, ToolRole::GuiArchiver);
    }

    #[test]
    fn test_extract_here_single_archive_extracts_in_place() {
        let probe = StaticProbe::new();
        let plan = plan_invocation(
            CommandId::ExtractHere,
            &PathList::from_paths([r"C:\in\a.7z"]),
            &probe,
        );
        assert_eq!(lines(&plan), vec![r#"x -y "C:\in\a.7z""#]);
        assert_eq!(plan[0].output_folder(), None);
        assert_eq!(plan[0].working_dir.as_deref(), Some(r"C:\in"));
    }

    #[test]
    fn test_extract_here_multiple_archives_get_own_folders() {
        let probe = StaticProbe::new();
        let paths = PathList::from_paths([r"C:\in\a.7z", r"D:\dl\b.tar.gz"]);
        let plan = plan_invocation(CommandId::ExtractHere, &paths, &probe);
        assert_eq!(plan.len(), 2);
        assert_eq!(
            lines(&plan),
            vec![
                r#"x -y -o"a\" "C:\in\a.7z""#.to_string(),
                r#"x -y -o"b.tar\" "D:\dl\b.tar.gz""#.to_string(),
            ]
        );
        assert_eq!(plan[0].output_folder(), Some(r"a\"));
        assert_eq!(plan[1].output_folder(), Some(r"b.tar\"));
        assert_eq!(plan[0].working_dir.as_deref(), Some(r"C:\in"));
        assert_eq!(plan[1].working_dir.as_deref(), Some(r"D:\dl"));
    }

    #[test]
    fn test_extract_to_always_uses_per_archive_folders() {
        let probe = StaticProbe::new();
        let single = plan_invocation(
            CommandId::ExtractTo,
            &PathList::from_paths([r"C:\in\a.zip"]),
            &probe,
        );
        assert_eq!(lines(&single), vec![r#"x -y -o"a\" "C:\in\a.zip""#]);

        let triple = plan_invocation(
            CommandId::ExtractTo,
            &PathList::from_paths([r"C:\in\a.zip", r"C:\in\b.zip", r"C:\in\c.rar"]),
            &probe,
        );
        let folders: Vec<_> = triple.iter().filter_map(|r| r.output_folder()).collect();
        assert_eq!(folders, vec![r"a\", r"b\", r"c\"]);
    }

    #[test]
    fn test_add_commands() {
        let probe = StaticProbe::new();
        let paths = PathList::from_paths([r"C:\a\x.txt", r"C:\a\y.txt"]);
        let generic = plan_invocation(CommandId::AddToArchive, &paths, &probe);
        let seven = plan_invocation(CommandId::AddTo7z, &paths, &probe);
        let zip = plan_invocation(CommandId::AddToZip, &paths, &probe);
        assert_eq!(lines(&generic), vec![r#"a "C:\a\x.txt" "C:\a\y.txt""#]);
        assert_eq!(lines(&seven), vec![r#"a "a.7z" "C:\a\x.txt" "C:\a\y.txt""#]);
        assert_eq!(
            lines(&zip),
            vec![r#"a -tzip "a.zip" "C:\a\x.txt" "C:\a\y.txt""#]
        );
    }

    #[test]
    fn test_email_commands_mirror_add_commands() {
        let probe = StaticProbe::new();
        let paths = PathList::from_paths([r"C:\a\report.txt"]);
        let pairs = [
            (CommandId::EmailArchive, CommandId::AddToArchive),
            (CommandId::EmailTo7z, CommandId::AddTo7z),
            (CommandId::EmailToZip, CommandId::AddToZip),
        ];
        for (email, add) in pairs {
            assert_eq!(
                plan_invocation(email, &paths, &probe),
                plan_invocation(add, &paths, &probe)
            );
        }
    }

    #[test]
    fn test_hash_commands_use_command_line_archiver() {
        let probe = StaticProbe::new();
        let paths = PathList::from_paths([r"C:\a\x.txt", r"C:\data\Photos"]);
        let expected = [
            (CommandId::HashCrc32, "-scrcCRC32"),
            (CommandId::HashCrc64, "-scrcCRC64"),
            (CommandId::HashSha1, "-scrcSHA1"),
            (CommandId::HashSha256, "-scrcSHA256"),
        ];
        for (id, switch) in expected {
            let plan = plan_invocation(id, &paths, &probe);
            assert_eq!(plan.len(), 1);
            assert_eq!(plan[0].tool, ToolRole::CliArchiver);
            assert_eq!(
                plan[0].command_line(),
                format!(r#"h {switch} "C:\a\x.txt" "C:\data\Photos""#)
            );
        }
        assert!(plan_invocation(CommandId::HashMenu, &paths, &probe).is_empty());
    }

    #[test]
    fn test_os_args_are_unquoted() {
        let arg = LaunchArg::QuotedSwitch {
            switch: "-o",
            value: r"Photos\".to_string(),
        };
        assert_eq!(arg.render(), r#"-o"Photos\""#);
        assert_eq!(arg.as_os_arg(), r"-oPhotos\");
        assert_eq!(LaunchArg::Quoted(r"C:\a b".to_string()).as_os_arg(), r"C:\a b");
    }
}
