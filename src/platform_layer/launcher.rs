/*
 * Starts the planned 7-Zip processes. On Windows the request goes through
 * `ShellExecuteExW`, exactly as Explorer would start a program: the rendered
 * command line is passed as one parameter string and the call returns as soon
 * as the process has been created. Other targets spawn the program directly
 * with an argument vector. In both cases the child is never waited on.
 */
use crate::core::{LaunchError, LaunchRequest, ProcessLauncherOperations};
use std::path::Path;

pub struct ShellLauncher {}

impl ShellLauncher {
    pub fn new() -> Self {
        ShellLauncher {}
    }
}

impl Default for ShellLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "windows")]
impl ProcessLauncherOperations for ShellLauncher {
    fn launch(&self, program: &Path, request: &LaunchRequest) -> Result<(), LaunchError> {
        shell_execute(program, request).map_err(LaunchError::from)
    }
}

#[cfg(target_os = "windows")]
fn shell_execute(
    program: &Path,
    request: &LaunchRequest,
) -> super::error::Result<()> {
    use windows::Win32::UI::Shell::{
        SEE_MASK_FLAG_NO_UI, SEE_MASK_NOASYNC, SHELLEXECUTEINFOW, ShellExecuteExW,
    };
    use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
    use windows::core::{HSTRING, PCWSTR};

    let file = HSTRING::from(program.as_os_str());
    let parameters = HSTRING::from(request.command_line());
    let directory = request.working_dir.as_deref().map(HSTRING::from);

    let mut info = SHELLEXECUTEINFOW {
        cbSize: std::mem::size_of::<SHELLEXECUTEINFOW>() as u32,
        fMask: SEE_MASK_NOASYNC | SEE_MASK_FLAG_NO_UI,
        lpFile: PCWSTR(file.as_ptr()),
        lpParameters: if parameters.is_empty() {
            PCWSTR::null()
        } else {
            PCWSTR(parameters.as_ptr())
        },
        lpDirectory: directory
            .as_ref()
            .map_or(PCWSTR::null(), |d| PCWSTR(d.as_ptr())),
        nShow: SW_SHOWNORMAL.0,
        ..Default::default()
    };

    unsafe { ShellExecuteExW(&mut info) }.map_err(|e| {
        log::warn!("ShellLauncher: ShellExecuteExW failed for {program:?}: {e:?}");
        super::error::PlatformError::from(e)
    })
}

#[cfg(not(target_os = "windows"))]
impl ProcessLauncherOperations for ShellLauncher {
    fn launch(&self, program: &Path, request: &LaunchRequest) -> Result<(), LaunchError> {
        let mut command = std::process::Command::new(program);
        command.args(request.args.iter().map(|arg| arg.as_os_arg()));
        if let Some(dir) = request.working_dir.as_deref() {
            if Path::new(dir).is_dir() {
                command.current_dir(dir);
            }
        }
        // Dropping the handle detaches the child; nobody waits for it.
        let child = command.spawn()?;
        log::debug!("ShellLauncher: Started {program:?} as pid {}.", child.id());
        Ok(())
    }
}
