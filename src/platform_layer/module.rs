/*
 * Process-wide bookkeeping for the loaded extension module: the module handle
 * recorded at attach time (used to find the 7-Zip executables shipped next to
 * the DLL) and the live-object / server-lock counters the host consults before
 * unloading us. None of this is visible to the command model.
 */
use super::error::{PlatformError, Result as PlatformResult};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct LifetimeCounters {
    live_objects: AtomicUsize,
    server_locks: AtomicUsize,
}

impl LifetimeCounters {
    pub const fn new() -> Self {
        LifetimeCounters {
            live_objects: AtomicUsize::new(0),
            server_locks: AtomicUsize::new(0),
        }
    }

    pub fn live_objects(&self) -> usize {
        self.live_objects.load(Ordering::SeqCst)
    }

    pub fn server_locks(&self) -> usize {
        self.server_locks.load(Ordering::SeqCst)
    }

    /// Backs `IClassFactory::LockServer`, which lives in the host integration.
    pub fn lock_server(&self, lock: bool) {
        if lock {
            self.server_locks.fetch_add(1, Ordering::SeqCst);
        } else {
            // Unbalanced unlocks are ignored rather than wrapping around.
            let _ = self
                .server_locks
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        }
    }

    pub fn can_unload(&self) -> bool {
        self.live_objects() == 0 && self.server_locks() == 0
    }
}

impl Default for LifetimeCounters {
    fn default() -> Self {
        Self::new()
    }
}

pub static MODULE_LIFETIME: LifetimeCounters = LifetimeCounters::new();

/*
 * Counts one live menu object for as long as it exists. Every
 * `ShellMenuHandler` owns one of these.
 */
pub struct ObjectGuard {
    counters: &'static LifetimeCounters,
}

impl ObjectGuard {
    pub fn acquire() -> Self {
        Self::acquire_in(&MODULE_LIFETIME)
    }

    pub fn acquire_in(counters: &'static LifetimeCounters) -> Self {
        counters.live_objects.fetch_add(1, Ordering::SeqCst);
        ObjectGuard { counters }
    }
}

impl Drop for ObjectGuard {
    fn drop(&mut self) {
        self.counters.live_objects.fetch_sub(1, Ordering::SeqCst);
    }
}

// Address of the module handle passed to DllMain; 0 until attached.
#[cfg(target_os = "windows")]
static MODULE_HANDLE: AtomicUsize = AtomicUsize::new(0);

#[cfg(target_os = "windows")]
pub(crate) fn record_module_handle(handle: usize) {
    MODULE_HANDLE.store(handle, Ordering::SeqCst);
}

/*
 * Directory containing the loaded extension module.
 *
 * On Windows this asks the loader for the DLL's own path. Elsewhere (tests,
 * tooling) there is no DLL, so the directory of the running executable is used.
 */
#[cfg(target_os = "windows")]
pub fn module_directory() -> PlatformResult<PathBuf> {
    use std::ffi::c_void;
    use windows::Win32::Foundation::HMODULE;
    use windows::Win32::System::LibraryLoader::GetModuleFileNameW;

    let handle = MODULE_HANDLE.load(Ordering::SeqCst);
    if handle == 0 {
        return Err(PlatformError::ModuleUnavailable(
            "module handle not recorded".to_string(),
        ));
    }

    let mut buffer = vec![0u16; 1024];
    let len = unsafe { GetModuleFileNameW(Some(HMODULE(handle as *mut c_void)), &mut buffer) }
        as usize;
    if len == 0 || len >= buffer.len() {
        return Err(PlatformError::ModuleUnavailable(format!(
            "GetModuleFileNameW returned {len}"
        )));
    }

    let module_path = PathBuf::from(String::from_utf16_lossy(&buffer[..len]));
    module_path
        .parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| PlatformError::ModuleUnavailable(format!("{module_path:?} has no parent")))
}

#[cfg(not(target_os = "windows"))]
pub fn module_directory() -> PlatformResult<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| PlatformError::ModuleUnavailable(format!("current_exe failed: {e}")))?;
    exe.parent()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| PlatformError::ModuleUnavailable(format!("{exe:?} has no parent")))
}

/*
 * DLL entry points. The class factory (`DllGetClassObject`) and registration
 * belong to the host integration and are not part of this crate.
 */
#[cfg(target_os = "windows")]
mod exports {
    use super::{MODULE_LIFETIME, record_module_handle};
    use std::ffi::c_void;
    use windows::Win32::Foundation::{HMODULE, S_FALSE, S_OK};
    use windows::Win32::System::LibraryLoader::DisableThreadLibraryCalls;
    use windows::Win32::System::SystemServices::DLL_PROCESS_ATTACH;
    use windows::core::HRESULT;

    #[unsafe(no_mangle)]
    extern "system" fn DllMain(module: *mut c_void, reason: u32, _reserved: *mut c_void) -> i32 {
        if reason == DLL_PROCESS_ATTACH {
            record_module_handle(module as usize);
            unsafe {
                let _ = DisableThreadLibraryCalls(HMODULE(module));
            }
        }
        1
    }

    #[unsafe(no_mangle)]
    extern "system" fn DllCanUnloadNow() -> HRESULT {
        if MODULE_LIFETIME.can_unload() {
            S_OK
        } else {
            S_FALSE
        }
    }
}
