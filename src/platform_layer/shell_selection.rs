/*
 * Adapts the `IShellItemArray` Explorer passes to every command callback to
 * the core's `SelectionSource`. Each item is asked for its filesystem path
 * (`SIGDN_FILESYSPATH`); items without one (libraries, virtual folders)
 * report `SelectionError::NotFileSystem` and are skipped by the collector.
 *
 * The COM `IExplorerCommand` wrapper builds one of these from the array it
 * receives in `GetTitle`, `GetState` and `Invoke`, and hands it to the matching
 * `ShellMenuHandler` call.
 */
use crate::core::{SelectionError, SelectionSource};
use std::ffi::c_void;
use windows::Win32::System::Com::CoTaskMemFree;
use windows::Win32::UI::Shell::{IShellItemArray, SIGDN_FILESYSPATH};

pub struct ShellItemSelection<'a> {
    items: Option<&'a IShellItemArray>,
}

impl<'a> ShellItemSelection<'a> {
    /// Explorer may pass no array at all; that is an empty selection.
    pub fn new(items: Option<&'a IShellItemArray>) -> Self {
        ShellItemSelection { items }
    }
}

impl SelectionSource for ShellItemSelection<'_> {
    fn item_count(&self) -> Result<usize, SelectionError> {
        let Some(items) = self.items else {
            return Ok(0);
        };
        unsafe { items.GetCount() }
            .map(|count| count as usize)
            .map_err(|e| SelectionError::CountUnavailable(format!("{e:?}")))
    }

    fn item_path(&self, index: usize) -> Result<String, SelectionError> {
        let Some(items) = self.items else {
            return Err(SelectionError::ItemUnavailable {
                index,
                reason: "no item array".to_string(),
            });
        };

        unsafe {
            let item = items
                .GetItemAt(index as u32)
                .map_err(|e| SelectionError::ItemUnavailable {
                    index,
                    reason: format!("{e:?}"),
                })?;
            let pwstr_path = item
                .GetDisplayName(SIGDN_FILESYSPATH)
                .map_err(|_| SelectionError::NotFileSystem { index })?;
            let path = pwstr_path.to_string();
            CoTaskMemFree(Some(pwstr_path.as_ptr() as *const c_void));
            path.map_err(|e| SelectionError::ItemUnavailable {
                index,
                reason: format!("path is not valid UTF-16: {e}"),
            })
        }
    }
}
