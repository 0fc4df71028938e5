//! Resource-module handling: the application context with the active UI
//! language library, string loading with built-in fallback, and the
//! description lookup used by the UI-language scan.

use std::path::{Path, PathBuf};

use tracing::warn;
use windows::core::{PCWSTR, PWSTR};
use windows::Win32::Foundation::{FreeLibrary, HMODULE};
use windows::Win32::System::LibraryLoader::{
    GetModuleFileNameW, GetModuleHandleW, LoadLibraryExW, LOAD_LIBRARY_AS_DATAFILE,
    LOAD_LIBRARY_AS_IMAGE_RESOURCE,
};
use windows::Win32::UI::WindowsAndMessaging::LoadStringW;

use crate::format_placeholders;
use crate::locale::DescribeUiModule;
use crate::model::constants::IDS_LANG;
use crate::pages::ResourceSwitcher;

/// UTF-16, NUL-terminated copy of a string for Win32 calls.
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

pub fn path_to_wide(path: &Path) -> Vec<u16> {
    to_wide(&path.to_string_lossy())
}

/// Application context: the process instance handle, the optional active
/// UI resource library and the directory such libraries are loaded from.
///
/// Replaces the ambient globals of a classic Win32 app; everything that
/// needs it receives a reference.
pub struct AppContext {
    instance: HMODULE,
    res_mod: Option<HMODULE>,
    res_dir: PathBuf,
}

impl AppContext {
    pub fn new(res_dir: PathBuf) -> windows::core::Result<Self> {
        let instance = unsafe { GetModuleHandleW(None)? };
        Ok(Self {
            instance,
            res_mod: None,
            res_dir,
        })
    }

    pub fn instance(&self) -> HMODULE {
        self.instance
    }

    /// Load a string, preferring the active language library and falling
    /// back to the built-in table.
    pub fn res_str(&self, id: u32) -> String {
        if let Some(module) = self.res_mod {
            let s = load_string_from(module, id);
            if !s.is_empty() {
                return s;
            }
        }
        load_string_from(self.instance, id)
    }

    /// Load a message-style format string and substitute `%N` placeholders
    /// with the given arguments.
    pub fn res_str_fmt(&self, id: u32, args: &[&str]) -> String {
        format_placeholders(&self.res_str(id), args)
    }

    /// File name of the running executable, shown for the built-in entry.
    pub fn exe_display_name(&self) -> String {
        self.exe_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory of the running executable.
    pub fn exe_dir(&self) -> PathBuf {
        self.exe_path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn exe_path(&self) -> PathBuf {
        let mut buf = [0u16; 1024];
        let len = unsafe { GetModuleFileNameW(Some(self.instance.into()), &mut buf) } as usize;
        PathBuf::from(String::from_utf16_lossy(&buf[..len]))
    }

    fn drop_res_mod(&mut self) {
        if let Some(module) = self.res_mod.take() {
            unsafe {
                let _ = FreeLibrary(module);
            }
        }
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        // The process's own module handle is never freed.
        self.drop_res_mod();
    }
}

impl ResourceSwitcher for AppContext {
    fn switch_ui_module(&mut self, file: &str) -> bool {
        if file.is_empty() {
            // Back to the built-in resources.
            self.drop_res_mod();
            return true;
        }
        let path = self.res_dir.join(file);
        let wide = path_to_wide(&path);
        let loaded = unsafe {
            LoadLibraryExW(
                PCWSTR(wide.as_ptr()),
                None,
                LOAD_LIBRARY_AS_DATAFILE | LOAD_LIBRARY_AS_IMAGE_RESOURCE,
            )
        };
        match loaded {
            Ok(module) => {
                self.drop_res_mod();
                self.res_mod = Some(module);
                true
            }
            Err(err) => {
                warn!("cannot load resource module {}: {}", path.display(), err);
                false
            }
        }
    }
}

impl DescribeUiModule for AppContext {
    fn describe(&self, file: Option<&Path>) -> String {
        match file {
            // The built-in entry reads the executable's own string table.
            None => load_string_from(self.instance, IDS_LANG),
            Some(path) => {
                let wide = path_to_wide(path);
                let loaded = unsafe {
                    LoadLibraryExW(
                        PCWSTR(wide.as_ptr()),
                        None,
                        LOAD_LIBRARY_AS_DATAFILE | LOAD_LIBRARY_AS_IMAGE_RESOURCE,
                    )
                };
                let Ok(module) = loaded else {
                    return String::new();
                };
                let descr = load_string_from(module, IDS_LANG);
                // Release what we loaded ourselves.
                unsafe {
                    let _ = FreeLibrary(module);
                }
                descr
            }
        }
    }
}

fn load_string_from(module: HMODULE, id: u32) -> String {
    let mut buf = [0u16; 256];
    let len = unsafe {
        LoadStringW(
            Some(module.into()),
            id,
            PWSTR(buf.as_mut_ptr()),
            buf.len() as i32,
        )
    };
    if len <= 0 {
        String::new()
    } else {
        String::from_utf16_lossy(&buf[..len as usize])
    }
}
