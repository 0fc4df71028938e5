//! Directory scans that populate the language lists.
//!
//! Enumeration never fails: unreadable directories and unreadable resources
//! degrade to an empty result or an empty description. UI-language
//! description lookup goes through [`DescribeUiModule`] so the scan logic
//! stays free of platform resource APIs.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use tracing::debug;

use super::entry::{CandidateEntry, LangList};
use super::trailer::read_help_description;
use crate::model::constants::*;

/// Resolves the language name embedded in a UI resource module.
/// `None` asks for the running process's own resources.
pub trait DescribeUiModule {
    fn describe(&self, file: Option<&Path>) -> String;
}

/// Directories the language lists are scanned from.
///
/// Release builds read next to the executable; debug builds read the
/// sibling source-tree directories so freshly built translations show up
/// without an install step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSources {
    pub ui_dir: PathBuf,
    pub help_dir: PathBuf,
}

impl ScanSources {
    pub fn for_exe_dir(exe_dir: &Path) -> Self {
        if cfg!(debug_assertions) {
            Self {
                ui_dir: exe_dir.join(UI_LANG_DEV_DIR),
                help_dir: exe_dir.join(HELP_FILE_DEV_DIR),
            }
        } else {
            Self {
                ui_dir: exe_dir.to_path_buf(),
                help_dir: exe_dir.to_path_buf(),
            }
        }
    }

    /// Both lists from one directory, used by tests and by tools that ship
    /// everything in a single folder.
    pub fn single_dir(dir: &Path) -> Self {
        Self {
            ui_dir: dir.to_path_buf(),
            help_dir: dir.to_path_buf(),
        }
    }
}

/// File names in `dir` matching `mask`, case-insensitively, in the order
/// the filesystem returns them.
pub fn get_files(dir: &Path, mask: &str) -> Vec<String> {
    let Ok(pattern) = Pattern::new(mask) else {
        return Vec::new();
    };
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("cannot scan {}: {}", dir.display(), err);
            return Vec::new();
        }
    };
    let mut files = Vec::new();
    for entry in entries.flatten() {
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if pattern.matches_with(name, options) {
            files.push(name.to_string());
        }
    }
    files
}

/// Fill `list` with the UI-language libraries found in `dir` plus the
/// synthetic built-in entry (empty file name, shown under the host
/// executable's name), marking the entry matching `current` as selected.
pub fn scan_ui_languages(
    list: &mut LangList,
    dir: &Path,
    exe_name: &str,
    describe: &dyn DescribeUiModule,
    current: &str,
) {
    let mut files = get_files(dir, UI_LANG_MASK);
    debug!("{} ui language file(s) in {}", files.len(), dir.display());
    files.push(String::new()); // built-in default, always appended last

    for file_name in files {
        let (display_name, description) = if file_name.is_empty() {
            (exe_name.to_string(), describe.describe(None))
        } else {
            let description = describe.describe(Some(&dir.join(&file_name)));
            (file_name.clone(), description)
        };
        let selected = file_name.eq_ignore_ascii_case(current);
        let slot = list.insert(CandidateEntry::new(file_name, display_name, description));
        if selected {
            list.set_selection(slot);
        }
    }
}

/// Fill `list` with the translated help files found in `dir`, resolving
/// descriptions from the embedded trailer. No synthetic entry is added; a
/// directory without matches yields an empty list.
pub fn scan_help_languages(list: &mut LangList, dir: &Path, current: &str) {
    let files = get_files(dir, HELP_FILE_MASK);
    debug!("{} help file(s) in {}", files.len(), dir.display());

    for file_name in files {
        let description = read_help_description(&dir.join(&file_name));
        let selected = file_name.eq_ignore_ascii_case(current);
        let display_name = file_name.clone();
        let slot = list.insert(CandidateEntry::new(file_name, display_name, description));
        if selected {
            list.set_selection(slot);
        }
    }
}
