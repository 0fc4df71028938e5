//! Tests for the localized-resource discovery layer: directory scans,
//! trailer parsing and the list model contract.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use deskpins::locale::{
    get_files, read_help_description, scan_help_languages, scan_ui_languages, paint_plan,
    Align, CandidateEntry, DescribeUiModule, LangList, PaintRole,
};
use deskpins::model::constants::{HELP_MARKER_SIG, UI_LANG_MASK};

const EXE_NAME: &str = "DeskPins.exe";

/// Resolves descriptions from a fixed table instead of loading modules.
struct FakeDescriptions;

impl DescribeUiModule for FakeDescriptions {
    fn describe(&self, file: Option<&Path>) -> String {
        match file {
            None => "Built-in English".to_string(),
            Some(path) => match path.file_name().and_then(|n| n.to_str()) {
                Some(name) if name.eq_ignore_ascii_case("lang_fr.dll") => "French".into(),
                Some(name) if name.eq_ignore_ascii_case("lang_de.dll") => "German".into(),
                _ => String::new(),
            },
        }
    }
}

fn write_marked_help(path: &Path, payload: &[u8]) {
    let mut bytes = b"compiled help body".to_vec();
    bytes.extend_from_slice(payload);
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&HELP_MARKER_SIG.to_le_bytes());
    fs::write(path, bytes).unwrap();
}

fn touch(path: &Path) {
    fs::write(path, b"").unwrap();
}

// === Directory scans ===

#[test]
fn empty_dir_yields_exactly_the_builtin_entry() {
    let dir = tempdir().unwrap();
    let mut list = LangList::new();
    scan_ui_languages(&mut list, dir.path(), EXE_NAME, &FakeDescriptions, "");

    assert_eq!(list.len(), 1);
    let (_, entry) = list.iter_ordered().next().unwrap();
    assert_eq!(entry.file_name, "");
    assert_eq!(entry.display_name, EXE_NAME);
    assert_eq!(entry.description, "Built-in English");
    // the empty stored selection matches the built-in entry
    assert!(list.selection().is_some());
    assert_eq!(list.selected_file_name(), "");
}

#[test]
fn builtin_entry_is_unique_and_added_after_the_files() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("lang_fr.dll"));
    touch(&dir.path().join("lang_de.dll"));

    let mut list = LangList::new();
    scan_ui_languages(&mut list, dir.path(), EXE_NAME, &FakeDescriptions, "");

    assert_eq!(list.len(), 3);
    let builtins: Vec<usize> = list
        .iter_ordered()
        .filter(|(_, e)| e.is_builtin())
        .map(|(slot, _)| slot)
        .collect();
    assert_eq!(builtins.len(), 1);
    // slots are handed out in insertion order, so the default comes last
    assert_eq!(builtins[0], list.len() - 1);
}

#[test]
fn selection_marking_is_case_insensitive() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("lang_fr.dll"));
    touch(&dir.path().join("lang_de.dll"));

    let mut list = LangList::new();
    scan_ui_languages(
        &mut list,
        dir.path(),
        EXE_NAME,
        &FakeDescriptions,
        "LANG_FR.DLL",
    );

    assert_eq!(list.selected_file_name(), "lang_fr.dll");
}

#[test]
fn no_selection_marked_for_unknown_current_file() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("lang_fr.dll"));

    let mut list = LangList::new();
    scan_ui_languages(
        &mut list,
        dir.path(),
        EXE_NAME,
        &FakeDescriptions,
        "lang_zz.dll",
    );

    assert_eq!(list.selection(), None);
    assert_eq!(list.selected_file_name(), "");
}

#[test]
fn unreadable_ui_description_degrades_to_empty() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("lang_xx.dll"));

    let mut list = LangList::new();
    scan_ui_languages(&mut list, dir.path(), EXE_NAME, &FakeDescriptions, "");

    let entry = list
        .iter_ordered()
        .map(|(_, e)| e)
        .find(|e| e.file_name == "lang_xx.dll")
        .unwrap();
    assert_eq!(entry.description, "");
}

#[test]
fn help_scan_of_empty_dir_yields_empty_list() {
    let dir = tempdir().unwrap();
    let mut list = LangList::new();
    scan_help_languages(&mut list, dir.path(), "");
    assert!(list.is_empty());
}

#[test]
fn help_scan_reads_trailer_descriptions_and_marks_selection() {
    let dir = tempdir().unwrap();
    write_marked_help(&dir.path().join("DeskPins_FR.chm"), b"Aide en fran\xe7ais");
    write_marked_help(&dir.path().join("DeskPins_DE.chm"), b"Deutsche Hilfe");

    let mut list = LangList::new();
    scan_help_languages(&mut list, dir.path(), "deskpins_fr.chm");

    assert_eq!(list.len(), 2);
    assert_eq!(list.selected_file_name(), "DeskPins_FR.chm");
    let fr = list
        .iter_ordered()
        .map(|(_, e)| e)
        .find(|e| e.file_name == "DeskPins_FR.chm")
        .unwrap();
    assert_eq!(fr.description, "Aide en fran\u{e7}ais");
}

#[test]
fn get_files_matches_mask_case_insensitively() {
    let dir = tempdir().unwrap();
    touch(&dir.path().join("LANG_ES.DLL"));
    touch(&dir.path().join("lang_fr.dll"));
    touch(&dir.path().join("readme.txt"));
    fs::create_dir(dir.path().join("lang_subdir.dll")).unwrap();

    let mut files = get_files(dir.path(), UI_LANG_MASK);
    files.sort();
    assert_eq!(files, ["LANG_ES.DLL", "lang_fr.dll"]);
}

#[test]
fn get_files_missing_dir_yields_nothing() {
    let dir = tempdir().unwrap();
    let files = get_files(&dir.path().join("not_there"), UI_LANG_MASK);
    assert!(files.is_empty());
}

// === Trailer parsing ===

#[test]
fn well_formed_trailer_decodes_exactly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("DeskPins_FR.chm");
    // "Français" in Windows-1252
    write_marked_help(&path, b"Fran\xe7ais");
    assert_eq!(read_help_description(&path), "Fran\u{e7}ais");
}

#[test]
fn trailer_with_empty_payload_decodes_to_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("DeskPins_XX.chm");
    write_marked_help(&path, b"");
    assert_eq!(read_help_description(&path), "");
}

#[test]
fn short_file_yields_empty_description() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("DeskPins_short.chm");
    fs::write(&path, b"abc").unwrap();
    assert_eq!(read_help_description(&path), "");
}

#[test]
fn wrong_signature_yields_empty_description() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("DeskPins_bad.chm");
    let mut bytes = b"body".to_vec();
    bytes.extend_from_slice(b"text");
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(&(HELP_MARKER_SIG ^ 1).to_le_bytes());
    fs::write(&path, bytes).unwrap();
    assert_eq!(read_help_description(&path), "");
}

#[test]
fn oversized_length_field_yields_empty_description() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("DeskPins_trunc.chm");
    let mut bytes = b"x".to_vec();
    bytes.extend_from_slice(&1000u32.to_le_bytes());
    bytes.extend_from_slice(&HELP_MARKER_SIG.to_le_bytes());
    fs::write(&path, bytes).unwrap();
    assert_eq!(read_help_description(&path), "");
}

#[test]
fn missing_file_yields_empty_description() {
    let dir = tempdir().unwrap();
    assert_eq!(read_help_description(&dir.path().join("nope.chm")), "");
}

// === Ordering and paint plan ===

fn entry(file: &str, descr: &str) -> CandidateEntry {
    CandidateEntry::new(file.to_string(), file.to_string(), descr.to_string())
}

#[test]
fn descriptions_order_case_insensitively() {
    let fr = entry("lang_fr.dll", "french");
    let de = entry("lang_de.dll", "German");
    assert_eq!(
        CandidateEntry::cmp_entries(Some(&fr), Some(&de)),
        std::cmp::Ordering::Less
    );
    assert_eq!(
        CandidateEntry::cmp_entries(Some(&de), Some(&fr)),
        std::cmp::Ordering::Greater
    );
}

#[test]
fn absent_entries_compare_equal() {
    let fr = entry("lang_fr.dll", "French");
    assert_eq!(
        CandidateEntry::cmp_entries(None, None),
        std::cmp::Ordering::Equal
    );
    assert_eq!(
        CandidateEntry::cmp_entries(Some(&fr), None),
        std::cmp::Ordering::Equal
    );
}

#[test]
fn paint_plan_places_description_left_and_name_right() {
    let e = entry("lang_fr.dll", "French");
    let plan = paint_plan(&e, false);
    assert_eq!(plan.background, PaintRole::Window);
    assert_eq!(plan.runs[0].text, "French");
    assert_eq!(plan.runs[0].align, Align::Left);
    assert_eq!(plan.runs[0].color, PaintRole::WindowText);
    assert_eq!(plan.runs[1].text, "lang_fr.dll");
    assert_eq!(plan.runs[1].align, Align::Right);
    assert_eq!(plan.runs[1].color, PaintRole::DimText);
}

#[test]
fn paint_plan_uses_highlight_roles_when_selected() {
    let e = entry("lang_fr.dll", "French");
    let plan = paint_plan(&e, true);
    assert_eq!(plan.background, PaintRole::Highlight);
    assert_eq!(plan.runs[0].color, PaintRole::HighlightText);
    assert_eq!(plan.runs[1].color, PaintRole::HighlightText);
}
