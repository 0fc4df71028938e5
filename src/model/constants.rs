//! Application constants: file masks, trailer layout, paint metrics and
//! resource ids shared between the pure core and the Windows layer.

// === Application identity ===

/// Application name, also the stem of the shipped help files.
pub const APP_NAME: &str = "DeskPins";

// === Localization file masks ===

/// Mask for UI-language resource libraries next to the executable.
pub const UI_LANG_MASK: &str = "lang*.dll";

/// Mask for translated help files next to the executable.
pub const HELP_FILE_MASK: &str = "DeskPins*.chm";

/// Sibling source-tree directory with UI-language libraries (debug builds).
pub const UI_LANG_DEV_DIR: &str = "../localization";

/// Sibling source-tree directory with help files (debug builds).
pub const HELP_FILE_DEV_DIR: &str = "../help";

// === Help-file trailer ===

/// Signature stored in the last four bytes of a marked help file.
pub const HELP_MARKER_SIG: u32 = 0xefda_7a00;

/// Bytes occupied by the fixed trailer fields (length + signature).
pub const HELP_TRAILER_SUFFIX: u64 = 8;

// === List item painting ===

/// Extra pixels added to the font line height for each list item.
pub const ITEM_HEIGHT_PAD: i32 = 2;

/// Horizontal inset of item text from the item edges.
pub const ITEM_TEXT_INSET_X: i32 = 2;

/// Vertical inset of item text from the item top.
pub const ITEM_TEXT_INSET_Y: i32 = 1;

// === Help topics ===

/// Help topic shown for the language options page.
pub const LANG_PAGE_HELP_TOPIC: &str = "::/optlang.htm";

// === String resources ===

/// String-table id of the language name embedded in each resource module.
pub const IDS_LANG: u32 = 40;

/// Options window title, `%1` = application name.
pub const IDS_OPT_TITLE: u32 = 41;

/// Label of the UI-language combo.
pub const IDS_UI_LANG_LABEL: u32 = 42;

/// Label of the help-language combo.
pub const IDS_HELP_LANG_LABEL: u32 = 43;
