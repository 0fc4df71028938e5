//! Localized-resource discovery: candidate lists, directory scans and the
//! help-file description trailer.

pub mod entry;
pub mod scan;
pub mod trailer;

pub use entry::{item_height, paint_plan, Align, CandidateEntry, ItemPaint, LangList, PaintRole, Palette, TextRun};
pub use scan::{get_files, scan_help_languages, scan_ui_languages, DescribeUiModule, ScanSources};
pub use trailer::read_help_description;
