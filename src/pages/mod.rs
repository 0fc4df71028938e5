//! Options pages: pure controllers bound to native dialogs by the
//! platform layer.

pub mod lang_page;

pub use lang_page::{HelpEngine, LangCombo, LangOptionsPage, PageState, ResourceSwitcher};
