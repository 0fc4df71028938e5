//! Native windows and dialogs.

pub mod lang_dialog;

pub use lang_dialog::open_options_window;
