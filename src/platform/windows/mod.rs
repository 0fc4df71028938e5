//! Windows implementation: resource modules, HTML Help and the options UI.

pub mod help;
pub mod res;
pub mod ui;

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::locale::ScanSources;
use crate::pages::{HelpEngine, ResourceSwitcher};
use crate::storage::config;

/// Open the language options window against the real resource directories
/// and persist whatever the user committed.
pub fn run() {
    let options = config::load_options();

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    let sources = ScanSources::for_exe_dir(&exe_dir);

    let mut ctx = match res::AppContext::new(sources.ui_dir.clone()) {
        Ok(ctx) => ctx,
        Err(err) => {
            warn!("no module handle for the running process: {}", err);
            return;
        }
    };

    // Activate the stored language before any UI shows; a missing library
    // silently leaves the built-in resources active.
    if !options.ui_file.is_empty() {
        let _ = ctx.switch_ui_module(&options.ui_file);
    }
    let mut help = help::HtmlHelpEngine::new(sources.help_dir.clone());
    help.reinit(&options.help_file);

    let _committed = ui::lang_dialog::open_options_window(ctx, help, options);
    config::flush_config();
}
