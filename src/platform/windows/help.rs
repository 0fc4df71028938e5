//! HTML Help collaborator: points the help viewer at the selected help
//! file and shows page topics.

use std::path::PathBuf;

use tracing::debug;
use windows::core::PCWSTR;
use windows::Win32::Data::HtmlHelp::{HtmlHelpW, HH_DISPLAY_TOPIC};

use super::res::to_wide;
use crate::model::constants::APP_NAME;
use crate::pages::HelpEngine;

/// The shipped default help file name.
fn default_help_file() -> String {
    format!("{}.chm", APP_NAME)
}

pub struct HtmlHelpEngine {
    help_dir: PathBuf,
    help_path: PathBuf,
}

impl HtmlHelpEngine {
    pub fn new(help_dir: PathBuf) -> Self {
        let help_path = help_dir.join(default_help_file());
        Self {
            help_dir,
            help_path,
        }
    }
}

impl HelpEngine for HtmlHelpEngine {
    fn reinit(&mut self, help_file: &str) {
        let file = if help_file.is_empty() {
            default_help_file()
        } else {
            help_file.to_string()
        };
        self.help_path = self.help_dir.join(file);
        debug!("help file is now {}", self.help_path.display());
    }

    fn show_topic(&mut self, topic: &str) {
        // CHM topic syntax: <file>::/<topic>
        let target = format!("{}{}", self.help_path.display(), topic);
        let wide = to_wide(&target);
        unsafe {
            HtmlHelpW(None, PCWSTR(wide.as_ptr()), HH_DISPLAY_TOPIC, 0);
        }
    }
}
