//! Language options page: the lifecycle state machine behind the dialog
//! glue.
//!
//! The controller owns the two candidate lists and talks to its
//! collaborators through traits, so the whole initialize → validate →
//! apply cycle runs without a window. The Windows layer forwards the
//! property-sheet notifications here and paints what the lists describe.

use tracing::{debug, warn};

use crate::locale::{
    scan_help_languages, scan_ui_languages, DescribeUiModule, LangList, ScanSources,
};
use crate::model::constants::LANG_PAGE_HELP_TOPIC;
use crate::model::Options;

/// Switches the running application's UI resource module.
pub trait ResourceSwitcher {
    /// Activate the given resource library (empty = built-in). Returns
    /// false when the module cannot be loaded.
    fn switch_ui_module(&mut self, file: &str) -> bool;
}

/// Help-display collaborator.
pub trait HelpEngine {
    /// Point the help subsystem at the given help file (empty = default).
    fn reinit(&mut self, help_file: &str);
    /// Show a topic in the current help file.
    fn show_topic(&mut self, topic: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Uninitialized,
    Active,
    Applied,
}

/// Which of the page's two combos an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangCombo {
    UiLanguage,
    HelpLanguage,
}

pub struct LangOptionsPage {
    state: PageState,
    ui_langs: LangList,
    help_langs: LangList,
    dirty: bool,
}

impl LangOptionsPage {
    pub fn new() -> Self {
        Self {
            state: PageState::Uninitialized,
            ui_langs: LangList::new(),
            help_langs: LangList::new(),
            dirty: false,
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// True once an edit should enable the sheet's apply control.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn ui_langs(&self) -> &LangList {
        &self.ui_langs
    }

    pub fn help_langs(&self) -> &LangList {
        &self.help_langs
    }

    /// Populate both lists and pre-select the stored options.
    ///
    /// The page needs the shared option record; without it the page cancels
    /// (returns false) and shows no partial UI.
    pub fn initialize(
        &mut self,
        opt: Option<&Options>,
        sources: &ScanSources,
        exe_name: &str,
        describe: &dyn DescribeUiModule,
    ) -> bool {
        let Some(opt) = opt else {
            warn!("language page initialized without an option record");
            return false;
        };

        self.ui_langs.clear();
        self.help_langs.clear();
        scan_ui_languages(
            &mut self.ui_langs,
            &sources.ui_dir,
            exe_name,
            describe,
            &opt.ui_file,
        );
        scan_help_languages(&mut self.help_langs, &sources.help_dir, &opt.help_file);

        self.state = PageState::Active;
        self.dirty = false;
        true
    }

    /// Invoked before the page is deactivated. Reserved for future input
    /// validation; the current page has nothing to reject.
    pub fn validate(&self) -> bool {
        true
    }

    /// The hosting control dropped an item: free its slot.
    pub fn release_entry(&mut self, combo: LangCombo, slot: usize) {
        match combo {
            LangCombo::UiLanguage => self.ui_langs.release(slot),
            LangCombo::HelpLanguage => self.help_langs.release(slot),
        }
    }

    /// A combo selection changed: record it and mark the page dirty.
    pub fn selection_changed(&mut self, combo: LangCombo, slot: usize) {
        let list = match combo {
            LangCombo::UiLanguage => &mut self.ui_langs,
            LangCombo::HelpLanguage => &mut self.help_langs,
        };
        if list.set_selection(slot) {
            self.dirty = true;
            if self.state == PageState::Applied {
                self.state = PageState::Active;
            }
        }
    }

    /// Commit the current selections into the option record.
    ///
    /// The UI-language switch is attempted only when the selection differs
    /// from the stored value; a failed switch falls back to the built-in
    /// default instead of keeping the failed candidate. The help engine is
    /// reinitialized on every apply, whether or not the selection changed.
    pub fn apply(
        &mut self,
        opt: &mut Options,
        switcher: &mut dyn ResourceSwitcher,
        help: &mut dyn HelpEngine,
    ) {
        if self.state == PageState::Uninitialized {
            warn!("apply on uninitialized language page ignored");
            return;
        }

        let ui_file = self.ui_langs.selected_file_name();
        if opt.ui_file != ui_file {
            if switcher.switch_ui_module(&ui_file) {
                debug!("ui language switched to {:?}", ui_file);
                opt.ui_file = ui_file;
            } else {
                warn!("ui language switch to {:?} failed, reverting to built-in", ui_file);
                opt.ui_file = String::new();
            }
        }

        opt.help_file = self.help_langs.selected_file_name();
        help.reinit(&opt.help_file);

        self.state = PageState::Applied;
        self.dirty = false;
    }

    /// F1 or the sheet's help button: show this page's topic.
    pub fn help_requested(&self, help: &mut dyn HelpEngine) {
        help.show_topic(LANG_PAGE_HELP_TOPIC);
    }
}

impl Default for LangOptionsPage {
    fn default() -> Self {
        Self::new()
    }
}
