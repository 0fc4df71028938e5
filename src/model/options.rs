//! Option record shared between the options pages and the application.
//!
//! Kept separate from the serialized `Config` in `storage::config` so the
//! persistence format can evolve without touching page logic.

/// User-visible options owned by the application and edited by the
/// options pages.
///
/// Both fields hold bare file names relative to the resource directory;
/// an empty string selects the built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Options {
    /// UI-language resource library, or empty for the built-in strings.
    pub ui_file: String,
    /// Translated help file, or empty for the default help file.
    pub help_file: String,
}

impl Options {
    /// True if the built-in UI resources are active.
    pub fn uses_builtin_ui(&self) -> bool {
        self.ui_file.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_is_builtin() {
        let opt = Options::default();
        assert!(opt.uses_builtin_ui());
        assert!(opt.help_file.is_empty());
    }

    #[test]
    fn options_with_ui_file_is_not_builtin() {
        let opt = Options {
            ui_file: "lang_de.dll".into(),
            help_file: String::new(),
        };
        assert!(!opt.uses_builtin_ui());
    }
}
