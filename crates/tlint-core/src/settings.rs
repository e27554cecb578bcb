//
// Adapted from Air
// https://github.com/posit-dev/air/blob/main/crates/workspace/src/settings.rs
//
// MIT License - Posit PBC

use crate::testing_library::TestingLibrarySettings;

/// Resolved configuration settings used within tlint
#[derive(Debug, Default)]
pub struct Settings {
    pub linter: LinterSettings,
}

#[derive(Debug, Default)]
pub struct LinterSettings {
    /// `None` means no rules were specified, not an empty selection.
    pub select: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
    /// Gitignore-style patterns, relative to the directory of the TOML file.
    pub exclude: Option<Vec<String>>,
    pub default_exclude: Option<bool>,
    pub testing_library: TestingLibrarySettings,
}
