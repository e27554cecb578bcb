//
// Adapted from Air
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/toml.rs
// and
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/toml_options.rs
//
// MIT License - Posit PBC

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::settings::LinterSettings;
use crate::settings::Settings;
use crate::testing_library::TestingLibrarySettings;

#[derive(Debug)]
pub enum ParseTomlError {
    Read(PathBuf, io::Error),
    Deserialize(PathBuf, toml::de::Error),
}

impl std::error::Error for ParseTomlError {}

impl Display for ParseTomlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            // It's nicer if we don't make these paths relative, so we can quickly
            // jump to the TOML file to see what is wrong
            Self::Read(path, err) => {
                write!(f, "Failed to read {path}:\n{err}", path = path.display())
            }
            Self::Deserialize(path, err) => {
                write!(f, "Failed to parse {path}:\n{err}", path = path.display())
            }
        }
    }
}

pub fn parse_tlint_toml(path: &Path) -> Result<TomlOptions, ParseTomlError> {
    let toml =
        fs::read_to_string(path).map_err(|err| ParseTomlError::Read(path.to_path_buf(), err))?;
    toml::from_str(&toml).map_err(|err| ParseTomlError::Deserialize(path.to_path_buf(), err))
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TomlOptions {
    pub lint: Option<LinterTomlOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct LinterTomlOptions {
    /// # Rules to select
    ///
    /// Rule names or groups (e.g. `"TESTING"`). If this is empty, then all
    /// rules that are provided by `tlint` are used.
    pub select: Option<Vec<String>>,

    /// # Rules to ignore
    ///
    /// If this is empty, then no rules are excluded. This field has higher
    /// importance than `select`, so if a rule name appears by mistake in both
    /// `select` and `ignore`, it is ignored.
    pub ignore: Option<Vec<String>>,

    /// # Patterns to exclude from checking
    ///
    /// Exclude patterns are modeled after what you can provide in a
    /// [.gitignore](https://git-scm.com/docs/gitignore), and are resolved
    /// relative to the directory your `tlint.toml` is contained within:
    ///
    /// - `fixtures/` excludes any directory named `fixtures` below the root.
    /// - `/legacy.test.js` excludes only `root/legacy.test.js`.
    /// - `**/e2e/*.spec.ts` excludes the `.spec.ts` files placed directly in
    ///   any `e2e/` directory.
    pub exclude: Option<Vec<String>>,

    /// # Whether or not to use default exclude patterns
    ///
    /// The default set of excluded patterns are `.git/`, `node_modules/`,
    /// `dist/`, `build/` and `coverage/`.
    pub default_exclude: Option<bool>,

    /// # Options of the testing-library rules
    pub testing_library: Option<TestingLibraryTomlOptions>,
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TestingLibraryTomlOptions {
    /// # Modules recognized as a testing library
    ///
    /// Replaces the built-in list (`@testing-library/react`,
    /// `@testing-library/dom`, ...). Files that don't import from one of
    /// these modules are not checked by the testing-library rules.
    pub modules: Option<Vec<String>>,

    /// # Additional modules recognized as a testing library
    ///
    /// Added to `modules`, e.g. a local `test-utils` module re-exporting
    /// `@testing-library/react`.
    pub extend_modules: Option<Vec<String>>,
}

/// Return the path to the `tlint.toml` or `.tlint.toml` file in a given directory.
pub fn find_tlint_toml_in_directory<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    // Check for `tlint.toml` first, as we prioritize the "visible" one.
    let toml = path.as_ref().join("tlint.toml");
    if toml.is_file() {
        return Some(toml);
    }

    let toml = path.as_ref().join(".tlint.toml");
    if toml.is_file() {
        return Some(toml);
    }

    None
}

/// Find the path to the closest `tlint.toml` or `.tlint.toml` if one exists,
/// walking up the filesystem
pub fn find_tlint_toml<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    for directory in path.as_ref().ancestors() {
        if let Some(toml) = find_tlint_toml_in_directory(directory) {
            return Some(toml);
        }
    }
    None
}

impl TomlOptions {
    pub fn into_settings(self) -> anyhow::Result<Settings> {
        let linter = self.lint.unwrap_or_default();
        let testing_library = linter.testing_library.unwrap_or_default().into_settings()?;

        let linter = LinterSettings {
            select: linter.select,
            ignore: linter.ignore,
            exclude: linter.exclude,
            default_exclude: linter.default_exclude,
            testing_library,
        };

        Ok(Settings { linter })
    }
}

impl TestingLibraryTomlOptions {
    fn into_settings(self) -> anyhow::Result<TestingLibrarySettings> {
        let mut settings = match self.modules {
            Some(modules) => TestingLibrarySettings::with_modules(modules),
            None => TestingLibrarySettings::default(),
        };

        for module in self.extend_modules.unwrap_or_default() {
            if !settings.is_recognized_module(&module) {
                settings.modules.push(module);
            }
        }

        if let Some(empty) = settings.modules.iter().find(|x| x.trim().is_empty()) {
            return Err(anyhow::anyhow!(
                "Invalid module \"{empty}\" in `[lint.testing-library]` in 'tlint.toml': module names can't be empty."
            ));
        }

        Ok(settings)
    }
}
