//
// Adapted from Air
// https://github.com/posit-dev/air/blob/affa92cd514525c4bab6c8c2ca251ea19414b89f/crates/workspace/src/discovery.rs
//
// MIT License - Posit PBC

use ignore::DirEntry;
use rustc_hash::FxHashSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use crate::fs;
use crate::fs::has_js_extension;
use crate::settings::Settings;
use crate::toml::find_tlint_toml_in_directory;
use crate::toml::parse_tlint_toml;
use air_workspace::resolve::PathResolver;
use etcetera::BaseStrategy;

/// Default patterns to exclude from linting: dependencies, build output and
/// coverage reports.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] =
    &[".git/", "node_modules/", "dist/", "build/", "coverage/"];

#[derive(Debug)]
pub struct DiscoveredSettings {
    pub directory: PathBuf,
    pub settings: Settings,
    /// Path to the config file that was used
    pub config_path: Option<PathBuf>,
}

/// Get the user config directory for tlint
fn get_user_config_dir() -> Option<PathBuf> {
    let strategy = etcetera::base_strategy::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("tlint"))
}

/// Walks a set of `paths` looking for `tlint.toml`s.
///
/// You typically follow this function up by loading the set of returned paths into a
/// [PathResolver].
///
/// For each `path`, we:
/// - Walk up its ancestors until the user config directory, looking for a `tlint.toml`
/// - If no config found in ancestors, fall back to checking the user config directory
pub fn discover_settings<P: AsRef<Path>>(paths: &[P]) -> anyhow::Result<Vec<DiscoveredSettings>> {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let mut seen = FxHashSet::default();
    let mut discovered_settings = Vec::with_capacity(paths.len());
    let user_config_dir = get_user_config_dir();

    for path in &paths {
        let mut found = None;

        for ancestor in path.ancestors() {
            // Visited from a previous path, whatever it holds is already known.
            if !seen.insert(ancestor) {
                break;
            }
            if let Some(toml) = find_tlint_toml_in_directory(ancestor) {
                found = Some((ancestor.to_path_buf(), toml));
                break;
            }
            if user_config_dir.as_deref() == Some(ancestor) {
                break;
            }
        }

        if found.is_none()
            && let Some(config_dir) = &user_config_dir
            && seen.insert(config_dir.as_path())
        {
            found = find_tlint_toml_in_directory(config_dir).map(|toml| (config_dir.clone(), toml));
        }

        if let Some((directory, toml)) = found {
            tracing::debug!("Using settings from {toml}", toml = toml.display());
            let settings = parse_settings(&toml)?;
            discovered_settings.push(DiscoveredSettings {
                directory,
                settings,
                config_path: Some(toml),
            });
        }
    }

    Ok(discovered_settings)
}

/// Parse [Settings] from a given `tlint.toml`
fn parse_settings(toml: &Path) -> anyhow::Result<Settings> {
    let options = parse_tlint_toml(toml)?;
    let settings = options.into_settings()?;
    Ok(settings)
}

type DiscoveredFiles = Vec<Result<PathBuf, ignore::Error>>;

/// For each provided `path`, recursively search for any JS or TS files within
/// that `path` that match our inclusion criteria.
///
/// Hidden and gitignored entries are skipped. The `exclude` patterns of the
/// first discovered `tlint.toml` apply, and so do [DEFAULT_EXCLUDE_PATTERNS]
/// unless disabled in the TOML or with `no_default_exclude`.
pub fn discover_js_file_paths<P: AsRef<Path>>(
    paths: &[P],
    resolver: &PathResolver<Settings>,
    no_default_exclude: bool,
) -> DiscoveredFiles {
    let paths: Vec<PathBuf> = paths.iter().map(fs::normalize_path).collect();

    let Some((first_path, paths)) = paths.split_first() else {
        return Vec::new();
    };

    let mut builder = ignore::WalkBuilder::new(first_path);
    for path in paths {
        builder.add(path);
    }

    builder
        .hidden(true)
        .parents(true)
        .ignore(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        // Respect `.gitignore` files outside of git repositories too.
        .require_git(false);

    if let Some(overrides) = exclude_overrides(resolver, no_default_exclude) {
        builder.overrides(overrides);
    }

    // Prefer `available_parallelism()`, with a max of 12 threads
    builder.threads(
        std::thread::available_parallelism()
            .map_or(1, std::num::NonZeroUsize::get)
            .min(12),
    );

    let state = FilesState::new();
    let mut visitor_builder = FilesVisitorBuilder::new(&state);
    builder.build_parallel().visit(&mut visitor_builder);

    let files = state.finish();
    tracing::debug!("Discovered {n} paths", n = files.len());
    files
}

/// Builds the `ignore` overrides rejecting the excluded patterns. Patterns
/// are relative to the directory of the `tlint.toml` they come from, or to the
/// current directory for the default ones.
fn exclude_overrides(
    resolver: &PathResolver<Settings>,
    no_default_exclude: bool,
) -> Option<ignore::overrides::Override> {
    let mut patterns: Vec<&str> = Vec::new();
    let mut root = fs::normalize_path(".");
    let mut use_default_exclude = !no_default_exclude;

    if let Some(item) = resolver.items().first() {
        let linter = &item.value().linter;
        root = item.path().to_path_buf();

        if let Some(exclude) = &linter.exclude {
            patterns.extend(exclude.iter().map(String::as_str));
        }
        use_default_exclude &= linter.default_exclude.unwrap_or(true);
    }

    if use_default_exclude {
        patterns.extend_from_slice(DEFAULT_EXCLUDE_PATTERNS);
    }

    if patterns.is_empty() {
        return None;
    }

    let mut override_builder = ignore::overrides::OverrideBuilder::new(root);
    for pattern in patterns {
        // A leading `!` turns a whitelist glob into an ignore glob.
        if let Err(e) = override_builder.add(&format!("!{pattern}")) {
            tracing::warn!("Failed to add exclude pattern '{}': {}", pattern, e);
        }
    }

    match override_builder.build() {
        Ok(overrides) => Some(overrides),
        Err(e) => {
            tracing::warn!("Failed to build exclude patterns: {}", e);
            None
        }
    }
}

/// Files collected by all the threads of the walker.
struct FilesState {
    files: Mutex<DiscoveredFiles>,
}

impl FilesState {
    fn new() -> Self {
        Self { files: Mutex::new(Vec::new()) }
    }

    fn finish(self) -> DiscoveredFiles {
        self.files.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Creates one [FilesVisitor] per walker thread.
struct FilesVisitorBuilder<'state> {
    state: &'state FilesState,
}

impl<'state> FilesVisitorBuilder<'state> {
    fn new(state: &'state FilesState) -> Self {
        Self { state }
    }
}

impl<'state> ignore::ParallelVisitorBuilder<'state> for FilesVisitorBuilder<'state> {
    fn build(&mut self) -> Box<dyn ignore::ParallelVisitor + 'state> {
        Box::new(FilesVisitor { files: vec![], state: self.state })
    }
}

/// Collects accepted files in a thread-local buffer, flushed into the shared
/// [FilesState] when the visitor is dropped.
struct FilesVisitor<'state> {
    files: DiscoveredFiles,
    state: &'state FilesState,
}

impl FilesVisitor<'_> {
    fn accept(&mut self, entry: DirEntry, reason: &str) -> ignore::WalkState {
        tracing::trace!("Included {path} ({reason})", path = entry.path().display());
        self.files.push(Ok(entry.into_path()));
        ignore::WalkState::Continue
    }
}

impl ignore::ParallelVisitor for FilesVisitor<'_> {
    /// Excluded and ignored directories never reach this method: the walker
    /// skips them as a whole, so `node_modules/react/index.js` is never looked
    /// at once `node_modules/` is rejected.
    fn visit(&mut self, result: Result<DirEntry, ignore::Error>) -> ignore::WalkState {
        let entry = match result {
            Ok(entry) => entry,
            Err(error) => {
                // Reported by the caller, the walk goes on.
                self.files.push(Err(error));
                return ignore::WalkState::Continue;
            }
        };

        let is_directory = entry.file_type().is_none_or(|ft| ft.is_dir());
        if is_directory {
            return ignore::WalkState::Continue;
        }

        // Files passed on the command line are linted whatever their
        // extension. Directories passed explicitly still go through the
        // excludes, so `tlint check node_modules` does nothing.
        if entry.depth() == 0 {
            return self.accept(entry, "explicit");
        }

        if has_js_extension(entry.path()) {
            return self.accept(entry, "extension");
        }

        tracing::trace!("Excluded {path}", path = entry.path().display());
        ignore::WalkState::Continue
    }
}

impl Drop for FilesVisitor<'_> {
    fn drop(&mut self) {
        // A poisoned lock means another visitor panicked; keep its files anyway.
        let mut files = self.state.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.append(&mut self.files);
    }
}
