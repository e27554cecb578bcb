use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use biome_js_syntax::JsFileSource;
use path_absolutize::Absolutize;

/// Extensions of the files that are linted when discovered in a directory.
pub const JS_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Absolute version of `path`, with `.` and `..` components resolved. Falls
/// back to the path as given if the current directory is unavailable.
pub fn normalize_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match path.absolutize() {
        Ok(path) => path.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

pub fn has_js_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| JS_EXTENSIONS.contains(&ext))
}

/// How a file is parsed, based on its extension. Anything unknown is parsed
/// as a JSX module since test files often omit the `x`.
pub fn js_file_source(path: &Path) -> JsFileSource {
    match path.extension().and_then(OsStr::to_str) {
        Some("cjs") => JsFileSource::js_script(),
        Some("ts" | "mts" | "cts") => JsFileSource::ts(),
        Some("tsx") => JsFileSource::tsx(),
        _ => JsFileSource::jsx(),
    }
}
