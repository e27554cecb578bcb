use biome_js_syntax::{JsImport, JsSyntaxNode};
use biome_rowan::AstNode;

use crate::semantic::{Binding, BindingKind};
use crate::testing_library::TestingLibrarySettings;
use crate::utils_ast::import_source;

/// Whether the file imports anything from a recognized testing-library
/// module. Rules of this family are inert in files where this is false.
pub fn imports_testing_library(root: &JsSyntaxNode, settings: &TestingLibrarySettings) -> bool {
    root.descendants()
        .filter_map(JsImport::cast)
        .filter_map(|import| import_source(&import))
        .any(|source| settings.is_recognized_module(&source))
}

/// Whether `binding` is the import of `export` from a recognized module,
/// e.g. `screen` in `import { screen as s } from "@testing-library/react"`.
pub fn is_testing_library_import(
    binding: &Binding,
    export: &str,
    settings: &TestingLibrarySettings,
) -> bool {
    match binding.kind() {
        BindingKind::Import { source, imported } => {
            imported == export && settings.is_recognized_module(source)
        }
        _ => false,
    }
}
