use crate::error::ParseError;
use air_fs::relativize_path;
use anyhow::{Context, Result};
use biome_js_parser::JsParserOptions;
use biome_js_syntax::{JsCallExpression, JsSyntaxKind, JsSyntaxNode};
use biome_rowan::AstNode;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use crate::analyze;
use crate::config::Config;
use crate::diagnostic::*;
use crate::fs::js_file_source;
use crate::rule_table::RuleTable;
use crate::semantic::{SemanticModel, semantic_model};
use crate::testing_library::TestingLibrarySettings;
use crate::testing_library::imports::imports_testing_library;
use crate::utils::*;

pub fn check(config: Config) -> Vec<(String, Result<Vec<Diagnostic>, anyhow::Error>)> {
    // Wrap config in Arc to avoid expensive clones in parallel execution
    let config = Arc::new(config);

    config
        .paths
        .par_iter()
        .map(|file| {
            let res = check_path(file, Arc::clone(&config));
            (relativize_path(file), res)
        })
        .collect()
}

pub fn check_path(path: &PathBuf, config: Arc<Config>) -> Result<Vec<Diagnostic>, anyhow::Error> {
    let path = relativize_path(path);
    let contents = fs::read_to_string(Path::new(&path))
        .with_context(|| format!("Failed to read file: {path}"))?;

    let checks = get_checks(&contents, &PathBuf::from(&path), &config)
        .with_context(|| format!("Failed to get checks for file: {path}"))?;

    Ok(checks)
}

#[derive(Debug)]
// The object that collects diagnostics while walking the tree. One per
// analyzed file.
pub struct Checker {
    // The diagnostics to report (possibly empty).
    pub diagnostics: Vec<Diagnostic>,
    // The rules to apply.
    pub rules: RuleTable,
    // Scopes and bindings of the file, built before any rule runs.
    pub semantic: SemanticModel,
    pub testing_library: TestingLibrarySettings,
    // Does the file import a recognized testing-library module? Computed once
    // per file, rules of the testing-library family are skipped otherwise.
    pub imports_testing_library: bool,
}

impl Checker {
    fn new(
        rules: RuleTable,
        semantic: SemanticModel,
        testing_library: TestingLibrarySettings,
        imports_testing_library: bool,
    ) -> Self {
        Self {
            diagnostics: vec![],
            rules,
            semantic,
            testing_library,
            imports_testing_library,
        }
    }

    // This takes an Option<Diagnostic> because each lint rule reports a
    // Some(Diagnostic) or None.
    pub(crate) fn report_diagnostic(&mut self, diagnostic: Option<Diagnostic>) {
        if let Some(diagnostic) = diagnostic {
            self.diagnostics.push(diagnostic);
        }
    }

    pub(crate) fn is_rule_enabled(&self, rule: &str) -> bool {
        self.rules.enabled(rule)
    }
}

// Takes the JS code as a string, parses it, and obtains a (possibly empty)
// vector of `Diagnostic`s.
//
// If there are diagnostics to report, this is also where their range in the
// string is converted to their location (row, column).
pub fn get_checks(contents: &str, file: &Path, config: &Config) -> Result<Vec<Diagnostic>> {
    let parsed = biome_js_parser::parse(contents, js_file_source(file), JsParserOptions::default());

    if parsed.has_errors() {
        return Err(ParseError { filename: file.to_path_buf() }.into());
    }

    if config.rules.is_empty() {
        return Ok(vec![]);
    }

    let syntax = parsed.syntax();

    let imports_testing_library = imports_testing_library(&syntax, &config.testing_library);
    if !imports_testing_library {
        tracing::trace!(
            "No testing-library import in {file}",
            file = file.display()
        );
    }

    let mut checker = Checker::new(
        config.rules.clone(),
        semantic_model(&syntax),
        config.testing_library.clone(),
        imports_testing_library,
    );

    // Nodes are visited in document order, so diagnostics are too.
    for node in syntax.descendants() {
        check_node(&node, &mut checker)?;
    }

    let diagnostics: Vec<Diagnostic> = checker
        .diagnostics
        .into_iter()
        .map(|mut x| {
            x.filename = file.to_path_buf();
            x
        })
        .collect();

    let loc_new_lines = find_new_lines(contents);
    let diagnostics = compute_lints_location(diagnostics, contents, &loc_new_lines);

    Ok(diagnostics)
}

// Dispatches a node to the set of rules that apply to its kind, e.g. call
// expressions are sent to analyze::call::call. The recursion is done by the
// caller through `descendants()`, so this doesn't need to know which kinds
// have children.
pub fn check_node(node: &JsSyntaxNode, checker: &mut Checker) -> anyhow::Result<()> {
    if node.kind() == JsSyntaxKind::JS_CALL_EXPRESSION
        && let Some(call) = JsCallExpression::cast(node.clone())
    {
        analyze::call::call(&call, checker)?;
    }

    Ok(())
}
