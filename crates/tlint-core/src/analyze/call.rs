use crate::check::Checker;
use biome_js_syntax::JsCallExpression;

use crate::lints::prefer_query_by_disappearance::prefer_query_by_disappearance::prefer_query_by_disappearance;

pub fn call(js_expr: &JsCallExpression, checker: &mut Checker) -> anyhow::Result<()> {
    // Testing-library rules only run in files importing the library.
    if !checker.imports_testing_library {
        return Ok(());
    }

    if checker.is_rule_enabled("prefer_query_by_disappearance") {
        let diagnostic =
            prefer_query_by_disappearance(js_expr, &checker.semantic, &checker.testing_library)?;
        checker.report_diagnostic(diagnostic);
    }

    Ok(())
}
