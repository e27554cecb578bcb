use crate::diagnostic::*;
use crate::semantic::SemanticModel;
use crate::testing_library::TestingLibrarySettings;
use crate::testing_library::resolver::resolve_query;
use crate::utils_ast::{AnyJsExpressionExt, first_argument};
use biome_js_syntax::{
    AnyJsExpression, AnyJsFunctionBody, AnyJsStatement, JsCallExpression, JsFunctionBody,
};
use biome_rowan::{AstNode, AstNodeList};

/// ## What it does
///
/// Checks for `waitForElementToBeRemoved()` calls whose callback (or
/// argument) uses a `getBy*` or `findBy*` query.
///
/// ## Why is this bad?
///
/// `getBy*` queries throw and `findBy*` queries reject as soon as the element
/// is missing. Used to wait for an element to disappear, they fail with a
/// query error instead of letting `waitForElementToBeRemoved()` resolve.
/// `queryBy*` and `queryAllBy*` return `null` or an empty array, which is
/// exactly what the helper waits for.
///
/// This rule only runs on files importing from a testing-library module,
/// e.g. `@testing-library/react`. The list of modules can be changed with
/// `modules` or `extend-modules` in `[lint.testing-library]`.
///
/// ## Example
///
/// ```js
/// import { screen } from '@testing-library/react';
///
/// await waitForElementToBeRemoved(() => screen.getByText('Loading'));
///
/// const { findByText } = render(<App />);
/// await waitForElementToBeRemoved(() => {
///   return findByText('Loading');
/// });
/// ```
///
/// Use instead:
/// ```js
/// import { screen } from '@testing-library/react';
///
/// await waitForElementToBeRemoved(() => screen.queryByText('Loading'));
///
/// const { queryByText } = render(<App />);
/// await waitForElementToBeRemoved(() => {
///   return queryByText('Loading');
/// });
/// ```
pub struct PreferQueryByDisappearance;

impl Violation for PreferQueryByDisappearance {
    fn name(&self) -> String {
        "prefer_query_by_disappearance".to_string()
    }
    fn message_id(&self) -> String {
        "preferQueryByDisappearance".to_string()
    }
    fn body(&self) -> String {
        "Prefer using queryBy* when waiting for disappearance.".to_string()
    }
}

pub fn prefer_query_by_disappearance(
    ast: &JsCallExpression,
    semantic: &SemanticModel,
    settings: &TestingLibrarySettings,
) -> anyhow::Result<Option<Diagnostic>> {
    let callee = ast.callee()?;
    if !callee.is_identifier_named(&settings.wait_for_element_to_be_removed) {
        return Ok(None);
    }

    // Only the first argument matters, and spread arguments can't be checked.
    let Some(argument) = first_argument(ast) else {
        return Ok(None);
    };

    let asserts_presence = candidate_calls(&argument)
        .iter()
        .filter_map(|call| resolve_query(call, semantic, settings))
        .inspect(|query| {
            tracing::trace!(
                "`{name}` resolved to a {family} query ({stem})",
                name = query.name(),
                family = query.family(),
                stem = query.stem()
            );
        })
        .any(|query| query.family().asserts_presence());

    if !asserts_presence {
        return Ok(None);
    }

    let range = argument.syntax().text_trimmed_range();
    let diagnostic = Diagnostic::new(PreferQueryByDisappearance, range);

    Ok(Some(diagnostic))
}

/// Calls whose result the argument of `waitForElementToBeRemoved()` depends
/// on: the argument itself if it is a call, the body of an arrow function, or
/// the top-level calls and returned calls of a function body.
fn candidate_calls(argument: &AnyJsExpression) -> Vec<JsCallExpression> {
    match argument.omit_parentheses() {
        AnyJsExpression::JsCallExpression(call) => vec![call],
        AnyJsExpression::JsArrowFunctionExpression(arrow) => match arrow.body() {
            Ok(AnyJsFunctionBody::AnyJsExpression(body)) => as_call(&body).into_iter().collect(),
            Ok(AnyJsFunctionBody::JsFunctionBody(body)) => top_level_calls(&body),
            Err(_) => vec![],
        },
        AnyJsExpression::JsFunctionExpression(function) => match function.body() {
            Ok(body) => top_level_calls(&body),
            Err(_) => vec![],
        },
        _ => vec![],
    }
}

// Nested blocks, conditions and loops are not looked into.
fn top_level_calls(body: &JsFunctionBody) -> Vec<JsCallExpression> {
    body.statements()
        .iter()
        .filter_map(|statement| match statement {
            AnyJsStatement::JsReturnStatement(statement) => as_call(&statement.argument()?),
            AnyJsStatement::JsExpressionStatement(statement) => {
                as_call(&statement.expression().ok()?)
            }
            _ => None,
        })
        .collect()
}

fn as_call(expression: &AnyJsExpression) -> Option<JsCallExpression> {
    match expression.omit_parentheses() {
        AnyJsExpression::JsCallExpression(call) => Some(call),
        _ => None,
    }
}
