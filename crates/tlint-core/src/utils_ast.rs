//! Extension traits for AST nodes providing ergonomic helper methods.

use biome_js_syntax::{
    AnyJsCallArgument, AnyJsExpression, AnyJsName, JsCallExpression, JsIdentifierExpression,
    JsImport, JsModuleSource, JsStaticMemberExpression,
};
use biome_rowan::{AstNode, AstSeparatedList, TokenText};

use crate::utils::unquote;

/// Extension trait for JS expressions.
pub trait AnyJsExpressionExt {
    /// Returns the expression with any number of wrapping parentheses removed.
    /// `((x))` gives `x`.
    fn omit_parentheses(&self) -> AnyJsExpression;

    /// Returns true if this is a bare identifier with the given name.
    fn is_identifier_named(&self, name: &str) -> bool;
}

impl AnyJsExpressionExt for AnyJsExpression {
    fn omit_parentheses(&self) -> AnyJsExpression {
        let mut expression = self.clone();
        while let AnyJsExpression::JsParenthesizedExpression(parenthesized) = &expression {
            match parenthesized.expression() {
                Ok(inner) => expression = inner,
                Err(_) => break,
            }
        }
        expression
    }

    fn is_identifier_named(&self, name: &str) -> bool {
        match self.omit_parentheses() {
            AnyJsExpression::JsIdentifierExpression(identifier) => {
                identifier_name(&identifier).is_some_and(|text| text.text() == name)
            }
            _ => false,
        }
    }
}

/// Text of the name an identifier expression refers to, e.g. `screen` in
/// `screen.getByText()`.
pub fn identifier_name(identifier: &JsIdentifierExpression) -> Option<TokenText> {
    let token = identifier.name().ok()?.value_token().ok()?;
    Some(token.token_text_trimmed())
}

/// Text of the member of a static member expression, e.g. `getByText` in
/// `screen.getByText`. Private names (`this.#x`) are ignored.
pub fn static_member_name(member: &JsStaticMemberExpression) -> Option<TokenText> {
    match member.member().ok()? {
        AnyJsName::JsName(name) => Some(name.value_token().ok()?.token_text_trimmed()),
        _ => None,
    }
}

/// First argument of a call if it is a plain expression. Returns `None` for
/// calls without arguments or starting with a spread argument (`f(...args)`).
pub fn first_argument(call: &JsCallExpression) -> Option<AnyJsExpression> {
    let arguments = call.arguments().ok()?;
    match arguments.args().first()?.ok()? {
        AnyJsCallArgument::AnyJsExpression(expression) => Some(expression),
        _ => None,
    }
}

/// Module specifier of an import declaration, without quotes. Works for every
/// kind of import clause, including bare `import "x"`.
pub fn import_source(import: &JsImport) -> Option<String> {
    let source = import.syntax().descendants().find_map(JsModuleSource::cast)?;
    let token = source.value_token().ok()?;
    Some(unquote(token.text_trimmed()).to_string())
}
