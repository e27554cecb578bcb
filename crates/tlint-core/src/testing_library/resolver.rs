use biome_js_syntax::{
    AnyJsExpression, JsCallExpression, JsIdentifierExpression, JsStaticMemberExpression,
};

use crate::semantic::{BindingKind, DestructuredFrom, SemanticModel};
use crate::testing_library::TestingLibrarySettings;
use crate::testing_library::imports::is_testing_library_import;
use crate::testing_library::query::QueryAccessor;
use crate::utils_ast::{AnyJsExpressionExt, static_member_name};

/// Resolves the query accessor a call invokes, if any.
///
/// Two shapes are understood:
/// - `screen.getByText(...)`, where `screen` is the `screen` import of a
///   recognized module (possibly renamed);
/// - `getByText(...)`, where `getByText` was destructured from `screen`, from
///   the `render` import, or from the result of any call. The property key is
///   what counts, not the local name.
///
/// Anything else returns `None`.
pub fn resolve_query(
    call: &JsCallExpression,
    model: &SemanticModel,
    settings: &TestingLibrarySettings,
) -> Option<QueryAccessor> {
    match call.callee().ok()?.omit_parentheses() {
        AnyJsExpression::JsStaticMemberExpression(member) => {
            resolve_screen_member(&member, model, settings)
        }
        AnyJsExpression::JsIdentifierExpression(identifier) => {
            resolve_destructured(&identifier, model, settings)
        }
        _ => None,
    }
}

fn resolve_screen_member(
    member: &JsStaticMemberExpression,
    model: &SemanticModel,
    settings: &TestingLibrarySettings,
) -> Option<QueryAccessor> {
    let AnyJsExpression::JsIdentifierExpression(object) = member.object().ok()?.omit_parentheses()
    else {
        return None;
    };

    let binding = model.resolve_reference(&object)?;
    if !is_testing_library_import(binding, &settings.screen, settings) {
        return None;
    }

    let name = static_member_name(member)?;
    Some(QueryAccessor::new(name.text()))
}

fn resolve_destructured(
    identifier: &JsIdentifierExpression,
    model: &SemanticModel,
    settings: &TestingLibrarySettings,
) -> Option<QueryAccessor> {
    let binding = model.resolve_reference(identifier)?;
    let BindingKind::Destructured { key, from } = binding.kind() else {
        return None;
    };

    let from_query_object = match from {
        // Any call is treated as a render-like setup returning the queries.
        DestructuredFrom::Call => true,
        DestructuredFrom::Identifier { name, range } => model
            .resolve(name, range.start())
            .is_some_and(|source| {
                is_testing_library_import(source, &settings.screen, settings)
                    || is_testing_library_import(source, &settings.render, settings)
            }),
        DestructuredFrom::Other => false,
    };

    from_query_object.then(|| QueryAccessor::new(key.clone()))
}
