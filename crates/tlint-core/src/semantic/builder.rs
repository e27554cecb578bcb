use biome_js_syntax::JsSyntaxKind::{self, *};
use biome_js_syntax::{
    AnyJsExpression, JsForVariableDeclaration, JsIdentifierBinding, JsImport, JsLiteralExportName,
    JsNamedImportSpecifier, JsObjectBindingPatternProperty, JsSyntaxNode, JsVariableDeclaration,
    JsVariableDeclarator,
};
use biome_rowan::{AstNode, TextRange};
use rustc_hash::FxHashMap;

use crate::semantic::model::{
    Binding, BindingId, BindingKind, DestructuredFrom, Scope, ScopeId, SemanticModel,
};
use crate::utils::unquote;
use crate::utils_ast::{AnyJsExpressionExt, identifier_name, import_source};

/// Nodes that open a new lexical scope. Signatures without a body (TS
/// function types, method signatures, `declare function`...) count too, so
/// that their parameters don't leak into the enclosing scope.
pub(crate) fn is_scope_node(kind: JsSyntaxKind) -> bool {
    is_block_scope_node(kind)
        || matches!(
            kind,
            JS_FUNCTION_DECLARATION
                | JS_FUNCTION_EXPRESSION
                | JS_ARROW_FUNCTION_EXPRESSION
                | JS_FUNCTION_EXPORT_DEFAULT_DECLARATION
                | JS_METHOD_CLASS_MEMBER
                | JS_METHOD_OBJECT_MEMBER
                | JS_CONSTRUCTOR_CLASS_MEMBER
                | JS_GETTER_CLASS_MEMBER
                | JS_GETTER_OBJECT_MEMBER
                | JS_SETTER_CLASS_MEMBER
                | JS_SETTER_OBJECT_MEMBER
                | JS_STATIC_INITIALIZATION_BLOCK_CLASS_MEMBER
                | TS_DECLARE_FUNCTION_DECLARATION
                | TS_DECLARE_FUNCTION_EXPORT_DEFAULT_DECLARATION
                | TS_FUNCTION_TYPE
                | TS_CONSTRUCTOR_TYPE
                | TS_CALL_SIGNATURE_TYPE_MEMBER
                | TS_CONSTRUCT_SIGNATURE_TYPE_MEMBER
                | TS_METHOD_SIGNATURE_TYPE_MEMBER
                | TS_SETTER_SIGNATURE_TYPE_MEMBER
                | TS_INDEX_SIGNATURE_TYPE_MEMBER
                | TS_METHOD_SIGNATURE_CLASS_MEMBER
                | TS_CONSTRUCTOR_SIGNATURE_CLASS_MEMBER
                | TS_SETTER_SIGNATURE_CLASS_MEMBER
                | TS_INDEX_SIGNATURE_CLASS_MEMBER
        )
}

/// Scopes that hold `let`, `const` and `class` declarations but not `var`
/// ones, which belong to the enclosing function or module.
fn is_block_scope_node(kind: JsSyntaxKind) -> bool {
    matches!(
        kind,
        JS_BLOCK_STATEMENT
            | JS_FOR_STATEMENT
            | JS_FOR_OF_STATEMENT
            | JS_FOR_IN_STATEMENT
            | JS_CATCH_CLAUSE
    )
}

/// Whether the binding is declared with `var`, e.g. `x` in
/// `var { x } = f()` or `for (var x of xs)`.
fn is_var_binding(node: &JsIdentifierBinding) -> bool {
    node.syntax()
        .ancestors()
        .skip(1)
        .take_while(|ancestor| !is_scope_node(ancestor.kind()))
        .find_map(|ancestor| {
            if let Some(declaration) = JsVariableDeclaration::cast(ancestor.clone()) {
                return Some(declaration.kind().ok()?.kind());
            }
            let declaration = JsForVariableDeclaration::cast(ancestor)?;
            Some(declaration.kind_token().ok()?.kind())
        })
        .is_some_and(|keyword| keyword == VAR_KW)
}

/// Builds a [SemanticModel] from the nodes of a preorder traversal.
///
/// [SemanticModelBuilder::enter] and [SemanticModelBuilder::leave] must be
/// called in the order the traversal emits them.
#[derive(Debug)]
pub struct SemanticModelBuilder {
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
    /// Scopes enclosing the current node, innermost last, with the kind of
    /// the node that opened them.
    stack: Vec<(ScopeId, JsSyntaxKind)>,
}

impl SemanticModelBuilder {
    pub fn new(root_range: TextRange, root_kind: JsSyntaxKind) -> Self {
        let global = Scope {
            range: root_range,
            parent: None,
            bindings_by_name: FxHashMap::default(),
        };
        Self {
            scopes: vec![global],
            bindings: vec![],
            stack: vec![(ScopeId(0), root_kind)],
        }
    }

    pub fn enter(&mut self, node: &JsSyntaxNode) {
        let kind = node.kind();

        if is_scope_node(kind) {
            self.push_scope(node.text_trimmed_range(), kind);
        }

        if kind == JS_IDENTIFIER_BINDING
            && let Some(binding) = JsIdentifierBinding::cast(node.clone())
        {
            self.push_binding(&binding);
        }
    }

    pub fn leave(&mut self, node: &JsSyntaxNode) {
        // The global scope is never popped.
        if is_scope_node(node.kind()) && self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn build(self) -> SemanticModel {
        SemanticModel { scopes: self.scopes, bindings: self.bindings }
    }

    fn current_scope(&self) -> ScopeId {
        self.stack.last().map_or(ScopeId(0), |(id, _)| *id)
    }

    /// Innermost scope that isn't a block, i.e. where `var` declarations go.
    fn var_scope(&self) -> ScopeId {
        self.stack
            .iter()
            .rev()
            .find(|(_, kind)| !is_block_scope_node(*kind))
            .map_or(ScopeId(0), |(id, _)| *id)
    }

    fn push_scope(&mut self, range: TextRange, kind: JsSyntaxKind) {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            range,
            parent: Some(self.current_scope()),
            bindings_by_name: FxHashMap::default(),
        });
        self.stack.push((id, kind));
    }

    fn push_binding(&mut self, node: &JsIdentifierBinding) {
        let Ok(token) = node.name_token() else {
            return;
        };
        let name = token.text_trimmed().to_string();

        let parent = node.syntax().parent();
        let parent_kind = parent.as_ref().map(|parent| parent.kind());

        // The name of a function declaration belongs to the enclosing scope,
        // not to the scope the function itself opens.
        let scope = match parent_kind {
            Some(
                JS_FUNCTION_DECLARATION
                | JS_FUNCTION_EXPORT_DEFAULT_DECLARATION
                | TS_DECLARE_FUNCTION_DECLARATION
                | TS_DECLARE_FUNCTION_EXPORT_DEFAULT_DECLARATION,
            ) if self.stack.len() > 1 => self.stack[self.stack.len() - 2].0,
            _ if is_var_binding(node) => self.var_scope(),
            _ => self.current_scope(),
        };

        let kind = parent.map_or(BindingKind::Declaration, |parent| {
            binding_kind(node, &parent).unwrap_or(BindingKind::Declaration)
        });

        let id = BindingId(self.bindings.len() as u32);
        self.bindings.push(Binding { scope, kind });
        self.scopes[scope.index()].bindings_by_name.insert(name, id);
    }
}

fn binding_kind(node: &JsIdentifierBinding, parent: &JsSyntaxNode) -> Option<BindingKind> {
    let own_name = || -> Option<String> {
        let token = node.name_token().ok()?;
        Some(token.text_trimmed().to_string())
    };

    let kind = match parent.kind() {
        JS_SHORTHAND_NAMED_IMPORT_SPECIFIER => import_binding(parent, own_name()?)?,
        JS_NAMED_IMPORT_SPECIFIER => {
            let specifier = JsNamedImportSpecifier::cast(parent.clone())?;
            import_binding(parent, export_name(&specifier.name().ok()?)?)?
        }
        JS_DEFAULT_IMPORT_SPECIFIER | JS_IMPORT_DEFAULT_CLAUSE => {
            import_binding(parent, "default".to_string())?
        }
        JS_NAMESPACE_IMPORT_SPECIFIER | JS_IMPORT_NAMESPACE_CLAUSE => {
            import_binding(parent, "*".to_string())?
        }
        JS_OBJECT_BINDING_PATTERN_SHORTHAND_PROPERTY => destructured_binding(parent, own_name()?)?,
        JS_OBJECT_BINDING_PATTERN_PROPERTY => {
            let property = JsObjectBindingPatternProperty::cast(parent.clone())?;
            let member = property.member().ok()?;
            let literal = member.as_js_literal_member_name()?;
            let key = unquote(literal.value().ok()?.text_trimmed()).to_string();
            destructured_binding(parent, key)?
        }
        _ => BindingKind::Declaration,
    };

    Some(kind)
}

fn export_name(name: &JsLiteralExportName) -> Option<String> {
    let token = name.value().ok()?;
    Some(unquote(token.text_trimmed()).to_string())
}

fn import_binding(specifier: &JsSyntaxNode, imported: String) -> Option<BindingKind> {
    let import = specifier.ancestors().find_map(JsImport::cast)?;
    let source = import_source(&import)?;
    Some(BindingKind::Import { source, imported })
}

/// Bindings of `const { key: local } = init`. Only patterns sitting directly
/// in a variable declarator count: parameters and nested patterns are plain
/// declarations.
fn destructured_binding(property: &JsSyntaxNode, key: String) -> Option<BindingKind> {
    // property -> property list -> object pattern -> declarator
    let pattern = property.parent()?.parent()?;
    if pattern.kind() != JS_OBJECT_BINDING_PATTERN {
        return None;
    }
    let declarator = JsVariableDeclarator::cast(pattern.parent()?)?;

    let from = declarator
        .initializer()
        .and_then(|initializer| initializer.expression().ok())
        .map_or(DestructuredFrom::Other, |expression| destructured_from(&expression));

    Some(BindingKind::Destructured { key, from })
}

fn destructured_from(expression: &AnyJsExpression) -> DestructuredFrom {
    let expression = match expression.omit_parentheses() {
        AnyJsExpression::JsAwaitExpression(await_expression) => {
            match await_expression.argument() {
                Ok(argument) => argument.omit_parentheses(),
                Err(_) => return DestructuredFrom::Other,
            }
        }
        expression => expression,
    };

    match expression {
        AnyJsExpression::JsCallExpression(_) => DestructuredFrom::Call,
        AnyJsExpression::JsIdentifierExpression(identifier) => match identifier_name(&identifier) {
            Some(name) => DestructuredFrom::Identifier {
                name: name.text().to_string(),
                range: identifier.syntax().text_trimmed_range(),
            },
            None => DestructuredFrom::Other,
        },
        _ => DestructuredFrom::Other,
    }
}
