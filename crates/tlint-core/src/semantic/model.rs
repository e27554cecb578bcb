use biome_js_syntax::JsIdentifierExpression;
use biome_rowan::{AstNode, TextRange, TextSize};
use rustc_hash::FxHashMap;

use crate::utils_ast::identifier_name;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(pub(crate) u32);

impl ScopeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingId(pub(crate) u32);

impl BindingId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A lexical scope: the file itself, a function, or a block.
#[derive(Debug)]
pub struct Scope {
    pub(crate) range: TextRange,
    pub(crate) parent: Option<ScopeId>,
    /// Bindings declared in this scope. A redeclaration replaces the earlier
    /// entry.
    pub(crate) bindings_by_name: FxHashMap<String, BindingId>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<BindingId> {
        self.bindings_by_name.get(name).copied()
    }
}

/// What the declaration of a binding looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingKind {
    /// `import { imported as local } from "source"`. Default imports have
    /// `imported == "default"` and namespace imports `imported == "*"`.
    Import { source: String, imported: String },
    /// `const { key: local } = <from>` or `const { key } = <from>`. The key is
    /// the property name as written in the pattern, never the local alias.
    Destructured { key: String, from: DestructuredFrom },
    /// Any other declaration: plain variables, parameters, functions...
    Declaration,
}

/// The initializer of a destructuring declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestructuredFrom {
    /// `const { x } = f(...)`, also when awaited.
    Call,
    /// `const { x } = name`. The range is the one of the identifier, so that
    /// it can be resolved from where it is used.
    Identifier { name: String, range: TextRange },
    /// Anything else, e.g. an object literal.
    Other,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub(crate) scope: ScopeId,
    pub(crate) kind: BindingKind,
}

impl Binding {
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn kind(&self) -> &BindingKind {
        &self.kind
    }
}

/// Per-file table of scopes and of the bindings declared in them. Built once
/// before any rule runs, see [crate::semantic::semantic_model].
#[derive(Debug)]
pub struct SemanticModel {
    pub(crate) scopes: Vec<Scope>,
    pub(crate) bindings: Vec<Binding>,
}

impl SemanticModel {
    pub fn global_scope(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.index()]
    }

    /// Innermost scope containing `offset`.
    ///
    /// Scopes are stored in document order and are either nested or
    /// disjoint, so the last one containing the offset is the innermost.
    pub fn scope_at(&self, offset: TextSize) -> ScopeId {
        self.scopes
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .find(|(_, scope)| scope.range.contains(offset))
            .map_or(self.global_scope(), |(index, _)| ScopeId(index as u32))
    }

    /// Resolves `name` as seen from `offset`, walking scopes outward.
    pub fn resolve(&self, name: &str, offset: TextSize) -> Option<&Binding> {
        let mut scope_id = Some(self.scope_at(offset));

        while let Some(id) = scope_id {
            let scope = self.scope(id);
            if let Some(binding) = scope.get(name) {
                return Some(self.binding(binding));
            }
            scope_id = scope.parent;
        }

        None
    }

    /// Resolves the declaration an identifier expression refers to.
    pub fn resolve_reference(&self, identifier: &JsIdentifierExpression) -> Option<&Binding> {
        let name = identifier_name(identifier)?;
        self.resolve(
            name.text(),
            identifier.syntax().text_trimmed_range().start(),
        )
    }
}
