//! Per-file table of lexical scopes and the bindings declared in them.
//!
//! Only what identifier resolution needs is recorded: where each scope
//! starts and ends, and for each declared name whether it comes from an
//! import or from an object destructuring pattern.

pub mod builder;
pub mod model;

use biome_js_syntax::JsSyntaxNode;
use biome_rowan::WalkEvent;

pub use builder::SemanticModelBuilder;
pub use model::{Binding, BindingKind, DestructuredFrom, ScopeId, SemanticModel};

/// Builds the binding table of a whole file in one preorder traversal.
pub fn semantic_model(root: &JsSyntaxNode) -> SemanticModel {
    let mut builder = SemanticModelBuilder::new(root.text_trimmed_range(), root.kind());

    for event in root.preorder() {
        match event {
            WalkEvent::Enter(node) => builder.enter(&node),
            WalkEvent::Leave(node) => builder.leave(&node),
        }
    }

    builder.build()
}
