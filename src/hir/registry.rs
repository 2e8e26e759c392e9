//! Model registry: discovery pass over the whole source file.
//!
//! Every `model(...)`/`compose(...)` call is registered exactly once, in
//! source pre-order, before anything is interpreted. The tree is never
//! mutated: each registration records the *outermost* expression of its
//! logical declaration (the constructor call plus any chained calls and
//! enclosing parentheses), and later passes consult the registry by node to
//! avoid descending into a declaration through another one.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::TextRange;

use super::ids::{ModelId, Placeholder};
use super::vocab::{Construct, Vocabulary};
use crate::parser::{
    AssignExpr, AstNode, CallExpr, Declarator, Expr, Name, SourceFile, SyntaxKind, SyntaxNode,
    trimmed_range,
};

/// Which constructor opened the declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Model,
    Compose,
}

/// A chained call on the declaration spine (`.actions(...)`, `.views(...)`).
#[derive(Clone, Debug)]
pub struct ChainCall {
    pub method: SmolStr,
    pub call: CallExpr,
}

/// One registered logical declaration.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub id: ModelId,
    pub kind: DeclKind,
    /// The constructor call itself.
    pub call: CallExpr,
    /// Chained calls from innermost to outermost.
    pub chain: Vec<ChainCall>,
    /// Outermost expression standing for the whole declaration.
    pub outer: SyntaxNode,
    /// `X` in `const X = ...`, `X = ...` or `a.b.X = ...`.
    pub binding: Option<SmolStr>,
    /// Full reference path the declaration is reachable through (`a.b.X`).
    pub binding_path: Option<SmolStr>,
    pub placeholder: Placeholder,
}

impl Declaration {
    pub fn range(&self) -> TextRange {
        trimmed_range(&self.outer)
    }
}

/// Index of all model declarations in a file.
#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    declarations: Vec<Declaration>,
    by_node: FxHashMap<SyntaxNode, ModelId>,
    bindings: FxHashMap<SmolStr, ModelId>,
    next_id: u32,
}

impl ModelRegistry {
    /// Register every declaration in `file`.
    pub fn discover(file: &SourceFile, vocab: &Vocabulary, source: &str) -> Self {
        let mut registry = Self::default();
        for node in file.syntax().descendants() {
            let Some(call) = CallExpr::cast(node) else {
                continue;
            };
            let Some(callee) = call.callee() else {
                continue;
            };
            let kind = match vocab.declaration_construct(&callee) {
                Some(Construct::Model) => DeclKind::Model,
                Some(Construct::Compose) => DeclKind::Compose,
                _ => continue,
            };
            registry.register(call, kind, source);
        }
        tracing::debug!(models = registry.len(), "model registry built");
        registry
    }

    fn register(&mut self, call: CallExpr, kind: DeclKind, source: &str) {
        let id = ModelId::new(self.next_id);
        self.next_id += 1;

        let (outer, chain) = climb_spine(call.syntax());
        let binding_path = binding_of(&outer);
        let binding = binding_path
            .as_deref()
            .and_then(|path| path.rsplit('.').next())
            .map(SmolStr::new);
        let placeholder = Placeholder::mint(id, source);

        tracing::trace!(
            %id,
            ?kind,
            binding = binding.as_deref().unwrap_or(""),
            chain = chain.len(),
            "registered declaration"
        );

        self.by_node.insert(outer.clone(), id);
        self.by_node.insert(call.syntax().clone(), id);
        if let Some(path) = &binding_path {
            self.bindings.entry(path.clone()).or_insert(id);
        }
        self.declarations.push(Declaration {
            id,
            kind,
            call,
            chain,
            outer,
            binding,
            binding_path,
            placeholder,
        });
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn declaration(&self, id: ModelId) -> Option<&Declaration> {
        self.declarations.get(id.index())
    }

    /// The model whose declaration is exactly `node`.
    pub fn model_at(&self, node: &SyntaxNode) -> Option<ModelId> {
        self.by_node.get(node).copied()
    }

    /// The model bound to a variable or member path (`Todo`, `stores.Todo`).
    pub fn model_bound_to(&self, name: &str) -> Option<ModelId> {
        self.bindings.get(name).copied()
    }

    /// The model an expression denotes: a declaration in place, or a binding.
    pub fn resolve_expr(&self, expr: &Expr) -> Option<ModelId> {
        if let Some(id) = self.model_at(expr.syntax()) {
            return Some(id);
        }
        match expr {
            Expr::NameRef(name) => self.model_bound_to(&name.text()),
            Expr::Member(_) => self.model_bound_to(&expr.path()?),
            Expr::Paren(paren) => self.resolve_expr(&paren.expr()?),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Climb from a constructor call through parentheses, member objects and
/// callees. Returns the outermost node and the chained method calls passed.
fn climb_spine(call: &SyntaxNode) -> (SyntaxNode, Vec<ChainCall>) {
    let mut node = call.clone();
    let mut chain = Vec::new();
    while let Some(parent) = node.parent() {
        let is_first_child = parent.first_child().as_ref() == Some(&node);
        match parent.kind() {
            SyntaxKind::PAREN_EXPR => node = parent,
            SyntaxKind::MEMBER_EXPR if is_first_child => {
                let method = parent.children().find_map(Name::cast).map(|n| n.text());
                let call = parent
                    .parent()
                    .filter(|grand| grand.first_child().as_ref() == Some(&parent))
                    .and_then(CallExpr::cast);
                match (method, call) {
                    (Some(method), Some(call)) => {
                        node = call.syntax().clone();
                        chain.push(ChainCall { method, call });
                    }
                    _ => node = parent,
                }
            }
            SyntaxKind::CALL_EXPR if is_first_child => node = parent,
            _ => break,
        }
    }
    (node, chain)
}

/// Member names that export a value rather than naming it.
const EXPORT_SLOTS: &[&str] = &["exports", "default"];

/// Binding path of a declaration placed as an initializer or assigned value.
fn binding_of(outer: &SyntaxNode) -> Option<SmolStr> {
    let parent = outer.parent()?;
    if let Some(declarator) = Declarator::cast(parent.clone()) {
        let init = declarator.initializer()?;
        if init.syntax() != outer {
            return None;
        }
        return declarator.name().map(|n| n.text());
    }
    if let Some(assign) = AssignExpr::cast(parent) {
        if !assign.is_plain() || assign.rhs()?.syntax() != outer {
            return None;
        }
        return match assign.lhs()? {
            Expr::NameRef(name) => Some(name.text()),
            lhs @ Expr::Member(_) => {
                let path = lhs.path()?;
                let name = path.rsplit('.').next().unwrap_or_default();
                if EXPORT_SLOTS.contains(&name) {
                    return None;
                }
                Some(SmolStr::new(path))
            }
            _ => None,
        };
    }
    None
}
