//! Type constructor interpreter.
//!
//! Turns a type-describing expression (`types.array(types.string)`, `Todo`,
//! `"default"`) into a [`TypeExpr`] tree. Only type shape is examined here;
//! model bodies are the body interpreter's business. Anything outside the
//! vocabulary degrades to an opaque leaf and a diagnostic, never an abort.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use text_size::TextRange;

use super::error::ResolveError;
use super::ids::ModelId;
use super::model::{TypeExpr, TypeKind};
use super::registry::{DeclKind, ModelRegistry};
use super::vocab::{self, Construct, Vocabulary};
use crate::base::constants::CUSTOM_NAME_KEY;
use crate::parser::{AstNode, CallExpr, Expr, FnBody, Literal, LiteralKind, Stmt};

/// Shared state of the interpretation passes.
pub(crate) struct LowerCtx<'a> {
    pub(crate) registry: &'a ModelRegistry,
    pub(crate) vocab: &'a Vocabulary,
    pub(crate) errors: Vec<ResolveError>,
    pub(crate) referenced: FxHashSet<ModelId>,
}

impl<'a> LowerCtx<'a> {
    pub(crate) fn new(registry: &'a ModelRegistry, vocab: &'a Vocabulary) -> Self {
        Self {
            registry,
            vocab,
            errors: Vec::new(),
            referenced: FxHashSet::default(),
        }
    }

    pub(crate) fn mark_referenced(&mut self, id: ModelId) {
        if self.referenced.insert(id) {
            tracing::trace!(%id, "model referenced");
        }
    }

    fn unknown(&mut self, name: impl Into<String>, range: TextRange) -> TypeExpr {
        let name = name.into();
        tracing::trace!(%name, "unknown construct, using opaque type");
        self.errors.push(ResolveError::unknown_construct(name, range));
        TypeExpr::opaque()
    }

    /// Interpret a type-describing expression.
    pub(crate) fn lower_type(&mut self, expr: &Expr) -> TypeExpr {
        if let Some(id) = self.registry.model_at(expr.syntax()) {
            return self.lower_model_ref(id);
        }
        match expr {
            Expr::Paren(paren) => match paren.expr() {
                Some(inner) => self.lower_type(&inner),
                None => TypeExpr::opaque(),
            },
            Expr::NameRef(name) => self.lower_name(&name.text(), expr.range()),
            Expr::Member(_) => self.lower_member(expr),
            Expr::Literal(literal) => literal_leaf(literal),
            Expr::Call(call) => self.lower_call(call),
            _ => self.unknown(describe(expr), expr.range()),
        }
    }

    fn lower_model_ref(&mut self, id: ModelId) -> TypeExpr {
        self.mark_referenced(id);
        let composed = self
            .registry
            .declaration(id)
            .is_some_and(|decl| decl.kind == DeclKind::Compose);
        if composed {
            TypeExpr::wrap(TypeKind::ComposedAsType, TypeExpr::model(id))
        } else {
            TypeExpr::model(id)
        }
    }

    /// A bare identifier: a bound model, a vocabulary leaf, or an unknown name.
    pub(crate) fn lower_name(&mut self, name: &str, range: TextRange) -> TypeExpr {
        if let Some(id) = self.registry.model_bound_to(name) {
            return self.lower_model_ref(id);
        }
        if let Some(kind) = vocab::leaf_kind(name) {
            return TypeExpr::leaf(kind);
        }
        self.errors.push(ResolveError::unresolved_reference(name, range));
        TypeExpr::named(name)
    }

    fn lower_member(&mut self, expr: &Expr) -> TypeExpr {
        let range = expr.range();
        match self.vocab.vocab_ref(expr) {
            Some(found) if found.qualified => {
                if let Some(kind) = vocab::leaf_kind(&found.name) {
                    return TypeExpr::leaf(kind);
                }
                // `types.frozen` is usable without a call
                if vocab::call_construct(&found.name) == Some(Construct::Wrapper(TypeKind::Frozen)) {
                    return TypeExpr::leaf(TypeKind::Frozen);
                }
                self.unknown(format!("{}.{}", self.vocab.namespace(), found.name), range)
            }
            _ => match expr.path() {
                Some(path) => {
                    if let Some(id) = self.registry.model_bound_to(&path) {
                        return self.lower_model_ref(id);
                    }
                    self.errors.push(ResolveError::unresolved_reference(path.as_str(), range));
                    TypeExpr::named(path)
                }
                None => self.unknown(describe(expr), range),
            },
        }
    }

    fn lower_call(&mut self, call: &CallExpr) -> TypeExpr {
        let range = call.range();
        let Some(callee) = call.callee() else {
            return TypeExpr::opaque();
        };
        let found = self.vocab.vocab_ref(&callee).filter(|found| {
            found.qualified || self.registry.model_bound_to(&found.name).is_none()
        });
        let Some(found) = found else {
            return self.unknown(describe(&callee), range);
        };
        match vocab::call_construct(&found.name) {
            Some(construct) => self.apply(construct, &found.name, call),
            None if found.qualified => {
                self.unknown(format!("{}.{}", self.vocab.namespace(), found.name), range)
            }
            None => self.unknown(found.name.as_str(), range),
        }
    }

    fn apply(&mut self, construct: Construct, name: &SmolStr, call: &CallExpr) -> TypeExpr {
        let args = call.args();
        match construct {
            // Registered declarations are caught before reaching here.
            Construct::Model | Construct::Compose => TypeExpr::opaque(),
            Construct::Wrapper(kind) => match args.first() {
                Some(arg) => TypeExpr::wrap(kind, self.lower_type(arg)),
                None if kind == TypeKind::Frozen => TypeExpr::leaf(kind),
                None => {
                    self.errors.push(ResolveError::structure(
                        format!("'{}' expects a type argument", name),
                        call.range(),
                    ));
                    TypeExpr::leaf(kind)
                }
            },
            Construct::Late => {
                let thunk = args.iter().find(|arg| arg.is_function());
                match thunk.and_then(returned_expr) {
                    Some(inner) => TypeExpr::wrap(TypeKind::Late, self.lower_type(&inner)),
                    None => TypeExpr::leaf(TypeKind::Late),
                }
            }
            Construct::Literal => {
                let inner = match args.first() {
                    Some(Expr::Literal(literal)) => literal_leaf(literal),
                    _ => TypeExpr::leaf(TypeKind::String),
                };
                TypeExpr::wrap(TypeKind::Literal, inner)
            }
            Construct::Enumeration => {
                TypeExpr::wrap(TypeKind::Enumeration, TypeExpr::leaf(TypeKind::String))
            }
            Construct::Refinement => {
                let named = args.len() > 2 && args.first().and_then(string_value).is_some();
                let base = if named { args.get(1) } else { args.first() };
                match base {
                    Some(base) => TypeExpr::wrap(TypeKind::Refinement, self.lower_type(base)),
                    None => TypeExpr::leaf(TypeKind::Refinement),
                }
            }
            Construct::Custom => {
                let display = match args.first().map(|arg| arg.clone().unparen()) {
                    Some(Expr::Object(config)) => config
                        .property(CUSTOM_NAME_KEY)
                        .and_then(|p| p.value())
                        .as_ref()
                        .and_then(string_value),
                    _ => None,
                };
                match display {
                    Some(display) => TypeExpr::wrap(TypeKind::Custom, TypeExpr::named(display)),
                    None => TypeExpr::leaf(TypeKind::Custom),
                }
            }
            Construct::Union => {
                tracing::trace!(cases = args.len(), "union members are not tracked");
                TypeExpr::leaf(TypeKind::Union)
            }
            Construct::SnapshotProcessor => match args.first() {
                Some(inner) => self.lower_type(inner),
                None => TypeExpr::opaque(),
            },
            Construct::Identifier(kind) => match args.first() {
                Some(inner) => self.lower_type(inner),
                None => TypeExpr::leaf(kind),
            },
        }
    }
}

/// Primitive leaf a literal value stands for.
fn literal_leaf(literal: &Literal) -> TypeExpr {
    let kind = match literal.kind() {
        Some(LiteralKind::String | LiteralKind::Template) => TypeKind::String,
        Some(LiteralKind::Number) => TypeKind::Number,
        Some(LiteralKind::Boolean) => TypeKind::Boolean,
        Some(LiteralKind::Null) => TypeKind::Null,
        Some(LiteralKind::Regex) | None => TypeKind::Opaque,
    };
    TypeExpr::leaf(kind)
}

/// Value of a string literal argument.
pub(crate) fn string_value(expr: &Expr) -> Option<SmolStr> {
    match expr {
        Expr::Literal(literal) => literal.string_value().map(SmolStr::new),
        Expr::Paren(paren) => string_value(&paren.expr()?),
        _ => None,
    }
}

/// What a function evaluates to: its expression body or first top-level return.
pub(crate) fn returned_expr(function: &Expr) -> Option<Expr> {
    let block = match function {
        Expr::Arrow(arrow) => match arrow.body()? {
            FnBody::Expr(expr) => return Some(expr),
            FnBody::Block(block) => block,
        },
        Expr::Function(function) => function.body()?,
        Expr::Paren(paren) => return returned_expr(&paren.expr()?),
        _ => return None,
    };
    block.statements().find_map(|stmt| match stmt {
        Stmt::Return(ret) => ret.expr(),
        _ => None,
    })
}

/// Short source excerpt used to name an unrecognised construct.
fn describe(expr: &Expr) -> String {
    let text = expr.syntax().text().to_string();
    let line = text.trim().lines().next().unwrap_or_default();
    if line.chars().count() > 40 {
        let short: String = line.chars().take(40).collect();
        format!("{}...", short)
    } else {
        line.to_string()
    }
}
