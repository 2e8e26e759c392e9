//! Model body interpreter.
//!
//! Reads one registered declaration: its name, property map, composition
//! bases and the `.actions`/`.views`/`.props`/`.named` calls chained onto it.
//! Merging with bases happens later, in the composition pass.

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::TextRange;

use super::error::ResolveError;
use super::model::{Base, MethodKind, TypeExpr};
use super::registry::{DeclKind, Declaration};
use super::type_expr::{LowerCtx, returned_expr, string_value};
use crate::base::constants as names;
use crate::parser::{AstNode, CallExpr, Expr, ObjectMember};

/// What a declaration says about itself, before composition.
#[derive(Clone, Debug, Default)]
pub(crate) struct ModelBody {
    pub name: Option<SmolStr>,
    pub properties: IndexMap<SmolStr, TypeExpr>,
    pub actions: IndexMap<SmolStr, MethodKind>,
    pub views: IndexMap<SmolStr, MethodKind>,
    /// Composition bases in argument order, with their source range.
    pub bases: Vec<(Base, TextRange)>,
}

impl LowerCtx<'_> {
    pub(crate) fn lower_body(&mut self, decl: &Declaration) -> ModelBody {
        let mut body = ModelBody::default();
        let args = decl.call.args();
        let mut rest = args.as_slice();

        if let Some(name) = rest.first().and_then(string_value) {
            body.name = Some(name);
            rest = &rest[1..];
        }

        match decl.kind {
            DeclKind::Model => {
                if let Some(map) = rest.first() {
                    self.lower_properties(map, &mut body.properties);
                }
            }
            DeclKind::Compose => {
                for arg in rest {
                    if let Some(base) = self.lower_base(arg) {
                        body.bases.push((base, arg.range()));
                    }
                }
            }
        }

        for link in &decl.chain {
            match link.method.as_str() {
                names::ACTIONS => {
                    if let Some(actions) = self.lower_methods(&link.call) {
                        body.actions = actions;
                    }
                }
                names::VIEWS => {
                    if let Some(views) = self.lower_methods(&link.call) {
                        body.views = views;
                    }
                }
                names::PROPS => match link.call.args().first() {
                    Some(map) => self.lower_properties(map, &mut body.properties),
                    None => self.structure("'props' expects a property map", link.call.range()),
                },
                names::NAMED => match link.call.args().first().and_then(string_value) {
                    Some(name) => body.name = Some(name),
                    None => self.structure("'named' expects a string literal", link.call.range()),
                },
                other => tracing::trace!(method = other, id = %decl.id, "ignoring chained method"),
            }
        }

        body
    }

    fn structure(&mut self, message: impl Into<String>, range: TextRange) {
        self.errors.push(ResolveError::structure(message, range));
    }

    /// Entries of a property map, inserted (and overriding) in declaration order.
    fn lower_properties(&mut self, map: &Expr, properties: &mut IndexMap<SmolStr, TypeExpr>) {
        let Expr::Object(object) = map.clone().unparen() else {
            self.structure("property map must be an object literal", map.range());
            return;
        };
        for member in object.members() {
            match member {
                ObjectMember::Property(property) => {
                    let Some(key) = property.name() else {
                        self.structure("computed property keys are not supported", property.range());
                        continue;
                    };
                    let ty = match property.value() {
                        Some(value) => self.lower_type(&value),
                        None => self.lower_name(&key, property.range()),
                    };
                    properties.insert(key, ty);
                }
                ObjectMember::Method(method) => {
                    self.structure("methods are not allowed in a property map", method.range())
                }
                ObjectMember::Spread(spread) => {
                    self.structure("spread entries in a property map are not supported", spread.range())
                }
            }
        }
    }

    fn lower_base(&mut self, arg: &Expr) -> Option<Base> {
        if let Some(id) = self.registry.resolve_expr(arg) {
            self.mark_referenced(id);
            return Some(Base::Model(id));
        }
        match arg.path() {
            Some(path) => {
                self.errors.push(ResolveError::unresolved_reference(path.as_str(), arg.range()));
                Some(Base::Symbol(SmolStr::new(path)))
            }
            None => {
                self.structure("composition base must be a model or a model name", arg.range());
                None
            }
        }
    }

    /// Entries of the record returned by an `.actions`/`.views` builder.
    /// `None` when the attachment is malformed and must not replace earlier ones.
    fn lower_methods(&mut self, call: &CallExpr) -> Option<IndexMap<SmolStr, MethodKind>> {
        let Some(builder) = call.args().into_iter().next() else {
            self.structure("expected a builder function", call.range());
            return None;
        };
        let Some(Expr::Object(object)) = returned_expr(&builder).map(Expr::unparen) else {
            self.structure("builder must return an object literal", builder.range());
            return None;
        };

        let mut methods = IndexMap::new();
        for member in object.members() {
            match member {
                ObjectMember::Method(method) => {
                    let Some(name) = method.name() else {
                        self.structure("computed method names are not supported", method.range());
                        continue;
                    };
                    let kind = if method.is_getter() {
                        MethodKind::AccessorGet
                    } else if method.is_setter() {
                        // a setter paired with an earlier getter stays a getter
                        if methods.get(&name) == Some(&MethodKind::AccessorGet) {
                            continue;
                        }
                        MethodKind::AccessorSet
                    } else {
                        MethodKind::PlainMethod
                    };
                    methods.insert(name, kind);
                }
                ObjectMember::Property(property) => {
                    let Some(name) = property.name() else {
                        self.structure("computed method names are not supported", property.range());
                        continue;
                    };
                    let kind = match property.value().map(Expr::unparen) {
                        None => Some(MethodKind::PlainMethod),
                        Some(Expr::Call(value)) => value
                            .callee()
                            .filter(|callee| self.vocab.is_async_helper(callee))
                            .map(|_| MethodKind::AsyncMethod),
                        Some(Expr::Arrow(_) | Expr::Function(_) | Expr::NameRef(_) | Expr::Member(_)) => {
                            Some(MethodKind::PlainMethod)
                        }
                        Some(_) => None,
                    };
                    match kind {
                        Some(kind) => {
                            methods.insert(name, kind);
                        }
                        None => self.structure(
                            format!("entry '{}' is not a function", name),
                            property.range(),
                        ),
                    }
                }
                ObjectMember::Spread(spread) => {
                    self.structure("spread entries in a method group are not supported", spread.range())
                }
            }
        }
        Some(methods)
    }
}
