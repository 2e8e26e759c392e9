//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for the syntax nodes the
//! model engine reads. Each struct wraps a SyntaxNode and provides methods
//! to access children. Expressions are exposed as the closed [`Expr`]
//! enumeration so consumers match exhaustively over expression kinds.

use smol_str::SmolStr;
use text_size::TextRange;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Source range without leading/trailing trivia
    fn range(&self) -> TextRange {
        trimmed_range(self.syntax())
    }
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Helpers
// ============================================================================

/// Direct child tokens of a node, trivia excluded
fn significant_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + use<> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
}

fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    significant_tokens(node).any(|t| t.kind() == kind)
}

fn has_contextual(node: &SyntaxNode, text: &str) -> bool {
    significant_tokens(node).any(|t| t.kind() == SyntaxKind::IDENT && t.text() == text)
}

fn first_text(node: &SyntaxNode) -> Option<SmolStr> {
    significant_tokens(node).next().map(|t| SmolStr::new(t.text()))
}

/// The range a node covers once surrounding trivia is stripped
pub fn trimmed_range(node: &SyntaxNode) -> TextRange {
    let mut tokens = node
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia());
    match tokens.next() {
        Some(first) => {
            let end = tokens.last().unwrap_or_else(|| first.clone());
            TextRange::new(first.text_range().start(), end.text_range().end())
        }
        None => TextRange::empty(node.text_range().start()),
    }
}

/// Strip the quotes of a string/template token and resolve simple escapes
fn unquote(text: &str) -> String {
    let inner = if text.len() >= 2 { &text[1..text.len() - 1] } else { "" };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + use<> {
        self.0.children().filter_map(Stmt::cast)
    }
}

// ============================================================================
// Statements
// ============================================================================

/// Any statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    VarDecl(VarDecl),
    FunctionDecl(FunctionDecl),
    Export(ExportDecl),
    Import(ImportDecl),
    Return(ReturnStmt),
    If(IfStmt),
    Block(Block),
    Expr(ExprStmt),
    Empty(EmptyStmt),
}

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::VAR_DECL
                | SyntaxKind::FUNCTION_DECL
                | SyntaxKind::EXPORT_DECL
                | SyntaxKind::IMPORT_DECL
                | SyntaxKind::RETURN_STMT
                | SyntaxKind::IF_STMT
                | SyntaxKind::BLOCK
                | SyntaxKind::EXPR_STMT
                | SyntaxKind::EMPTY_STMT
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::VAR_DECL => Some(Self::VarDecl(VarDecl(node))),
            SyntaxKind::FUNCTION_DECL => Some(Self::FunctionDecl(FunctionDecl(node))),
            SyntaxKind::EXPORT_DECL => Some(Self::Export(ExportDecl(node))),
            SyntaxKind::IMPORT_DECL => Some(Self::Import(ImportDecl(node))),
            SyntaxKind::RETURN_STMT => Some(Self::Return(ReturnStmt(node))),
            SyntaxKind::IF_STMT => Some(Self::If(IfStmt(node))),
            SyntaxKind::BLOCK => Some(Self::Block(Block(node))),
            SyntaxKind::EXPR_STMT => Some(Self::Expr(ExprStmt(node))),
            SyntaxKind::EMPTY_STMT => Some(Self::Empty(EmptyStmt(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::VarDecl(n) => n.syntax(),
            Self::FunctionDecl(n) => n.syntax(),
            Self::Export(n) => n.syntax(),
            Self::Import(n) => n.syntax(),
            Self::Return(n) => n.syntax(),
            Self::If(n) => n.syntax(),
            Self::Block(n) => n.syntax(),
            Self::Expr(n) => n.syntax(),
            Self::Empty(n) => n.syntax(),
        }
    }
}

ast_node!(VarDecl, VAR_DECL);

impl VarDecl {
    pub fn declarators(&self) -> impl Iterator<Item = Declarator> + use<> {
        self.0.children().filter_map(Declarator::cast)
    }
}

ast_node!(Declarator, DECLARATOR);

impl Declarator {
    /// The bound name, `None` for destructuring patterns
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    /// The expression after `=`
    pub fn initializer(&self) -> Option<Expr> {
        self.0
            .children_with_tokens()
            .skip_while(|e| e.kind() != SyntaxKind::EQ)
            .filter_map(|e| e.into_node())
            .find_map(Expr::cast)
    }
}

ast_node!(Name, NAME);

impl Name {
    pub fn text(&self) -> SmolStr {
        first_text(&self.0).unwrap_or_default()
    }
}

ast_node!(FunctionDecl, FUNCTION_DECL);

impl FunctionDecl {
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

ast_node!(ExportDecl, EXPORT_DECL);

impl ExportDecl {
    pub fn is_default(&self) -> bool {
        has_token(&self.0, SyntaxKind::DEFAULT_KW)
    }

    /// The exported expression of `export default <expr>`
    pub fn default_expr(&self) -> Option<Expr> {
        if !self.is_default() {
            return None;
        }
        self.0.children().find_map(Expr::cast)
    }

    pub fn var_decl(&self) -> Option<VarDecl> {
        self.0.children().find_map(VarDecl::cast)
    }
}

ast_node!(ImportDecl, IMPORT_DECL);

impl ImportDecl {
    /// The module specifier string, unquoted
    pub fn source(&self) -> Option<String> {
        significant_tokens(&self.0)
            .find(|t| t.kind() == SyntaxKind::STRING)
            .map(|t| unquote(t.text()))
    }
}

ast_node!(ReturnStmt, RETURN_STMT);

impl ReturnStmt {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(IfStmt, IF_STMT);

ast_node!(Block, BLOCK);

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + use<> {
        self.0.children().filter_map(Stmt::cast)
    }
}

ast_node!(ExprStmt, EXPR_STMT);

impl ExprStmt {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(EmptyStmt, EMPTY_STMT);

// ============================================================================
// Expressions
// ============================================================================

/// Any expression, one variant per expression kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    NameRef(NameRef),
    Literal(Literal),
    Paren(ParenExpr),
    Object(ObjectExpr),
    Array(ArrayExpr),
    Arrow(ArrowFn),
    Function(FunctionExpr),
    Call(CallExpr),
    Member(MemberExpr),
    Index(IndexExpr),
    New(NewExpr),
    Binary(BinExpr),
    Prefix(PrefixExpr),
    Conditional(CondExpr),
    Assign(AssignExpr),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::NAME_REF
                | SyntaxKind::LITERAL
                | SyntaxKind::PAREN_EXPR
                | SyntaxKind::OBJECT_EXPR
                | SyntaxKind::ARRAY_EXPR
                | SyntaxKind::ARROW_FN
                | SyntaxKind::FUNCTION_EXPR
                | SyntaxKind::CALL_EXPR
                | SyntaxKind::MEMBER_EXPR
                | SyntaxKind::INDEX_EXPR
                | SyntaxKind::NEW_EXPR
                | SyntaxKind::BIN_EXPR
                | SyntaxKind::PREFIX_EXPR
                | SyntaxKind::COND_EXPR
                | SyntaxKind::ASSIGN_EXPR
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::NAME_REF => Some(Self::NameRef(NameRef(node))),
            SyntaxKind::LITERAL => Some(Self::Literal(Literal(node))),
            SyntaxKind::PAREN_EXPR => Some(Self::Paren(ParenExpr(node))),
            SyntaxKind::OBJECT_EXPR => Some(Self::Object(ObjectExpr(node))),
            SyntaxKind::ARRAY_EXPR => Some(Self::Array(ArrayExpr(node))),
            SyntaxKind::ARROW_FN => Some(Self::Arrow(ArrowFn(node))),
            SyntaxKind::FUNCTION_EXPR => Some(Self::Function(FunctionExpr(node))),
            SyntaxKind::CALL_EXPR => Some(Self::Call(CallExpr(node))),
            SyntaxKind::MEMBER_EXPR => Some(Self::Member(MemberExpr(node))),
            SyntaxKind::INDEX_EXPR => Some(Self::Index(IndexExpr(node))),
            SyntaxKind::NEW_EXPR => Some(Self::New(NewExpr(node))),
            SyntaxKind::BIN_EXPR => Some(Self::Binary(BinExpr(node))),
            SyntaxKind::PREFIX_EXPR => Some(Self::Prefix(PrefixExpr(node))),
            SyntaxKind::COND_EXPR => Some(Self::Conditional(CondExpr(node))),
            SyntaxKind::ASSIGN_EXPR => Some(Self::Assign(AssignExpr(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::NameRef(n) => n.syntax(),
            Self::Literal(n) => n.syntax(),
            Self::Paren(n) => n.syntax(),
            Self::Object(n) => n.syntax(),
            Self::Array(n) => n.syntax(),
            Self::Arrow(n) => n.syntax(),
            Self::Function(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
            Self::Member(n) => n.syntax(),
            Self::Index(n) => n.syntax(),
            Self::New(n) => n.syntax(),
            Self::Binary(n) => n.syntax(),
            Self::Prefix(n) => n.syntax(),
            Self::Conditional(n) => n.syntax(),
            Self::Assign(n) => n.syntax(),
        }
    }
}

impl Expr {
    /// Strip any number of enclosing parentheses
    pub fn unparen(self) -> Expr {
        let mut expr = self;
        while let Expr::Paren(paren) = &expr {
            match paren.expr() {
                Some(inner) => expr = inner,
                None => break,
            }
        }
        expr
    }

    /// Dotted path of a plain name or member chain (`a`, `a.b.c`)
    pub fn path(&self) -> Option<String> {
        match self {
            Expr::NameRef(name) => Some(name.text().to_string()),
            Expr::Member(member) => {
                let object = member.object()?.path()?;
                let name = member.name()?.text();
                Some(format!("{}.{}", object, name))
            }
            Expr::Paren(paren) => paren.expr()?.path(),
            _ => None,
        }
    }

    /// Whether the expression evaluates to a function
    pub fn is_function(&self) -> bool {
        matches!(self, Expr::Arrow(_) | Expr::Function(_))
    }
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    pub fn text(&self) -> SmolStr {
        first_text(&self.0).unwrap_or_default()
    }
}

/// The flavour of a literal token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    String,
    Template,
    Number,
    Boolean,
    Null,
    Regex,
}

ast_node!(Literal, LITERAL);

impl Literal {
    fn token(&self) -> Option<SyntaxToken> {
        significant_tokens(&self.0).next()
    }

    pub fn kind(&self) -> Option<LiteralKind> {
        let kind = match self.token()?.kind() {
            SyntaxKind::STRING => LiteralKind::String,
            SyntaxKind::TEMPLATE => LiteralKind::Template,
            SyntaxKind::NUMBER => LiteralKind::Number,
            SyntaxKind::TRUE_KW | SyntaxKind::FALSE_KW => LiteralKind::Boolean,
            SyntaxKind::NULL_KW => LiteralKind::Null,
            SyntaxKind::REGEX => LiteralKind::Regex,
            _ => return None,
        };
        Some(kind)
    }

    /// Value of a string or template literal with quotes removed
    pub fn string_value(&self) -> Option<String> {
        let token = self.token()?;
        match token.kind() {
            SyntaxKind::STRING | SyntaxKind::TEMPLATE => Some(unquote(token.text())),
            _ => None,
        }
    }

    /// Raw source text of the literal
    pub fn text(&self) -> SmolStr {
        first_text(&self.0).unwrap_or_default()
    }
}

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    /// The first (usually only) parenthesised expression
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(ObjectExpr, OBJECT_EXPR);

impl ObjectExpr {
    pub fn members(&self) -> impl Iterator<Item = ObjectMember> + use<> {
        self.0.children().filter_map(ObjectMember::cast)
    }

    /// Look up a plain property value by key
    pub fn property(&self, key: &str) -> Option<Property> {
        self.members().find_map(|member| match member {
            ObjectMember::Property(p) if p.name().as_deref() == Some(key) => Some(p),
            _ => None,
        })
    }
}

/// A member of an object literal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectMember {
    Property(Property),
    Method(Method),
    Spread(Spread),
}

impl AstNode for ObjectMember {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::PROPERTY | SyntaxKind::METHOD | SyntaxKind::SPREAD)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PROPERTY => Some(Self::Property(Property(node))),
            SyntaxKind::METHOD => Some(Self::Method(Method(node))),
            SyntaxKind::SPREAD => Some(Self::Spread(Spread(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Property(n) => n.syntax(),
            Self::Method(n) => n.syntax(),
            Self::Spread(n) => n.syntax(),
        }
    }
}

/// Static key text of a `NAME` or string/number `LITERAL` key node
fn key_text(key: &SyntaxNode) -> Option<SmolStr> {
    match key.kind() {
        SyntaxKind::NAME => Name::cast(key.clone()).map(|n| n.text()),
        SyntaxKind::LITERAL => {
            let literal = Literal::cast(key.clone())?;
            Some(match literal.string_value() {
                Some(value) => SmolStr::new(value),
                None => literal.text(),
            })
        }
        _ => None,
    }
}

ast_node!(Property, PROPERTY);

impl Property {
    fn key_node(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }

    /// Key text; `None` for computed keys
    pub fn name(&self) -> Option<SmolStr> {
        key_text(&self.key_node()?)
    }

    pub fn is_computed(&self) -> bool {
        self.key_node().map(|k| k.kind()) == Some(SyntaxKind::COMPUTED_KEY)
    }

    /// `{ a }` with no value
    pub fn is_shorthand(&self) -> bool {
        !has_token(&self.0, SyntaxKind::COLON) && !has_token(&self.0, SyntaxKind::EQ)
    }

    /// The value after `:`; `None` for shorthand properties
    pub fn value(&self) -> Option<Expr> {
        if self.is_shorthand() {
            return None;
        }
        self.0.children().skip(1).find_map(Expr::cast)
    }
}

ast_node!(Method, METHOD);

impl Method {
    pub fn name(&self) -> Option<SmolStr> {
        let key = self
            .0
            .children()
            .find(|n| matches!(n.kind(), SyntaxKind::NAME | SyntaxKind::LITERAL | SyntaxKind::COMPUTED_KEY))?;
        key_text(&key)
    }

    pub fn is_getter(&self) -> bool {
        has_contextual(&self.0, "get")
    }

    pub fn is_setter(&self) -> bool {
        has_contextual(&self.0, "set")
    }

    pub fn is_async(&self) -> bool {
        has_contextual(&self.0, "async")
    }

    pub fn is_generator(&self) -> bool {
        has_token(&self.0, SyntaxKind::STAR)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

ast_node!(Spread, SPREAD);

impl Spread {
    pub fn expr(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

ast_node!(ArrayExpr, ARRAY_EXPR);

impl ArrayExpr {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + use<> {
        self.0.children().filter_map(Expr::cast)
    }
}

/// Body of an arrow function
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FnBody {
    Block(Block),
    Expr(Expr),
}

ast_node!(ArrowFn, ARROW_FN);

impl ArrowFn {
    pub fn is_async(&self) -> bool {
        has_contextual(&self.0, "async")
    }

    pub fn params(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }

    pub fn body(&self) -> Option<FnBody> {
        self.0
            .children()
            .filter(|n| n.kind() != SyntaxKind::PARAM_LIST)
            .find_map(|n| match Block::cast(n.clone()) {
                Some(block) => Some(FnBody::Block(block)),
                None => Expr::cast(n).map(FnBody::Expr),
            })
    }
}

ast_node!(FunctionExpr, FUNCTION_EXPR);

impl FunctionExpr {
    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }

    pub fn is_async(&self) -> bool {
        has_contextual(&self.0, "async")
    }

    pub fn is_generator(&self) -> bool {
        has_token(&self.0, SyntaxKind::STAR)
    }

    pub fn params(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }

    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn len(&self) -> usize {
        self.0
            .children()
            .filter(|n| Expr::can_cast(n.kind()) || matches!(n.kind(), SyntaxKind::NAME | SyntaxKind::SPREAD))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

ast_node!(CallExpr, CALL_EXPR);

impl CallExpr {
    pub fn callee(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }

    /// Positional arguments (spread arguments are skipped)
    pub fn args(&self) -> Vec<Expr> {
        self.arg_list()
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }

    /// Name of the method when the callee is a member access (`x.actions(...)`)
    pub fn method_name(&self) -> Option<SmolStr> {
        match self.callee()? {
            Expr::Member(member) => member.name().map(|n| n.text()),
            _ => None,
        }
    }
}

ast_node!(ArgList, ARG_LIST);

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Expr> + use<> {
        self.0.children().filter_map(Expr::cast)
    }
}

ast_node!(MemberExpr, MEMBER_EXPR);

impl MemberExpr {
    pub fn object(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn name(&self) -> Option<Name> {
        self.0.children().find_map(Name::cast)
    }
}

ast_node!(IndexExpr, INDEX_EXPR);
ast_node!(NewExpr, NEW_EXPR);
ast_node!(BinExpr, BIN_EXPR);
ast_node!(PrefixExpr, PREFIX_EXPR);
ast_node!(CondExpr, COND_EXPR);

ast_node!(AssignExpr, ASSIGN_EXPR);

impl AssignExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.0.children().filter_map(Expr::cast).nth(1)
    }

    /// Plain `=` rather than a compound operator
    pub fn is_plain(&self) -> bool {
        has_token(&self.0, SyntaxKind::EQ)
    }
}
