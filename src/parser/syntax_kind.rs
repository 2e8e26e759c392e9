//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of the JavaScript subset that model declarations are written in.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (statements, expressions, object members).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,              // identifier
    NUMBER,             // 42, 3.14, 0xff
    STRING,             // "hello" or 'hello'
    TEMPLATE,           // `hello`
    REGEX,              // /ab+c/gi

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,            // {
    R_BRACE,            // }
    L_BRACKET,          // [
    R_BRACKET,          // ]
    L_PAREN,            // (
    R_PAREN,            // )
    SEMICOLON,          // ;
    COLON,              // :
    COMMA,              // ,
    DOT,                // .
    DOT_DOT_DOT,        // ...
    QUESTION_DOT,       // ?.
    QUESTION,           // ?
    QUESTION_QUESTION,  // ??
    EQ,                 // =
    EQ_EQ,              // ==
    EQ_EQ_EQ,           // ===
    BANG_EQ,            // !=
    BANG_EQ_EQ,         // !==
    LT,                 // <
    GT,                 // >
    LT_EQ,              // <=
    GT_EQ,              // >=
    FAT_ARROW,          // =>
    PLUS,               // +
    MINUS,              // -
    STAR,               // *
    STAR_STAR,          // **
    SLASH,              // /
    PERCENT,            // %
    PLUS_PLUS,          // ++
    MINUS_MINUS,        // --
    BANG,               // !
    TILDE,              // ~
    AMP,                // &
    AMP_AMP,            // &&
    PIPE,               // |
    PIPE_PIPE,          // ||
    CARET,              // ^
    SHL,                // <<
    SHR,                // >>
    ASSIGN_OP,          // += -= *= /= %= &&= ||= ??= ...

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    CONST_KW,
    LET_KW,
    VAR_KW,
    FUNCTION_KW,
    RETURN_KW,
    EXPORT_KW,
    DEFAULT_KW,
    IMPORT_KW,
    NEW_KW,
    THIS_KW,
    IF_KW,
    ELSE_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    TYPEOF_KW,
    VOID_KW,
    DELETE_KW,
    AWAIT_KW,
    YIELD_KW,
    CLASS_KW,
    INSTANCEOF_KW,
    IN_KW,
    FOR_KW,
    WHILE_KW,
    DO_KW,
    SWITCH_KW,
    CASE_KW,
    BREAK_KW,
    CONTINUE_KW,
    TRY_KW,
    CATCH_KW,
    FINALLY_KW,
    THROW_KW,

    // =========================================================================
    // NODES - Root and statements
    // =========================================================================
    SOURCE_FILE,
    VAR_DECL,
    DECLARATOR,
    FUNCTION_DECL,
    EXPORT_DECL,
    IMPORT_DECL,
    RETURN_STMT,
    IF_STMT,
    FOR_STMT,
    WHILE_STMT,
    DO_WHILE_STMT,
    SWITCH_STMT,
    SWITCH_CASE,
    BREAK_STMT,
    CONTINUE_STMT,
    THROW_STMT,
    TRY_STMT,
    CATCH_CLAUSE,
    LABELED_STMT,
    CLASS,
    BLOCK,
    EXPR_STMT,
    EMPTY_STMT,
    NAME,

    // =========================================================================
    // NODES - Expressions
    // =========================================================================
    NAME_REF,
    LITERAL,
    PAREN_EXPR,
    OBJECT_EXPR,
    ARRAY_EXPR,
    ARROW_FN,
    FUNCTION_EXPR,
    CALL_EXPR,
    MEMBER_EXPR,
    INDEX_EXPR,
    NEW_EXPR,
    BIN_EXPR,
    PREFIX_EXPR,
    COND_EXPR,
    ASSIGN_EXPR,

    // =========================================================================
    // NODES - Expression parts
    // =========================================================================
    ARG_LIST,
    PARAM_LIST,
    PROPERTY,
    METHOD,
    SPREAD,
    COMPUTED_KEY,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::CONST_KW as u16) && (self as u16) <= (Self::THROW_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::ASSIGN_OP as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NUMBER
                | Self::STRING
                | Self::TEMPLATE
                | Self::REGEX
                | Self::TRUE_KW
                | Self::FALSE_KW
                | Self::NULL_KW
        )
    }

    /// Keywords that may still be used as property names (`a.default`, `{ new: 1 }`)
    pub fn is_name_like(self) -> bool {
        self == Self::IDENT || self.is_keyword()
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsLanguage {}

impl rowan::Language for JsLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<JsLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<JsLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<JsLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<JsLanguage>;
