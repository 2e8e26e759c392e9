//! Logos-based lexer for model declaration sources
//!
//! Fast, lossless tokenization of the JavaScript subset using the logos crate.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
///
/// A `/` is a regex literal when it starts an operand and a division
/// otherwise, so the lexer tracks whether the last significant token
/// closed an operand.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
    regex_allowed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
            regex_allowed: true,
        }
    }

    /// Extend a `/` or `/=` token to the regex literal starting there.
    fn try_regex(&mut self) -> bool {
        let start = self.inner.span().start + 1;
        let Some(body) = self.inner.source().get(start..) else {
            return false;
        };
        let Some(len) = regex_len(body) else {
            return false;
        };
        let consumed = self.inner.slice().len() - 1;
        if len < consumed {
            return false;
        }
        self.inner.bump(len - consumed);
        true
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;

        let mut kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };
        let maybe_regex = kind == SyntaxKind::SLASH
            || (kind == SyntaxKind::ASSIGN_OP && self.inner.slice() == "/=");
        if maybe_regex && self.regex_allowed && self.try_regex() {
            kind = SyntaxKind::REGEX;
        }
        if !kind.is_trivia() {
            self.regex_allowed = !ends_operand(kind);
        }

        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        Some(Token { kind, text, offset })
    }
}

/// Tokens after which a `/` divides
fn ends_operand(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IDENT
            | SyntaxKind::NUMBER
            | SyntaxKind::STRING
            | SyntaxKind::TEMPLATE
            | SyntaxKind::REGEX
            | SyntaxKind::R_PAREN
            | SyntaxKind::R_BRACKET
            | SyntaxKind::R_BRACE
            | SyntaxKind::THIS_KW
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::NULL_KW
            | SyntaxKind::PLUS_PLUS
            | SyntaxKind::MINUS_MINUS
    )
}

/// Length of a regex literal body plus closing `/` and flags, measured from
/// just after the opening `/`. `None` if the line ends first.
fn regex_len(body: &str) -> Option<usize> {
    let mut in_class = false;
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, '\n' | '\r')) | None => return None,
                Some(_) => {}
            },
            '\n' | '\r' => return None,
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => {
                let end = i + 1;
                let flags = body[end..]
                    .find(|f: char| !f.is_ascii_alphabetic())
                    .unwrap_or(body.len() - end);
                return Some(end + flags);
            }
            _ => {}
        }
    }
    None
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[\p{XID_Start}_$][\p{XID_Continue}$]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?n?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F_]+n?")]
    #[regex(r"0[bB][01_]+n?")]
    #[regex(r"0[oO][0-7_]+n?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    #[regex(r"`([^`\\]|\\.)*`")]
    Template,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("...")]
    DotDotDot,

    #[token("?.")]
    QuestionDot,

    #[token("??")]
    QuestionQuestion,

    #[token("===")]
    EqEqEq,

    #[token("!==")]
    BangEqEq,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("=>")]
    FatArrow,

    #[token("**")]
    StarStar,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("<<")]
    Shl,

    #[token(">>")]
    #[token(">>>")]
    Shr,

    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("**=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token(">>>=")]
    #[token("&&=")]
    #[token("||=")]
    #[token("??=")]
    AssignOp,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("?")]
    Question,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,

    // =========================================================================
    // KEYWORDS (longest match wins in logos)
    // =========================================================================
    #[token("await")]
    AwaitKw,
    #[token("class")]
    ClassKw,
    #[token("const")]
    ConstKw,
    #[token("default")]
    DefaultKw,
    #[token("delete")]
    DeleteKw,
    #[token("else")]
    ElseKw,
    #[token("export")]
    ExportKw,
    #[token("false")]
    FalseKw,
    #[token("function")]
    FunctionKw,
    #[token("if")]
    IfKw,
    #[token("import")]
    ImportKw,
    #[token("in")]
    InKw,
    #[token("instanceof")]
    InstanceofKw,
    #[token("let")]
    LetKw,
    #[token("new")]
    NewKw,
    #[token("null")]
    NullKw,
    #[token("return")]
    ReturnKw,
    #[token("this")]
    ThisKw,
    #[token("true")]
    TrueKw,
    #[token("typeof")]
    TypeofKw,
    #[token("var")]
    VarKw,
    #[token("void")]
    VoidKw,
    #[token("yield")]
    YieldKw,
    #[token("for")]
    ForKw,
    #[token("while")]
    WhileKw,
    #[token("do")]
    DoKw,
    #[token("switch")]
    SwitchKw,
    #[token("case")]
    CaseKw,
    #[token("break")]
    BreakKw,
    #[token("continue")]
    ContinueKw,
    #[token("try")]
    TryKw,
    #[token("catch")]
    CatchKw,
    #[token("finally")]
    FinallyKw,
    #[token("throw")]
    ThrowKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            LineComment => SyntaxKind::LINE_COMMENT,
            BlockComment => SyntaxKind::BLOCK_COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            Number => SyntaxKind::NUMBER,
            String => SyntaxKind::STRING,
            Template => SyntaxKind::TEMPLATE,

            // Multi-char punctuation
            DotDotDot => SyntaxKind::DOT_DOT_DOT,
            QuestionDot => SyntaxKind::QUESTION_DOT,
            QuestionQuestion => SyntaxKind::QUESTION_QUESTION,
            EqEqEq => SyntaxKind::EQ_EQ_EQ,
            BangEqEq => SyntaxKind::BANG_EQ_EQ,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            FatArrow => SyntaxKind::FAT_ARROW,
            StarStar => SyntaxKind::STAR_STAR,
            PlusPlus => SyntaxKind::PLUS_PLUS,
            MinusMinus => SyntaxKind::MINUS_MINUS,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,
            Shl => SyntaxKind::SHL,
            Shr => SyntaxKind::SHR,
            AssignOp => SyntaxKind::ASSIGN_OP,

            // Single-char punctuation
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            Semicolon => SyntaxKind::SEMICOLON,
            Colon => SyntaxKind::COLON,
            Dot => SyntaxKind::DOT,
            Comma => SyntaxKind::COMMA,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Question => SyntaxKind::QUESTION,
            Star => SyntaxKind::STAR,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Bang => SyntaxKind::BANG,
            Tilde => SyntaxKind::TILDE,
            Amp => SyntaxKind::AMP,
            Pipe => SyntaxKind::PIPE,
            Caret => SyntaxKind::CARET,

            // Keywords
            AwaitKw => SyntaxKind::AWAIT_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            ConstKw => SyntaxKind::CONST_KW,
            DefaultKw => SyntaxKind::DEFAULT_KW,
            DeleteKw => SyntaxKind::DELETE_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            ExportKw => SyntaxKind::EXPORT_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            FunctionKw => SyntaxKind::FUNCTION_KW,
            IfKw => SyntaxKind::IF_KW,
            ImportKw => SyntaxKind::IMPORT_KW,
            InKw => SyntaxKind::IN_KW,
            InstanceofKw => SyntaxKind::INSTANCEOF_KW,
            LetKw => SyntaxKind::LET_KW,
            NewKw => SyntaxKind::NEW_KW,
            NullKw => SyntaxKind::NULL_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            ThisKw => SyntaxKind::THIS_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            TypeofKw => SyntaxKind::TYPEOF_KW,
            VarKw => SyntaxKind::VAR_KW,
            VoidKw => SyntaxKind::VOID_KW,
            YieldKw => SyntaxKind::YIELD_KW,
            ForKw => SyntaxKind::FOR_KW,
            WhileKw => SyntaxKind::WHILE_KW,
            DoKw => SyntaxKind::DO_KW,
            SwitchKw => SyntaxKind::SWITCH_KW,
            CaseKw => SyntaxKind::CASE_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            ContinueKw => SyntaxKind::CONTINUE_KW,
            TryKw => SyntaxKind::TRY_KW,
            CatchKw => SyntaxKind::CATCH_KW,
            FinallyKw => SyntaxKind::FINALLY_KW,
            ThrowKw => SyntaxKind::THROW_KW,
        }
    }
}
