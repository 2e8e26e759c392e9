//! Recursive descent parser for model declaration sources
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}",
            self.message,
            u32::from(self.range.start()),
            u32::from(self.range.end())
        )
    }
}

/// Parse source text into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    parser.parse_source_file();
    parser.finish()
}

/// Binding power of a binary operator, `None` when the token is not one
fn infix_precedence(kind: SyntaxKind) -> Option<u8> {
    let prec = match kind {
        SyntaxKind::QUESTION_QUESTION => 1,
        SyntaxKind::PIPE_PIPE => 2,
        SyntaxKind::AMP_AMP => 3,
        SyntaxKind::PIPE => 4,
        SyntaxKind::CARET => 5,
        SyntaxKind::AMP => 6,
        SyntaxKind::EQ_EQ | SyntaxKind::BANG_EQ | SyntaxKind::EQ_EQ_EQ | SyntaxKind::BANG_EQ_EQ => 7,
        SyntaxKind::LT
        | SyntaxKind::GT
        | SyntaxKind::LT_EQ
        | SyntaxKind::GT_EQ
        | SyntaxKind::INSTANCEOF_KW
        | SyntaxKind::IN_KW => 8,
        SyntaxKind::SHL | SyntaxKind::SHR => 9,
        SyntaxKind::PLUS | SyntaxKind::MINUS => 10,
        SyntaxKind::STAR | SyntaxKind::SLASH | SyntaxKind::PERCENT => 11,
        SyntaxKind::STAR_STAR => 12,
        _ => return None,
    };
    Some(prec)
}

const PREFIX_OPS: &[SyntaxKind] = &[
    SyntaxKind::BANG,
    SyntaxKind::TILDE,
    SyntaxKind::PLUS,
    SyntaxKind::MINUS,
    SyntaxKind::PLUS_PLUS,
    SyntaxKind::MINUS_MINUS,
    SyntaxKind::TYPEOF_KW,
    SyntaxKind::VOID_KW,
    SyntaxKind::DELETE_KW,
    SyntaxKind::AWAIT_KW,
];

/// Tokens an expression-level error never swallows
const EXPR_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::R_PAREN,
    SyntaxKind::R_BRACE,
    SyntaxKind::R_BRACKET,
    SyntaxKind::SEMICOLON,
    SyntaxKind::COMMA,
];

/// For each token index, whether it opens a bracket whose match is
/// followed by `=>`. One pass, so arrow detection stays linear.
fn arrow_parens(tokens: &[Token<'_>]) -> Vec<bool> {
    let mut flags = vec![false; tokens.len()];
    let mut open = Vec::new();
    let mut just_closed = None;
    for (index, token) in tokens.iter().enumerate() {
        if token.kind.is_trivia() {
            continue;
        }
        if let Some(opener) = just_closed.take() {
            flags[opener] = token.kind == SyntaxKind::FAT_ARROW;
        }
        match token.kind {
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACE | SyntaxKind::L_BRACKET => open.push(index),
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACE | SyntaxKind::R_BRACKET => {
                just_closed = open.pop();
            }
            _ => {}
        }
    }
    flags
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    arrow_parens: Vec<bool>,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            arrow_parens: arrow_parens(tokens),
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    /// Contextual keyword check (`async`, `get`, `set`, `from`)
    fn at_contextual(&self, text: &str) -> bool {
        self.at(SyntaxKind::IDENT) && self.current_text() == text
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Upcoming non-trivia tokens, starting at the current one
    fn lookahead(&self) -> impl Iterator<Item = &Token<'a>> + '_ {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.lookahead().nth(n).map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    /// Whether the `(` at lookahead position `n` closes into `) =>`
    fn paren_followed_by_arrow(&self, n: usize) -> bool {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .and_then(|(index, _)| self.arrow_parens.get(index))
            .copied()
            .unwrap_or(false)
    }

    fn at_arrow_function(&self) -> bool {
        match self.current_kind() {
            _ if self.at_eof() => false,
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::FAT_ARROW => true,
            SyntaxKind::IDENT if self.current_text() == "async" => match self.nth(1) {
                SyntaxKind::IDENT => self.nth(2) == SyntaxKind::FAT_ARROW,
                SyntaxKind::L_PAREN => self.paren_followed_by_arrow(1),
                _ => false,
            },
            SyntaxKind::L_PAREN => self.paren_followed_by_arrow(0),
            _ => false,
        }
    }

    /// `get`/`set`/`async` used as a modifier rather than as the member name
    fn at_member_modifier(&self) -> bool {
        let is_modifier = self.at_contextual("get")
            || self.at_contextual("set")
            || self.at_contextual("async");
        if !is_modifier {
            return false;
        }
        let next = self.nth(1);
        next.is_name_like()
            || matches!(
                next,
                SyntaxKind::STRING | SyntaxKind::NUMBER | SyntaxKind::L_BRACKET | SyntaxKind::STAR
            )
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Consume the current token and any trivia that follows it
    fn bump(&mut self) {
        let tokens = self.tokens;
        if let Some(token) = tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
        self.skip_trivia();
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.pos).filter(|t| t.kind.is_trivia()) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .or_else(|| {
                self.tokens
                    .last()
                    .map(|t| TextRange::empty(t.offset + TextSize::of(t.text)))
            })
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.builder.finish_node();
    }

    /// Force progress inside list loops that did not consume anything
    fn ensure_progress(&mut self, before: usize) {
        if self.pos == before && !self.at_eof() {
            self.error(format!("unexpected token: {:?}", self.current_kind()));
            self.builder.start_node(SyntaxKind::ERROR.into());
            self.bump();
            self.builder.finish_node();
        }
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Wrap the current token in a single-token node
    fn token_node(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.finish_node();
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// SourceFile = Statement*
    fn parse_source_file(&mut self) {
        self.start_node(SyntaxKind::SOURCE_FILE);
        self.skip_trivia();

        while !self.at_eof() {
            let pos_before = self.pos;
            self.parse_statement();
            // Safety: if we didn't make progress, force-skip a token
            if self.pos == pos_before && !self.at_eof() {
                self.error(format!("stuck on token: {:?}", self.current_kind()));
                self.bump();
            }
        }

        self.finish_node();
    }

    fn parse_statement(&mut self) {
        match self.current_kind() {
            SyntaxKind::CONST_KW | SyntaxKind::LET_KW | SyntaxKind::VAR_KW => {
                self.parse_var_decl()
            }
            SyntaxKind::FUNCTION_KW => self.parse_function_decl(),
            SyntaxKind::IDENT
                if self.current_text() == "async" && self.nth(1) == SyntaxKind::FUNCTION_KW =>
            {
                self.parse_function_decl()
            }
            SyntaxKind::EXPORT_KW => self.parse_export(),
            SyntaxKind::IMPORT_KW
                if !matches!(self.nth(1), SyntaxKind::L_PAREN | SyntaxKind::DOT) =>
            {
                self.parse_import()
            }
            SyntaxKind::RETURN_KW => self.parse_return(),
            SyntaxKind::IF_KW => self.parse_if(),
            SyntaxKind::L_BRACE => self.parse_block(),
            SyntaxKind::SEMICOLON => self.token_node(SyntaxKind::EMPTY_STMT),
            SyntaxKind::FOR_KW => self.parse_for(),
            SyntaxKind::WHILE_KW => self.parse_while(),
            SyntaxKind::DO_KW => self.parse_do_while(),
            SyntaxKind::SWITCH_KW => self.parse_switch(),
            SyntaxKind::BREAK_KW => self.parse_jump(SyntaxKind::BREAK_STMT),
            SyntaxKind::CONTINUE_KW => self.parse_jump(SyntaxKind::CONTINUE_STMT),
            SyntaxKind::THROW_KW => self.parse_throw(),
            SyntaxKind::TRY_KW => self.parse_try(),
            SyntaxKind::CLASS_KW => self.parse_class(),
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::COLON => self.parse_labeled(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// VarDecl = ('const' | 'let' | 'var') Declarator (',' Declarator)* ';'?
    fn parse_var_decl(&mut self) {
        self.start_node(SyntaxKind::VAR_DECL);
        self.parse_declarators();
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn parse_declarators(&mut self) {
        self.bump(); // const / let / var
        loop {
            self.parse_declarator();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }
    }

    /// Declarator = (Name | ObjectPattern | ArrayPattern) ('=' AssignmentExpression)?
    fn parse_declarator(&mut self) {
        self.start_node(SyntaxKind::DECLARATOR);

        match self.current_kind() {
            SyntaxKind::IDENT if !self.at_eof() => self.parse_name(),
            SyntaxKind::L_BRACE if !self.at_eof() => self.parse_object_expr(),
            SyntaxKind::L_BRACKET if !self.at_eof() => self.parse_array_expr(),
            _ => self.error("expected binding name"),
        }

        if self.eat(SyntaxKind::EQ) {
            self.parse_assignment_expr();
        }

        self.finish_node();
    }

    fn parse_name(&mut self) {
        if self.at(SyntaxKind::IDENT) {
            self.token_node(SyntaxKind::NAME);
        } else {
            self.error("expected identifier");
        }
    }

    /// FunctionDecl = 'async'? 'function' '*'? Name ParamList Block
    fn parse_function_decl(&mut self) {
        self.start_node(SyntaxKind::FUNCTION_DECL);
        self.parse_function_signature_and_body();
        self.finish_node();
    }

    fn parse_function_signature_and_body(&mut self) {
        if self.at_contextual("async") {
            self.bump();
        }
        self.expect(SyntaxKind::FUNCTION_KW);
        self.eat(SyntaxKind::STAR);
        if self.at(SyntaxKind::IDENT) {
            self.parse_name();
        }
        self.parse_param_list();
        self.parse_block();
    }

    /// Export = 'export' ('default' AssignmentExpression | VarDecl | FunctionDecl | ExportList)
    fn parse_export(&mut self) {
        self.start_node(SyntaxKind::EXPORT_DECL);
        self.bump(); // export

        match self.current_kind() {
            _ if self.at_eof() => self.error("expected export body"),
            SyntaxKind::DEFAULT_KW => {
                self.bump();
                self.parse_assignment_expr();
                self.eat(SyntaxKind::SEMICOLON);
            }
            SyntaxKind::CONST_KW | SyntaxKind::LET_KW | SyntaxKind::VAR_KW => {
                self.parse_var_decl()
            }
            SyntaxKind::FUNCTION_KW => self.parse_function_decl(),
            SyntaxKind::IDENT if self.current_text() == "async" => self.parse_function_decl(),
            SyntaxKind::L_BRACE | SyntaxKind::STAR => {
                // export { a, b as c } from '...' / export * from '...'
                self.skip_module_specifiers();
            }
            _ => self.error_recover("unexpected export form", &[SyntaxKind::SEMICOLON]),
        }

        self.finish_node();
    }

    /// Import = 'import' ... StringLiteral ';'?
    fn parse_import(&mut self) {
        self.start_node(SyntaxKind::IMPORT_DECL);
        self.bump(); // import
        self.skip_module_specifiers();
        self.finish_node();
    }

    /// Consume import/export clauses up to and including the module string
    fn skip_module_specifiers(&mut self) {
        while !self.at_eof() && !self.at(SyntaxKind::SEMICOLON) {
            let is_source = self.at(SyntaxKind::STRING);
            self.bump();
            if is_source {
                break;
            }
        }
        self.eat(SyntaxKind::SEMICOLON);
    }

    /// Return = 'return' Expression? ';'?
    fn parse_return(&mut self) {
        self.start_node(SyntaxKind::RETURN_STMT);
        self.bump(); // return

        if !self.at_eof() && !self.at_any(&[SyntaxKind::SEMICOLON, SyntaxKind::R_BRACE]) {
            self.parse_expression();
        }
        self.eat(SyntaxKind::SEMICOLON);

        self.finish_node();
    }

    /// If = 'if' '(' Expression ')' Statement ('else' Statement)?
    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IF_STMT);
        self.bump(); // if

        self.expect(SyntaxKind::L_PAREN);
        self.parse_expression();
        self.expect(SyntaxKind::R_PAREN);
        self.parse_nested_statement();

        if self.eat(SyntaxKind::ELSE_KW) {
            self.parse_nested_statement();
        }

        self.finish_node();
    }

    /// For = 'for' 'await'? '(' ForHead ')' Statement
    ///
    /// ForHead = (VarDecl | Expression)? (('of' | 'in') Expression | ';' Expression? ';' Expression?)
    fn parse_for(&mut self) {
        self.start_node(SyntaxKind::FOR_STMT);
        self.bump(); // for
        self.eat(SyntaxKind::AWAIT_KW);
        self.expect(SyntaxKind::L_PAREN);

        match self.current_kind() {
            _ if self.at_eof() => {}
            SyntaxKind::SEMICOLON => {}
            SyntaxKind::CONST_KW | SyntaxKind::LET_KW | SyntaxKind::VAR_KW => {
                self.start_node(SyntaxKind::VAR_DECL);
                self.parse_declarators();
                self.finish_node();
            }
            _ => self.parse_expression(),
        }

        if self.at_contextual("of") || self.at(SyntaxKind::IN_KW) {
            self.bump();
            self.parse_assignment_expr();
        } else if !self.at(SyntaxKind::R_PAREN) {
            // `for (k in o)` without a declaration already parsed as `k in o`
            self.expect(SyntaxKind::SEMICOLON);
            if !self.at_eof() && !self.at(SyntaxKind::SEMICOLON) {
                self.parse_expression();
            }
            self.expect(SyntaxKind::SEMICOLON);
            if !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
                self.parse_expression();
            }
        }

        self.expect(SyntaxKind::R_PAREN);
        self.parse_nested_statement();
        self.finish_node();
    }

    /// While = 'while' '(' Expression ')' Statement
    fn parse_while(&mut self) {
        self.start_node(SyntaxKind::WHILE_STMT);
        self.bump(); // while
        self.parse_condition();
        self.parse_nested_statement();
        self.finish_node();
    }

    /// DoWhile = 'do' Statement 'while' '(' Expression ')' ';'?
    fn parse_do_while(&mut self) {
        self.start_node(SyntaxKind::DO_WHILE_STMT);
        self.bump(); // do
        self.parse_nested_statement();
        self.expect(SyntaxKind::WHILE_KW);
        self.parse_condition();
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    fn parse_condition(&mut self) {
        self.expect(SyntaxKind::L_PAREN);
        self.parse_expression();
        self.expect(SyntaxKind::R_PAREN);
    }

    /// Switch = 'switch' '(' Expression ')' '{' SwitchCase* '}'
    fn parse_switch(&mut self) {
        const CASE_START: &[SyntaxKind] = &[
            SyntaxKind::CASE_KW,
            SyntaxKind::DEFAULT_KW,
            SyntaxKind::R_BRACE,
        ];

        self.start_node(SyntaxKind::SWITCH_STMT);
        self.bump(); // switch
        self.parse_condition();
        self.expect(SyntaxKind::L_BRACE);

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            if !self.at_any(CASE_START) {
                self.error_recover("expected `case` or `default`", CASE_START);
                continue;
            }
            // SwitchCase = ('case' Expression | 'default') ':' Statement*
            self.start_node(SyntaxKind::SWITCH_CASE);
            if self.eat(SyntaxKind::CASE_KW) {
                self.parse_expression();
            } else {
                self.bump(); // default
            }
            self.expect(SyntaxKind::COLON);
            while !self.at_eof() && !self.at_any(CASE_START) {
                let before = self.pos;
                self.parse_statement();
                self.ensure_progress(before);
            }
            self.finish_node();
        }

        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// Jump = ('break' | 'continue') Label? ';'?
    fn parse_jump(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump(); // break / continue
        if self.at(SyntaxKind::IDENT) && !self.newline_before_current() {
            self.token_node(SyntaxKind::NAME_REF);
        }
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Throw = 'throw' Expression ';'?
    fn parse_throw(&mut self) {
        self.start_node(SyntaxKind::THROW_STMT);
        self.bump(); // throw
        self.parse_expression();
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    /// Try = 'try' Block ('catch' ParamList? Block)? ('finally' Block)?
    fn parse_try(&mut self) {
        self.start_node(SyntaxKind::TRY_STMT);
        self.bump(); // try
        self.parse_block();

        let has_catch = self.at(SyntaxKind::CATCH_KW);
        if has_catch {
            self.start_node(SyntaxKind::CATCH_CLAUSE);
            self.bump(); // catch
            if self.at(SyntaxKind::L_PAREN) {
                self.parse_param_list();
            }
            self.parse_block();
            self.finish_node();
        }
        if self.eat(SyntaxKind::FINALLY_KW) {
            self.parse_block();
        } else if !has_catch {
            self.error("expected `catch` or `finally`");
        }

        self.finish_node();
    }

    /// Labeled = Name ':' Statement
    fn parse_labeled(&mut self) {
        self.start_node(SyntaxKind::LABELED_STMT);
        self.parse_name();
        self.bump(); // :
        self.parse_nested_statement();
        self.finish_node();
    }

    /// Class = 'class' Name? ('extends' PostfixExpression)? '{' ... '}'
    ///
    /// The body is kept as raw tokens; members are never inspected.
    fn parse_class(&mut self) {
        self.start_node(SyntaxKind::CLASS);
        self.bump(); // class

        if self.at(SyntaxKind::IDENT) && !self.at_contextual("extends") {
            self.parse_name();
        }
        if self.at_contextual("extends") {
            self.bump();
            self.parse_postfix_expr();
        }

        if self.expect(SyntaxKind::L_BRACE) {
            let mut depth = 1usize;
            while !self.at_eof() && depth > 0 {
                match self.current_kind() {
                    SyntaxKind::L_BRACE => depth += 1,
                    SyntaxKind::R_BRACE => depth -= 1,
                    _ => {}
                }
                self.bump();
            }
            if depth > 0 {
                self.error("unterminated class body");
            }
        }

        self.finish_node();
    }

    /// Whether a line break separates the current token from the previous one
    fn newline_before_current(&self) -> bool {
        self.tokens[..self.pos.min(self.tokens.len())]
            .iter()
            .rev()
            .take_while(|t| t.kind.is_trivia())
            .any(|t| t.text.contains('\n'))
    }

    fn parse_nested_statement(&mut self) {
        if self.at_eof() {
            self.error("expected statement");
        } else {
            self.parse_statement();
        }
    }

    /// Block = '{' Statement* '}'
    fn parse_block(&mut self) {
        self.start_node(SyntaxKind::BLOCK);

        self.expect(SyntaxKind::L_BRACE);
        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let before = self.pos;
            self.parse_statement();
            self.ensure_progress(before);
        }
        self.expect(SyntaxKind::R_BRACE);

        self.finish_node();
    }

    /// ExprStmt = Expression ';'?
    fn parse_expr_stmt(&mut self) {
        self.start_node(SyntaxKind::EXPR_STMT);
        self.parse_expression();
        self.eat(SyntaxKind::SEMICOLON);
        self.finish_node();
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression(&mut self) {
        self.parse_assignment_expr();
    }

    /// AssignmentExpression = ArrowFunction | YieldExpression
    ///                      | ConditionalExpression (AssignOp AssignmentExpression)?
    fn parse_assignment_expr(&mut self) {
        if self.at_arrow_function() {
            self.parse_arrow_fn();
            return;
        }

        if self.at(SyntaxKind::YIELD_KW) {
            self.start_node(SyntaxKind::PREFIX_EXPR);
            self.bump();
            self.eat(SyntaxKind::STAR);
            if !self.at_eof() && !self.at_any(EXPR_RECOVERY) {
                self.parse_assignment_expr();
            }
            self.finish_node();
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_conditional_expr();

        if self.at(SyntaxKind::EQ) || self.at(SyntaxKind::ASSIGN_OP) {
            self.start_node_at(checkpoint, SyntaxKind::ASSIGN_EXPR);
            self.bump();
            self.parse_assignment_expr();
            self.finish_node();
        }
    }

    /// ArrowFunction = 'async'? (Name | ParamList) '=>' (Block | AssignmentExpression)
    fn parse_arrow_fn(&mut self) {
        self.start_node(SyntaxKind::ARROW_FN);

        if self.at_contextual("async") && self.nth(1) != SyntaxKind::FAT_ARROW {
            self.bump();
        }

        if self.at(SyntaxKind::IDENT) {
            self.start_node(SyntaxKind::PARAM_LIST);
            self.parse_name();
            self.finish_node();
        } else {
            self.parse_param_list();
        }

        self.expect(SyntaxKind::FAT_ARROW);

        if self.at(SyntaxKind::L_BRACE) {
            self.parse_block();
        } else {
            self.parse_assignment_expr();
        }

        self.finish_node();
    }

    /// ConditionalExpression = BinaryExpression ('?' AssignmentExpression ':' AssignmentExpression)?
    fn parse_conditional_expr(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary_expr(1);

        if self.at(SyntaxKind::QUESTION) {
            self.start_node_at(checkpoint, SyntaxKind::COND_EXPR);
            self.bump(); // ?
            self.parse_assignment_expr();
            self.expect(SyntaxKind::COLON);
            self.parse_assignment_expr();
            self.finish_node();
        }
    }

    /// BinaryExpression = UnaryExpression (InfixOp UnaryExpression)*, by precedence
    fn parse_binary_expr(&mut self, min_precedence: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary_expr();

        while let Some(precedence) = infix_precedence(self.current_kind()) {
            if self.at_eof() || precedence < min_precedence {
                break;
            }
            // `**` is right-associative
            let next_min = if self.at(SyntaxKind::STAR_STAR) {
                precedence
            } else {
                precedence + 1
            };
            self.start_node_at(checkpoint, SyntaxKind::BIN_EXPR);
            self.bump();
            self.parse_binary_expr(next_min);
            self.finish_node();
        }
    }

    /// UnaryExpression = PrefixOp UnaryExpression | PostfixExpression
    fn parse_unary_expr(&mut self) {
        if self.at_any(PREFIX_OPS) {
            self.start_node(SyntaxKind::PREFIX_EXPR);
            self.bump();
            self.parse_unary_expr();
            self.finish_node();
        } else {
            self.parse_postfix_expr();
        }
    }

    /// PostfixExpression = (NewExpression | PrimaryExpression) (Member | Index | Call)* ('++' | '--')?
    fn parse_postfix_expr(&mut self) {
        let checkpoint = self.checkpoint();

        if self.at(SyntaxKind::NEW_KW) {
            self.parse_new_expr();
        } else {
            self.parse_primary_expr();
        }

        loop {
            match self.current_kind() {
                _ if self.at_eof() => break,
                SyntaxKind::QUESTION_DOT if self.nth(1) == SyntaxKind::L_PAREN => {
                    self.start_node_at(checkpoint, SyntaxKind::CALL_EXPR);
                    self.bump(); // ?.
                    self.parse_arg_list();
                    self.finish_node();
                }
                SyntaxKind::QUESTION_DOT if self.nth(1) == SyntaxKind::L_BRACKET => {
                    self.start_node_at(checkpoint, SyntaxKind::INDEX_EXPR);
                    self.bump(); // ?.
                    self.bump(); // [
                    self.parse_expression();
                    self.expect(SyntaxKind::R_BRACKET);
                    self.finish_node();
                }
                SyntaxKind::DOT | SyntaxKind::QUESTION_DOT => {
                    self.start_node_at(checkpoint, SyntaxKind::MEMBER_EXPR);
                    self.bump(); // . or ?.
                    self.parse_member_name();
                    self.finish_node();
                }
                SyntaxKind::L_BRACKET => {
                    self.start_node_at(checkpoint, SyntaxKind::INDEX_EXPR);
                    self.bump(); // [
                    self.parse_expression();
                    self.expect(SyntaxKind::R_BRACKET);
                    self.finish_node();
                }
                SyntaxKind::L_PAREN => {
                    self.start_node_at(checkpoint, SyntaxKind::CALL_EXPR);
                    self.parse_arg_list();
                    self.finish_node();
                }
                SyntaxKind::PLUS_PLUS | SyntaxKind::MINUS_MINUS => {
                    self.bump();
                    break;
                }
                _ => break,
            }
        }
    }

    fn parse_member_name(&mut self) {
        if !self.at_eof() && self.current_kind().is_name_like() {
            self.token_node(SyntaxKind::NAME);
        } else {
            self.error("expected property name");
        }
    }

    /// NewExpression = 'new' MemberChain ArgList?
    fn parse_new_expr(&mut self) {
        self.start_node(SyntaxKind::NEW_EXPR);
        self.bump(); // new

        let checkpoint = self.checkpoint();
        self.parse_primary_expr();
        while self.at(SyntaxKind::DOT) {
            self.start_node_at(checkpoint, SyntaxKind::MEMBER_EXPR);
            self.bump();
            self.parse_member_name();
            self.finish_node();
        }

        if self.at(SyntaxKind::L_PAREN) {
            self.parse_arg_list();
        }

        self.finish_node();
    }

    /// PrimaryExpression = NameRef | Literal | '(' Expression ')' | Object | Array | Function
    fn parse_primary_expr(&mut self) {
        match self.current_kind() {
            _ if self.at_eof() => self.error("expected expression"),
            SyntaxKind::IDENT
                if self.current_text() == "async" && self.nth(1) == SyntaxKind::FUNCTION_KW =>
            {
                self.parse_function_expr()
            }
            SyntaxKind::IDENT | SyntaxKind::THIS_KW | SyntaxKind::IMPORT_KW => {
                self.token_node(SyntaxKind::NAME_REF)
            }
            SyntaxKind::NUMBER
            | SyntaxKind::STRING
            | SyntaxKind::TEMPLATE
            | SyntaxKind::REGEX
            | SyntaxKind::TRUE_KW
            | SyntaxKind::FALSE_KW
            | SyntaxKind::NULL_KW => self.token_node(SyntaxKind::LITERAL),
            SyntaxKind::L_PAREN => self.parse_paren_expr(),
            SyntaxKind::L_BRACE => self.parse_object_expr(),
            SyntaxKind::L_BRACKET => self.parse_array_expr(),
            SyntaxKind::FUNCTION_KW => self.parse_function_expr(),
            SyntaxKind::CLASS_KW => self.parse_class(),
            _ if self.at_any(EXPR_RECOVERY) => self.error("expected expression"),
            _ => self.error_recover(
                format!("unexpected token in expression: {:?}", self.current_kind()),
                EXPR_RECOVERY,
            ),
        }
    }

    /// ParenExpression = '(' Expression (',' Expression)* ')'
    fn parse_paren_expr(&mut self) {
        self.start_node(SyntaxKind::PAREN_EXPR);
        self.bump(); // (

        self.parse_expression();
        while self.eat(SyntaxKind::COMMA) {
            self.parse_expression();
        }

        self.expect(SyntaxKind::R_PAREN);
        self.finish_node();
    }

    /// FunctionExpression = 'async'? 'function' '*'? Name? ParamList Block
    fn parse_function_expr(&mut self) {
        self.start_node(SyntaxKind::FUNCTION_EXPR);
        self.parse_function_signature_and_body();
        self.finish_node();
    }

    /// Object = '{' (ObjectMember (',' ObjectMember)* ','?)? '}'
    fn parse_object_expr(&mut self) {
        self.start_node(SyntaxKind::OBJECT_EXPR);
        self.expect(SyntaxKind::L_BRACE);

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACE) {
            let before = self.pos;
            self.parse_object_member();
            self.ensure_progress(before);
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }

        self.expect(SyntaxKind::R_BRACE);
        self.finish_node();
    }

    /// ObjectMember = '...' AssignmentExpression
    ///              | ('get' | 'set' | 'async')? '*'? PropertyKey ParamList Block
    ///              | PropertyKey (':' AssignmentExpression | '=' AssignmentExpression)?
    fn parse_object_member(&mut self) {
        if self.at(SyntaxKind::DOT_DOT_DOT) {
            self.parse_spread();
            return;
        }

        let checkpoint = self.checkpoint();
        let mut has_modifier = false;
        while self.at_member_modifier() {
            self.bump();
            has_modifier = true;
        }
        if self.eat(SyntaxKind::STAR) {
            has_modifier = true;
        }

        self.parse_property_key();

        if self.at(SyntaxKind::L_PAREN) || has_modifier {
            self.start_node_at(checkpoint, SyntaxKind::METHOD);
            self.parse_param_list();
            self.parse_block();
            self.finish_node();
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::PROPERTY);
        if self.eat(SyntaxKind::COLON) || self.eat(SyntaxKind::EQ) {
            self.parse_assignment_expr();
        }
        self.finish_node();
    }

    /// PropertyKey = Name | StringLiteral | NumberLiteral | '[' AssignmentExpression ']'
    fn parse_property_key(&mut self) {
        match self.current_kind() {
            _ if self.at_eof() => self.error("expected property key"),
            kind if kind.is_name_like() => self.token_node(SyntaxKind::NAME),
            SyntaxKind::STRING | SyntaxKind::NUMBER => self.token_node(SyntaxKind::LITERAL),
            SyntaxKind::L_BRACKET => {
                self.start_node(SyntaxKind::COMPUTED_KEY);
                self.bump(); // [
                self.parse_assignment_expr();
                self.expect(SyntaxKind::R_BRACKET);
                self.finish_node();
            }
            _ => self.error("expected property key"),
        }
    }

    fn parse_spread(&mut self) {
        self.start_node(SyntaxKind::SPREAD);
        self.bump(); // ...
        self.parse_assignment_expr();
        self.finish_node();
    }

    /// Array = '[' (Element? (',' Element?)*)? ']'
    fn parse_array_expr(&mut self) {
        self.start_node(SyntaxKind::ARRAY_EXPR);
        self.expect(SyntaxKind::L_BRACKET);

        while !self.at_eof() && !self.at(SyntaxKind::R_BRACKET) {
            if self.eat(SyntaxKind::COMMA) {
                // hole
                continue;
            }
            let before = self.pos;
            if self.at(SyntaxKind::DOT_DOT_DOT) {
                self.parse_spread();
            } else {
                self.parse_assignment_expr();
            }
            self.ensure_progress(before);
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }

        self.expect(SyntaxKind::R_BRACKET);
        self.finish_node();
    }

    /// ArgList = '(' (Argument (',' Argument)* ','?)? ')'
    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.parse_comma_list();
        self.finish_node();
    }

    /// ParamList = '(' (Param (',' Param)* ','?)? ')'
    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        self.parse_comma_list();
        self.finish_node();
    }

    fn parse_comma_list(&mut self) {
        self.expect(SyntaxKind::L_PAREN);

        while !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
            let before = self.pos;
            if self.at(SyntaxKind::DOT_DOT_DOT) {
                self.parse_spread();
            } else {
                self.parse_assignment_expr();
            }
            self.ensure_progress(before);
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
        }

        self.expect(SyntaxKind::R_PAREN);
    }
}
