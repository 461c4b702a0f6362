use std::sync::Arc;

use declara_source::{Origin, SourceText};
use miette::SourceSpan;

use crate::ast::*;
use crate::error::SyntaxError;
use crate::lexer::{Token, TokenKind};

type ParseResult<T> = Result<T, SyntaxError>;

/// Hand-rolled recursive descent parser over a lexed token stream.
///
/// Grammar:
///
/// ```text
/// document  ::= statement*
/// statement ::= chain "=" expr | chain | literal
/// chain     ::= ident ("." ident | call_tail)*
/// call_tail ::= "(" (expr ("," expr)*)? ")" block? | block
/// block     ::= "{" statement* "}"
/// expr      ::= literal | chain
/// ```
///
/// Two statements on the same line must be separated by `;`.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    source: Arc<SourceText>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>], source: Arc<SourceText>) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
        }
    }

    /// Peek at the current token without consuming it.
    fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Consume and return the current token.
    fn next(&mut self) -> Option<&'a Token<'a>> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Expect the next token to be of a specific kind.
    fn expect(&mut self, expected: TokenKind) -> ParseResult<&'a Token<'a>> {
        match self.next() {
            Some(t) if t.kind == expected => Ok(t),
            Some(t) => Err(SyntaxError::Parse {
                message: format!("unexpected {} `{}`", t.kind.describe(), t.lexeme),
                span: t.span,
                expected: Some(expected.describe().to_string()),
            }),
            None => Err(self.eof(expected.describe())),
        }
    }

    fn eof(&self, expected: &str) -> SyntaxError {
        SyntaxError::UnexpectedEof {
            expected: expected.to_string(),
            span: SourceSpan::new(self.source.len().into(), 0),
        }
    }

    fn origin(&self, span: SourceSpan) -> Origin {
        Origin::new(Arc::clone(&self.source), span)
    }

    //--------------------------------------------------------------------------
    // Top level: <document> ::= <statement>*
    //--------------------------------------------------------------------------

    pub fn parse_document(&mut self) -> ParseResult<Document> {
        let statements = self.parse_statements(None)?;
        let block = Block {
            statements,
            origin: Origin::whole(Arc::clone(&self.source)),
        };
        Ok(Document {
            source: Arc::clone(&self.source),
            block,
        })
    }

    /// Parse statements until `terminator` (or end of input when `None`).
    /// The terminator itself is left unconsumed.
    fn parse_statements(&mut self, terminator: Option<TokenKind>) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while self.eat(TokenKind::Semi) {}
            match self.peek_kind() {
                None => {
                    if let Some(kind) = terminator {
                        return Err(self.eof(kind.describe()));
                    }
                    break;
                }
                Some(kind) if Some(kind) == terminator => break,
                Some(_) => {
                    statements.push(self.parse_statement()?);
                    self.expect_separator(terminator)?;
                }
            }
        }
        Ok(statements)
    }

    /// After a statement the next token must be `;`, the terminator, the end
    /// of input, or the first token of a later line.
    fn expect_separator(&self, terminator: Option<TokenKind>) -> ParseResult<()> {
        let tok = match self.peek() {
            Some(tok) => tok,
            None => return Ok(()),
        };
        if tok.kind == TokenKind::Semi || Some(tok.kind) == terminator || self.starts_line(tok) {
            return Ok(());
        }
        Err(SyntaxError::Parse {
            message: format!(
                "unexpected {} `{}` on the same line as the previous statement",
                tok.kind.describe(),
                tok.lexeme
            ),
            span: tok.span,
            expected: Some("`;` or a line break".to_string()),
        })
    }

    /// Whether a line break lies between `tok` and the token consumed before it.
    fn starts_line(&self, tok: &Token<'_>) -> bool {
        let end = match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(prev) => prev.span.offset() + prev.span.len(),
            None => 0,
        };
        self.source
            .contents()
            .get(end..tok.span.offset())
            .map_or(false, |gap| gap.contains('\n'))
    }

    //--------------------------------------------------------------------------
    // <statement> ::= <chain> "=" <expr> | <chain> | <literal>
    //--------------------------------------------------------------------------

    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        if self.peek_kind() != Some(TokenKind::Ident) {
            return Ok(Statement::Expression(self.parse_expr()?));
        }

        match self.parse_chain()? {
            Expr::Access(access) if self.peek_kind() == Some(TokenKind::Eq) => {
                self.next();
                let rhs = self.parse_expr()?;
                let origin = access.origin.to(rhs.origin());
                Ok(Statement::Assignment(Assignment {
                    lhs: access,
                    rhs,
                    origin,
                }))
            }
            Expr::Call(call) => Ok(Statement::Call(*call)),
            other => Ok(Statement::Expression(other)),
        }
    }

    //--------------------------------------------------------------------------
    // <expr> ::= <literal> | <chain>
    //--------------------------------------------------------------------------

    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        let tok = match self.peek() {
            Some(tok) => tok,
            None => return Err(self.eof("expression")),
        };

        match tok.kind {
            TokenKind::Int | TokenKind::String | TokenKind::True | TokenKind::False => {
                self.next();
                Ok(Expr::Literal(self.parse_literal(tok)?))
            }
            TokenKind::Ident => self.parse_chain(),
            _ => Err(SyntaxError::Parse {
                message: format!("unexpected {} `{}`", tok.kind.describe(), tok.lexeme),
                span: tok.span,
                expected: Some("expression".to_string()),
            }),
        }
    }

    fn parse_literal(&self, tok: &Token<'a>) -> ParseResult<LiteralNode> {
        let value = match tok.kind {
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            TokenKind::Int => {
                let value = tok.lexeme.parse::<i64>().map_err(|e| SyntaxError::InvalidLiteral {
                    message: format!("`{}` is not a valid integer: {}", tok.lexeme, e),
                    span: tok.span,
                })?;
                Literal::Int(value)
            }
            TokenKind::String => Literal::String(unescape(tok)?),
            _ => {
                return Err(SyntaxError::Parse {
                    message: format!("unexpected {} `{}`", tok.kind.describe(), tok.lexeme),
                    span: tok.span,
                    expected: Some("literal".to_string()),
                })
            }
        };
        Ok(LiteralNode {
            value,
            origin: self.origin(tok.span),
        })
    }

    //--------------------------------------------------------------------------
    // <chain> ::= <ident> ("." <ident> | <call_tail>)*
    //--------------------------------------------------------------------------

    /// Parses a chain of property reads and calls, left to right, so that
    /// `id("a").version` reads `version` from the result of `id("a")`.
    fn parse_chain(&mut self) -> ParseResult<Expr> {
        let first = self.parse_ident()?;
        let mut chain = Expr::Access(PropertyAccess {
            receiver: None,
            origin: first.origin.clone(),
            name: first,
        });

        loop {
            match self.peek_kind() {
                Some(TokenKind::Dot) => {
                    self.next();
                    let name = self.parse_ident()?;
                    let origin = chain.origin().to(&name.origin);
                    chain = Expr::Access(PropertyAccess {
                        receiver: Some(Box::new(chain)),
                        name,
                        origin,
                    });
                }
                Some(TokenKind::LParen) | Some(TokenKind::LBrace) => match chain {
                    Expr::Access(access) => chain = Expr::Call(Box::new(self.parse_call_tail(access)?)),
                    // A call result cannot be called again.
                    other => {
                        chain = other;
                        break;
                    }
                },
                _ => break,
            }
        }

        Ok(chain)
    }

    fn parse_ident(&mut self) -> ParseResult<Ident> {
        let tok = self.expect(TokenKind::Ident)?;
        Ok(Ident {
            name: tok.lexeme.to_string(),
            origin: self.origin(tok.span),
        })
    }

    //--------------------------------------------------------------------------
    // <call_tail> ::= "(" <args>? ")" <block>? | <block>
    //--------------------------------------------------------------------------

    /// Turns `access` into a call: its last segment names the function and
    /// whatever it was read from becomes the call's receiver.
    fn parse_call_tail(&mut self, access: PropertyAccess) -> ParseResult<FunctionCall> {
        let start = access.origin.clone();
        let PropertyAccess { receiver, name, .. } = access;

        let mut args = Vec::new();
        let mut end = name.origin.clone();
        if self.eat(TokenKind::LParen) {
            if self.peek_kind() != Some(TokenKind::RParen) {
                loop {
                    args.push(self.parse_expr()?);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
            }
            let close = self.expect(TokenKind::RParen)?;
            end = self.origin(close.span);
        }

        let block = if self.peek_kind() == Some(TokenKind::LBrace) {
            let block = self.parse_block()?;
            end = block.origin.clone();
            Some(block)
        } else {
            None
        };

        Ok(FunctionCall {
            receiver: receiver.map(|r| *r),
            name,
            args,
            block,
            origin: start.to(&end),
        })
    }

    fn parse_block(&mut self) -> ParseResult<Block> {
        let open = self.expect(TokenKind::LBrace)?;
        let statements = self.parse_statements(Some(TokenKind::RBrace))?;
        let close = self.expect(TokenKind::RBrace)?;
        let origin = self.origin(open.span).to(&self.origin(close.span));
        Ok(Block { statements, origin })
    }
}

/// Strips the quotes from a string literal token and resolves escapes.
fn unescape(tok: &Token<'_>) -> ParseResult<String> {
    let inner = &tok.lexeme[1..tok.lexeme.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            other => {
                return Err(SyntaxError::InvalidLiteral {
                    message: format!(
                        "unknown escape sequence `\\{}`",
                        other.map(String::from).unwrap_or_default()
                    ),
                    span: tok.span,
                })
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_statement(text: &str) -> Statement {
        let source = SourceText::shared("test.dcl", text);
        let tokens = lex(text).unwrap();
        let mut parser = Parser::new(&tokens, source);
        parser.parse_statement().unwrap()
    }

    #[test]
    fn test_parse_chain_assignment() {
        let stmt = parse_statement("a.b.c = 1");
        let assignment = stmt.as_assignment().unwrap();
        let segments = assignment.lhs.segments().unwrap();
        let names: Vec<_> = segments.iter().map(|i| i.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(assignment.lhs.origin.text(), "a.b.c");
        assert_eq!(assignment.lhs.root().unwrap().as_str(), "a");
        assert_eq!(assignment.origin.text(), "a.b.c = 1");
    }

    #[test]
    fn test_parse_call_receiver_split() {
        let stmt = parse_statement("a.b.f(1, x)");
        let call = stmt.as_call().unwrap();
        assert_eq!(call.name(), "f");
        assert_eq!(call.receiver.as_ref().unwrap().to_string(), "a.b");
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.origin.text(), "a.b.f(1, x)");
        assert!(!call.has_block());
    }

    #[test]
    fn test_parse_member_of_call_result() {
        let stmt = parse_statement("id(\"a\").version(\"1\").apply(false)");
        let call = stmt.as_call().unwrap();
        assert_eq!(call.name(), "apply");
        assert_eq!(call.origin.text(), "id(\"a\").version(\"1\").apply(false)");
        assert_eq!(call.root().unwrap().as_str(), "id");

        let version = match call.receiver.as_ref().unwrap() {
            Expr::Call(version) => version,
            other => panic!("expected call receiver, got {:?}", other),
        };
        assert_eq!(version.name(), "version");
        assert_eq!(version.origin.text(), "id(\"a\").version(\"1\")");
        assert!(matches!(version.receiver, Some(Expr::Call(_))));
    }

    #[test]
    fn test_parse_assignment_through_call_result() {
        let stmt = parse_statement("id(\"a\").version = \"1\"");
        let assignment = stmt.as_assignment().unwrap();
        assert_eq!(assignment.lhs.to_string(), "id(\"a\").version");
        assert_eq!(assignment.lhs.segments(), None);
        assert_eq!(assignment.origin.text(), "id(\"a\").version = \"1\"");
    }

    #[test]
    fn test_parse_string_escapes() {
        let stmt = parse_statement(r#"s = "a\"b\\c\n""#);
        let assignment = stmt.as_assignment().unwrap();
        match &assignment.rhs {
            Expr::Literal(lit) => assert_eq!(lit.value, Literal::String("a\"b\\c\n".to_string())),
            other => panic!("expected literal, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_escape() {
        let text = r#"s = "\q""#;
        let source = SourceText::shared("test.dcl", text);
        let tokens = lex(text).unwrap();
        let err = Parser::new(&tokens, source).parse_statement().unwrap_err();
        assert!(matches!(err, SyntaxError::InvalidLiteral { .. }));
    }
}
