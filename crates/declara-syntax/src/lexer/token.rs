use logos::Logos;
use miette::SourceSpan;

/// A token spans from `start` to `end` within the original source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub span: SourceSpan,
}

/// All possible tokens of the configuration language.
#[derive(Debug, Logos, PartialEq, Eq, Clone, Copy)]
pub enum TokenKind {
    // Punctuation
    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Keywords
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Literals
    #[regex(r"-?[0-9]+")]
    Int,
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    // Whitespace and line comments (to be skipped)
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Whitespace,
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,

    // Catch-all for anything unexpected
    #[error]
    Error,
}

impl TokenKind {
    /// How the token reads in an "expected ..." message.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Eq => "`=`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Semi => "`;`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::True | TokenKind::False => "boolean literal",
            TokenKind::Int => "integer literal",
            TokenKind::String => "string literal",
            TokenKind::Ident => "identifier",
            TokenKind::Whitespace | TokenKind::Comment => "whitespace",
            TokenKind::Error => "invalid input",
        }
    }
}
