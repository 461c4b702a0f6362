use thiserror::Error;
use miette::{Diagnostic, SourceSpan};

#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("Lexer error: unrecognized input `{lexeme}`")]
    #[diagnostic(code(declara_syntax::lexer_error))]
    Lexer {
        lexeme: String,
        #[label("not part of the language")]
        span: SourceSpan,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(declara_syntax::parse_error))]
    Parse {
        message: String,
        #[label("error occurred here")]
        span: SourceSpan,
        #[help("expected: {expected:?}")]
        expected: Option<String>,
    },

    #[error("Unexpected end of input, expected {expected}")]
    #[diagnostic(code(declara_syntax::unexpected_eof))]
    UnexpectedEof {
        expected: String,
        #[label("input ends here")]
        span: SourceSpan,
    },

    #[error("Invalid literal: {message}")]
    #[diagnostic(code(declara_syntax::invalid_literal))]
    InvalidLiteral {
        message: String,
        #[label("in this literal")]
        span: SourceSpan,
    },
}

impl SyntaxError {
    pub fn span(&self) -> SourceSpan {
        match self {
            SyntaxError::Lexer { span, .. }
            | SyntaxError::Parse { span, .. }
            | SyntaxError::UnexpectedEof { span, .. }
            | SyntaxError::InvalidLiteral { span, .. } => *span,
        }
    }
}
