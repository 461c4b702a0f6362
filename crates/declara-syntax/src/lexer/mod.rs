pub mod token;

pub use token::*;

use logos::Logos;
use miette::SourceSpan;

use crate::error::SyntaxError;

/// Lexes the input string into a vector of tokens.
pub fn lex(input: &str) -> Result<Vec<Token<'_>>, SyntaxError> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let range = lexer.span();
        let lexeme = &input[range.clone()];
        let span = SourceSpan::new(range.start.into(), range.len());

        match kind {
            TokenKind::Error => {
                return Err(SyntaxError::Lexer {
                    lexeme: lexeme.to_string(),
                    span,
                });
            }
            _ => {
                tokens.push(Token { kind, lexeme, span });
            }
        }
    }

    log::trace!("lexed {} tokens", tokens.len());
    Ok(tokens)
}
