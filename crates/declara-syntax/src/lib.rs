//! Syntax for the declara configuration language.
//!
//! The language is a narrow, statically analyzable sublanguage: a document is
//! a sequence of property assignments (`a.b = 1`) and function calls
//! (`id("app")`, `plugins { ... }`), where a call may carry a trailing block of
//! further statements. Statements sharing a line are separated by `;`. There
//! is no control flow and no expression language beyond literals and chains of
//! property reads and calls.
//!
//! Every node of the tree owns an [`Origin`](declara_source::Origin) from
//! which the exact source text of that node can be recovered.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

use std::sync::Arc;

use declara_source::SourceText;

pub use ast::{Assignment, Block, Document, Expr, FunctionCall, Ident, Literal, LiteralNode, PropertyAccess, Statement};
pub use error::SyntaxError;
pub use parser::Parser;

/// Parse `text` into a [`Document`], naming the source `name` for diagnostics.
pub fn parse(name: impl Into<String>, text: impl Into<String>) -> Result<Document, SyntaxError> {
    parse_source(SourceText::shared(name, text))
}

/// Parse an already loaded source into a [`Document`].
pub fn parse_source(source: Arc<SourceText>) -> Result<Document, SyntaxError> {
    let tokens = lexer::lex(source.contents())?;
    let document = Parser::new(&tokens, Arc::clone(&source)).parse_document()?;
    log::debug!(
        "parsed `{}`: {} top-level statements",
        source.name(),
        document.block.statements.len()
    );
    Ok(document)
}
