use std::fmt;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// What kind of schema element a name failed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A property segment of an access chain.
    Property,
    /// The name of a called function.
    Function,
    /// An intermediate chain segment, or a configured type, that does not
    /// denote a receiver which can be walked into.
    Receiver,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Property => f.write_str("property"),
            ReferenceKind::Function => f.write_str("function"),
            ReferenceKind::Receiver => f.write_str("configurable receiver"),
        }
    }
}

/// Errors that can occur while resolving a document against a schema.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// A property, function or receiver-chain segment has no match in the
    /// type it was looked up in.
    #[error("Unresolved reference: `{name}` is not a {kind} of `{scope}`")]
    #[diagnostic(
        code(declara_resolve::unresolved_reference),
        help("Check the name against the members the schema declares for this receiver")
    )]
    UnresolvedReference {
        /// The name that could not be resolved.
        name: String,
        kind: ReferenceKind,
        /// Name of the schema type the lookup was made in.
        scope: String,
        #[label("not found")]
        span: SourceSpan,
    },

    /// The document disagrees with the schema about a resolved element: a
    /// block given to or withheld from a function, a value of the wrong type,
    /// a wrong number of arguments, or an assignment to a read-only property.
    #[error("Schema mismatch: {message}")]
    #[diagnostic(code(declara_resolve::schema_mismatch))]
    SchemaMismatch {
        message: String,
        #[label("here")]
        span: SourceSpan,
    },

    /// A statement kind with no resolution rule, such as a bare literal.
    #[error("Unsupported statement: a bare {kind} has no meaning in `{scope}`")]
    #[diagnostic(
        code(declara_resolve::unsupported_statement),
        help("Only property assignments and function calls may appear as statements")
    )]
    UnsupportedStatement {
        /// Human-readable statement kind, e.g. `literal`.
        kind: &'static str,
        scope: String,
        #[label("unsupported statement")]
        span: SourceSpan,
    },
}

impl ResolutionError {
    pub fn span(&self) -> SourceSpan {
        match self {
            ResolutionError::UnresolvedReference { span, .. }
            | ResolutionError::SchemaMismatch { span, .. }
            | ResolutionError::UnsupportedStatement { span, .. } => *span,
        }
    }
}
