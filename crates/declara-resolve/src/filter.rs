//! Statement filtering.
//!
//! A [`StatementFilter`] is consulted once for every statement the resolver
//! reaches, before anything about the statement is resolved. A rejected
//! statement is dropped as if it had never been written. When the rejected
//! statement is a call with a trailing block, the whole block goes with it:
//! its statements are never shown to the filter and nothing inside them
//! reaches the result.

use declara_schema::SchemaType;
use declara_syntax::Statement;

/// Where in a document a statement is being resolved.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'c> {
    scope: &'c SchemaType,
    path: &'c [&'c str],
}

impl<'c> ResolutionContext<'c> {
    pub(crate) fn new(scope: &'c SchemaType, path: &'c [&'c str]) -> Self {
        Self { scope, path }
    }

    /// The receiver type statements at this position resolve against.
    pub fn scope(&self) -> &'c SchemaType {
        self.scope
    }

    /// Nesting depth; zero at the top level of a document.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Names of the enclosing configuring calls, outermost first.
    pub fn path(&self) -> &'c [&'c str] {
        self.path
    }

    /// The innermost enclosing configuring call.
    pub fn enclosing_call(&self) -> Option<&'c str> {
        self.path.last().copied()
    }

    pub fn is_top_level(&self) -> bool {
        self.path.is_empty()
    }
}

/// Decides which statements take part in resolution.
///
/// Implementations should be free of side effects; the same filter is
/// threaded unchanged through every nested block of one resolution.
pub trait StatementFilter {
    fn accepts(&self, statement: &Statement, context: &ResolutionContext<'_>) -> bool;
}

impl<F> StatementFilter for F
where
    F: Fn(&Statement, &ResolutionContext<'_>) -> bool,
{
    fn accepts(&self, statement: &Statement, context: &ResolutionContext<'_>) -> bool {
        self(statement, context)
    }
}

/// The default filter: every statement is accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl StatementFilter for AcceptAll {
    fn accepts(&self, _statement: &Statement, _context: &ResolutionContext<'_>) -> bool {
        true
    }
}

/// Use a closure as a filter.
///
/// Passing the closure through here pins down its argument types, so
/// `accept_if(|statement, context| ...)` needs no annotations.
pub fn accept_if<F>(predicate: F) -> F
where
    F: Fn(&Statement, &ResolutionContext<'_>) -> bool,
{
    predicate
}

/// Rejects every call to a function with the given name, together with its
/// trailing block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectCalls {
    name: String,
}

impl RejectCalls {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl StatementFilter for RejectCalls {
    fn accepts(&self, statement: &Statement, _context: &ResolutionContext<'_>) -> bool {
        statement.as_call().map_or(true, |call| call.name() != self.name)
    }
}
