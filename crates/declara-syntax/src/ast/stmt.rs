use std::sync::Arc;

use declara_source::{Origin, SourceText};

use super::expr::{Expr, FunctionCall, PropertyAccess};

/// `lhs = rhs`, where `lhs` is a property access chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub lhs: PropertyAccess,
    pub rhs: Expr,
    pub origin: Origin,
}

/// A statement at some scope of a document.
///
/// The set of statement kinds is closed; anything that is neither an
/// assignment nor a call is carried as a bare `Expression` so the resolver can
/// reject it with a proper span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Assignment(Assignment),
    Call(FunctionCall),
    Expression(Expr),
}

impl Statement {
    pub fn origin(&self) -> &Origin {
        match self {
            Statement::Assignment(assignment) => &assignment.origin,
            Statement::Call(call) => &call.origin,
            Statement::Expression(expr) => expr.origin(),
        }
    }

    /// Short human-readable name of the statement kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Assignment(_) => "assignment",
            Statement::Call(_) => "function call",
            Statement::Expression(Expr::Literal(_)) => "literal",
            Statement::Expression(Expr::Access(_)) => "property access",
            Statement::Expression(Expr::Call(_)) => "function call expression",
        }
    }

    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            Statement::Assignment(assignment) => Some(assignment),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&FunctionCall> {
        match self {
            Statement::Call(call) => Some(call),
            _ => None,
        }
    }
}

/// An ordered sequence of statements. Order is document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub origin: Origin,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// A parsed document: its top-level block and the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub source: Arc<SourceText>,
    pub block: Block,
}

impl Document {
    pub fn statements(&self) -> &[Statement] {
        &self.block.statements
    }
}
