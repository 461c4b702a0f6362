use std::fmt;

use declara_source::Origin;

use super::common::{Ident, LiteralNode};
use super::stmt::Block;

/// A property read such as `a.b.c` or `id("a").version`.
///
/// The chain is stored right-to-left: the node names the last segment (`c`)
/// and `receiver` holds the expression it is read from (`a.b`). A receiver
/// may itself be a call, whose result is then the receiver. Without a
/// receiver the property is resolved against the current scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAccess {
    pub receiver: Option<Box<Expr>>,
    pub name: Ident,
    pub origin: Origin,
}

impl PropertyAccess {
    /// The segments of a plain property chain in reading order, left to
    /// right. `None` when a receiver along the chain is not a property.
    pub fn segments(&self) -> Option<Vec<&Ident>> {
        let mut segments = match self.receiver.as_deref() {
            None => Vec::new(),
            Some(Expr::Access(receiver)) => receiver.segments()?,
            Some(_) => return None,
        };
        segments.push(&self.name);
        Some(segments)
    }

    /// The identifier the chain starts from.
    pub fn root(&self) -> Option<&Ident> {
        match self.receiver.as_deref() {
            Some(receiver) => receiver.root(),
            None => Some(&self.name),
        }
    }
}

impl fmt::Display for PropertyAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(receiver) = &self.receiver {
            write!(f, "{}.", receiver)?;
        }
        f.write_str(&self.name.name)
    }
}

/// A function invocation, optionally with a trailing block: `f(1, "a")`,
/// `plugins { ... }`, `a.b.f(1) { ... }` or `id("a").version("1")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub receiver: Option<Expr>,
    pub name: Ident,
    pub args: Vec<Expr>,
    pub block: Option<Block>,
    pub origin: Origin,
}

impl FunctionCall {
    pub fn name(&self) -> &str {
        &self.name.name
    }

    pub fn has_block(&self) -> bool {
        self.block.is_some()
    }

    /// The identifier the call chain starts from.
    pub fn root(&self) -> Option<&Ident> {
        match &self.receiver {
            Some(receiver) => receiver.root(),
            None => Some(&self.name),
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(receiver) = &self.receiver {
            write!(f, "{}.", receiver)?;
        }
        write!(f, "{}(", self.name.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(")")?;
        if self.block.is_some() {
            f.write_str(" { ... }")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(LiteralNode),
    Access(PropertyAccess),
    Call(Box<FunctionCall>),
}

impl Expr {
    pub fn origin(&self) -> &Origin {
        match self {
            Expr::Literal(literal) => &literal.origin,
            Expr::Access(access) => &access.origin,
            Expr::Call(call) => &call.origin,
        }
    }

    /// The identifier the expression's chain starts from; `None` for a
    /// literal.
    pub fn root(&self) -> Option<&Ident> {
        match self {
            Expr::Literal(_) => None,
            Expr::Access(access) => access.root(),
            Expr::Call(call) => call.root(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal.value),
            Expr::Access(access) => write!(f, "{}", access),
            Expr::Call(call) => write!(f, "{}", call),
        }
    }
}
