//! Schema-aware resolution of declara documents.
//!
//! The resolver walks a document's statements in order, scope by scope, and
//! binds each one to the schema element it denotes:
//! - assignments to the property at the end of their left-hand chain
//! - calls to a function of the current receiver, or of the receiver reached
//!   through a chain such as `a.b.f()`; a chain may pass through the result
//!   of a plain call, as in `id("a").version("1")`
//! - trailing blocks of configuring calls to a nested result resolved against
//!   the receiver type the function configures
//!
//! Before anything about a statement is resolved, a [`StatementFilter`]
//! decides whether it takes part at all. Rejecting a configuring call drops
//! its block with it, at any depth.
//!
//! ## Errors
//!
//! Names that do not exist in the schema, blocks given to or withheld from
//! functions against their declaration, ill-typed values and bare
//! expressions are reported as [`ResolutionError`]s with the span they refer
//! to. Whether the first error aborts resolution or only drops its statement
//! is chosen through [`ResolverOptions`].

mod error;
mod filter;
mod options;
mod resolver;
mod result;

pub use error::{ReferenceKind, ResolutionError};
pub use filter::{accept_if, AcceptAll, RejectCalls, ResolutionContext, StatementFilter};
pub use options::{ErrorPolicy, ResolverOptions};
pub use resolver::{resolve, Resolver};
pub use result::{ReceiverStep, ResolutionResult, ResolvedAssignment, ResolvedExpr, ResolvedFunctionCall};
