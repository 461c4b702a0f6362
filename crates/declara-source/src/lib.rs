//! Source text management for the declara resolver.
//!
//! This crate is responsible for:
//! - Holding the text of a configuration document behind a shared handle
//! - Tracking the *origin* of every syntax node and resolved entity, so the
//!   exact source substring it came from can always be recovered
//! - Pairing diagnostics with the text they point into for rich rendering
//!
//! ## Origins
//!
//! An [`Origin`] is a `miette::SourceSpan` plus a reference-counted handle to
//! the [`SourceText`] it indexes into. Cloning an origin is cheap, and results
//! built from a document keep the document text alive for as long as they are
//! held.
//!
//! ## Diagnostics
//!
//! Error types across the workspace derive `miette::Diagnostic`. A [`Report`]
//! attaches the originating text to such an error so miette can render labels
//! against it.

mod diagnostic;
mod file;
mod origin;

pub use diagnostic::{DeclaraError, Report};
pub use file::SourceText;
pub use origin::Origin;

pub use miette::SourceSpan;
