//! Diagnostic reporting for errors that point into a document.
//!
//! Error enums in this workspace derive `miette::Diagnostic` and carry
//! `SourceSpan` labels, but they do not own the text those spans index into.
//! A [`Report`] binds one such error to its [`SourceText`] so miette can render
//! it with source context, highlighting, and labels.

use std::{error::Error, fmt, sync::Arc};

use miette::{Diagnostic, Severity};

use crate::file::SourceText;

/// An error paired with the document text it refers to.
#[derive(Debug, Clone)]
pub struct Report {
    /// The document the error's labels point into
    pub source: Arc<SourceText>,

    /// The error report
    pub report: Arc<dyn DeclaraError>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.report, f)
    }
}

impl Error for Report {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.report.source()
    }
}

/// Delegates everything to the wrapped error except `source_code`, which is
/// supplied from the attached document.
impl Diagnostic for Report {
    fn code<'b>(&'b self) -> Option<Box<dyn fmt::Display + 'b>> {
        self.report.code()
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        self.report.diagnostic_source()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.report.help()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        self.report.labels()
    }

    fn related<'a>(&'a self) -> Option<Box<dyn Iterator<Item = &'a dyn Diagnostic> + 'a>> {
        self.report.related()
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source)
    }

    fn url<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.report.url()
    }

    fn severity(&self) -> Option<Severity> {
        self.report.severity()
    }
}

/// An error that can be reported against a document.
///
/// Blanket-implemented for every thread-safe `Diagnostic`, so the error enums
/// of the syntax, schema and resolve crates all qualify without extra code.
pub trait DeclaraError: Diagnostic + Send + Sync + 'static {
    /// Attach `source` to this error for rendering.
    fn report(self, source: Arc<SourceText>) -> Report
    where
        Self: Sized;
}

impl<T: Diagnostic + Send + Sync + 'static> DeclaraError for T {
    fn report(self, source: Arc<SourceText>) -> Report {
        Report {
            source,
            report: Arc::new(self),
        }
    }
}
