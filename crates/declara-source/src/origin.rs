use std::fmt;
use std::sync::Arc;

use miette::SourceSpan;

use crate::file::SourceText;

/// Where a syntax node or resolved entity came from.
///
/// An origin is a contiguous span in a [`SourceText`]. It can always recover
/// the exact substring it was derived from through [`Origin::text`], which is
/// what diagnostics and selective re-rendering of accepted statements rely on.
#[derive(Clone)]
pub struct Origin {
    source: Arc<SourceText>,
    span: SourceSpan,
}

impl Origin {
    pub fn new(source: Arc<SourceText>, span: SourceSpan) -> Self {
        Self { source, span }
    }

    /// An origin covering the whole of `source`.
    pub fn whole(source: Arc<SourceText>) -> Self {
        let span = SourceSpan::new(0.into(), source.len());
        Self { source, span }
    }

    pub fn span(&self) -> SourceSpan {
        self.span
    }

    pub fn offset(&self) -> usize {
        self.span.offset()
    }

    /// Exclusive end offset of the span.
    pub fn end(&self) -> usize {
        self.span.offset() + self.span.len()
    }

    pub fn source(&self) -> &Arc<SourceText> {
        &self.source
    }

    /// The exact source substring this origin covers.
    pub fn text(&self) -> &str {
        self.source.slice(self.span).unwrap_or_default()
    }

    /// An origin running from the start of `self` to the end of `other`.
    ///
    /// Both origins must point into the same source.
    pub fn to(&self, other: &Origin) -> Origin {
        debug_assert!(Arc::ptr_eq(&self.source, &other.source));
        let start = self.offset().min(other.offset());
        let end = self.end().max(other.end());
        Origin {
            source: Arc::clone(&self.source),
            span: SourceSpan::new(start.into(), end - start),
        }
    }
}

impl PartialEq for Origin {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span
            && (Arc::ptr_eq(&self.source, &other.source) || self.source == other.source)
    }
}

impl Eq for Origin {}

impl fmt::Debug for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@{}..{} {:?}",
            self.source.name(),
            self.offset(),
            self.end(),
            self.text()
        )
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
