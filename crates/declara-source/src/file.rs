use std::ops::Range;
use std::sync::Arc;

use miette::{MietteError, SourceCode, SourceSpan, SpanContents};

/// The text of a single configuration document.
///
/// Documents are shared behind an `Arc` by every [`Origin`](crate::Origin)
/// that points into them, so a `SourceText` is never copied after it is loaded.
///
/// # Example
///
/// ```
/// use declara_source::SourceText;
///
/// let source = SourceText::shared("build.dcl", "n1.x = 2");
/// assert_eq!(source.slice((7, 1).into()), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceText {
    /// Display name of the document (usually a path)
    name: String,

    /// Raw contents of the document
    contents: String,
}

impl SourceText {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Creates a new source and wraps it in the shared handle origins expect.
    pub fn shared(name: impl Into<String>, contents: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(name, contents))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Returns the text covered by `span`, or `None` if the span falls outside
    /// the document or does not sit on character boundaries.
    pub fn slice(&self, span: SourceSpan) -> Option<&str> {
        self.contents.get(span_range(span))
    }
}

impl SourceCode for SourceText {
    fn read_span<'a>(
        &'a self,
        span: &SourceSpan,
        context_lines_before: usize,
        context_lines_after: usize,
    ) -> Result<Box<dyn SpanContents<'a> + 'a>, MietteError> {
        self.contents
            .read_span(span, context_lines_before, context_lines_after)
    }
}

pub(crate) fn span_range(span: SourceSpan) -> Range<usize> {
    span.offset()..span.offset() + span.len()
}
