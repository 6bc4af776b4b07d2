//! Parse error types for the Kestrel parser.

use std::fmt;

use kestrel_common::error::LexError;
use kestrel_common::span::Span;

/// A parse error with location information and optional related span.
///
/// Parsing stops at the first error, so a failed parse yields exactly one
/// of these and never a partial tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// Human-readable description of what went wrong.
    pub message: String,
    /// Primary source location where the error was detected.
    pub span: Span,
    /// Optional related location with context message (e.g., "`(` opened here").
    pub related: Option<(String, Span)>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            related: None,
        }
    }

    /// Create a parse error with a related span for additional context.
    pub fn with_related(
        message: impl Into<String>,
        span: Span,
        related_message: impl Into<String>,
        related_span: Span,
    ) -> Self {
        Self {
            message: message.into(),
            span,
            related: Some((related_message.into(), related_span)),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(err.kind.to_string(), err.span)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}
