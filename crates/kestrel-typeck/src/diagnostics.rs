//! Ariadne-based diagnostic rendering for type and parse errors.
//!
//! Errors are first lowered to a [`Diagnostic`] (code, message, labelled
//! spans, optional help) and then rendered either as an ariadne report or
//! as a single-line JSON object.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use kestrel_common::span::Span;
use kestrel_parser::ParseError;

use crate::error::{TypeError, TypeErrorKind};
use crate::ty::Type;

/// How diagnostics are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticOptions {
    /// ANSI colors in ariadne output.
    pub color: bool,
    /// One JSON object per diagnostic instead of an ariadne report.
    pub json: bool,
}

impl DiagnosticOptions {
    /// Plain ariadne output, for tests and non-terminal sinks.
    pub fn colorless() -> Self {
        Self {
            color: false,
            json: false,
        }
    }

    pub fn json_mode() -> Self {
        Self {
            color: false,
            json: true,
        }
    }
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            color: true,
            json: false,
        }
    }
}

// ── Error Codes ────────────────────────────────────────────────────────

fn error_code(kind: &TypeErrorKind) -> &'static str {
    match kind {
        TypeErrorKind::TypeMismatch(..) => "E0001",
        TypeErrorKind::OccursCheckFailed(..) => "E0002",
        TypeErrorKind::UnboundVariable(_) => "E0003",
        TypeErrorKind::PatternArityMismatch(..) => "E0004",
        TypeErrorKind::PatternTypeMismatch(..) => "E0005",
    }
}

const PARSE_ERROR_CODE: &str = "P0001";

// ── Lowering ───────────────────────────────────────────────────────────

struct Diagnostic {
    code: &'static str,
    message: String,
    /// Primary span first. Empty when the error has no location.
    labels: Vec<(Span, String)>,
    help: Option<String>,
}

fn mismatch_help(expected: &Type, found: &Type) -> Option<String> {
    match (expected, found) {
        (_, Type::Var(_)) | (Type::Var(_), _) | (Type::Func(..), Type::Func(..)) => None,
        (Type::Func(..), _) => Some("only functions can be applied to arguments".to_string()),
        (_, Type::Func(..)) => {
            Some("a function was found here; it may be missing arguments".to_string())
        }
        _ => None,
    }
}

fn lower_type_error(error: &TypeError) -> Diagnostic {
    let (label, help) = match &error.kind {
        TypeErrorKind::TypeMismatch(expected, found) => (
            format!("expected `{expected}`, found `{found}`"),
            mismatch_help(expected, found),
        ),
        TypeErrorKind::OccursCheckFailed(..) => (
            "recursive type here".to_string(),
            Some("a value cannot have a type that refers to itself".to_string()),
        ),
        TypeErrorKind::UnboundVariable(_) => ("not found in this scope".to_string(), None),
        TypeErrorKind::PatternArityMismatch(_, ty) => (
            format!("the bound value has type `{ty}`"),
            Some("a tuple pattern needs exactly one element per tuple component".to_string()),
        ),
        TypeErrorKind::PatternTypeMismatch(_, ty) => (
            format!("the bound value has type `{ty}`"),
            Some("only tuples can be destructured".to_string()),
        ),
    };
    Diagnostic {
        code: error_code(&error.kind),
        message: error.kind.to_string(),
        labels: error.span.map(|span| (span, label)).into_iter().collect(),
        help,
    }
}

fn lower_parse_error(error: &ParseError) -> Diagnostic {
    let mut labels = vec![(error.span, error.message.clone())];
    if let Some((message, span)) = &error.related {
        labels.push((*span, message.clone()));
    }
    Diagnostic {
        code: PARSE_ERROR_CODE,
        message: error.message.clone(),
        labels,
        help: None,
    }
}

// ── Rendering ──────────────────────────────────────────────────────────

/// Render a type error as an ariadne report, or as one line of JSON when
/// `options.json` is set.
pub fn render_diagnostic(
    error: &TypeError,
    source: &str,
    filename: &str,
    options: &DiagnosticOptions,
) -> String {
    render(&lower_type_error(error), source, filename, options)
}

/// Render a parse error the same way as [`render_diagnostic`].
pub fn render_parse_error(
    error: &ParseError,
    source: &str,
    filename: &str,
    options: &DiagnosticOptions,
) -> String {
    render(&lower_parse_error(error), source, filename, options)
}

fn render(diag: &Diagnostic, source: &str, filename: &str, options: &DiagnosticOptions) -> String {
    if options.json {
        render_json(diag, filename)
    } else {
        render_report(diag, source, filename, options.color)
    }
}

fn render_json(diag: &Diagnostic, filename: &str) -> String {
    let spans: Vec<serde_json::Value> = diag
        .labels
        .iter()
        .map(|(span, label)| {
            serde_json::json!({
                "start": span.start,
                "end": span.end,
                "label": label,
            })
        })
        .collect();
    serde_json::json!({
        "code": diag.code,
        "severity": "error",
        "message": diag.message,
        "file": filename,
        "spans": spans,
        "help": diag.help,
    })
    .to_string()
}

fn render_report(diag: &Diagnostic, source: &str, filename: &str, color: bool) -> String {
    let source_len = source.len();
    // Clamp to the source and widen empty spans to one byte where possible.
    let clamp = |span: Span| -> Range<usize> {
        let start = (span.start as usize).min(source_len);
        let end = (span.end as usize).min(source_len).max(start);
        if start == end {
            start..(end + 1).min(source_len)
        } else {
            start..end
        }
    };

    let primary = diag
        .labels
        .first()
        .map_or(0..0, |(span, _)| clamp(*span));
    let config = Config::default()
        .with_color(color)
        .with_index_type(IndexType::Byte);

    let mut builder = Report::build(ReportKind::Error, (filename, primary))
        .with_code(diag.code)
        .with_message(&diag.message)
        .with_config(config);
    for (i, (span, label)) in diag.labels.iter().enumerate() {
        let color = if i == 0 { Color::Red } else { Color::Blue };
        builder.add_label(
            Label::new((filename, clamp(*span)))
                .with_message(label)
                .with_color(color),
        );
    }
    if let Some(help) = &diag.help {
        builder.set_help(help);
    }

    let mut buf = Vec::new();
    builder
        .finish()
        .write((filename, Source::from(source)), &mut buf)
        .expect("writing a diagnostic to memory cannot fail");
    String::from_utf8_lossy(&buf).into_owned()
}
