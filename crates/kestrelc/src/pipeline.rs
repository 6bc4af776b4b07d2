//! The compiler stages behind each subcommand.
//!
//! Each entry point returns `Err(message)` for the caller to report. Parse
//! and type errors are rendered as diagnostics here, before returning.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use kestrel_lexer::Lexer;
use kestrel_parser::{Expr, ParseError};
use kestrel_typeck::diagnostics::{render_diagnostic, render_parse_error, DiagnosticOptions};
use kestrel_typeck::Scheme;
use log::{debug, info, trace};

/// A loaded program and the name diagnostics refer to it by.
pub(crate) struct SourceFile {
    pub(crate) name: String,
    pub(crate) text: String,
    /// `None` when read from stdin.
    path: Option<PathBuf>,
}

/// Read `path`, or stdin when `path` is `-`.
pub(crate) fn read_source(path: &Path) -> Result<SourceFile, String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("could not read stdin: {e}"))?;
        return Ok(SourceFile {
            name: "<stdin>".to_string(),
            text,
            path: None,
        });
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {e}", path.display()))?;
    debug!("read {} bytes from {}", text.len(), path.display());
    Ok(SourceFile {
        name: path.display().to_string(),
        text,
        path: Some(path.to_path_buf()),
    })
}

fn report_parse_error(file: &SourceFile, err: &ParseError, opts: &DiagnosticOptions) -> String {
    eprintln!("{}", render_parse_error(err, &file.text, &file.name, opts));
    format!("could not compile '{}' due to a syntax error", file.name)
}

fn parse(file: &SourceFile, opts: &DiagnosticOptions) -> Result<Expr, String> {
    let start = Instant::now();
    let expr = kestrel_parser::parse(&file.text).map_err(|e| report_parse_error(file, &e, opts))?;
    debug!("parsed {} in {:?}", file.name, start.elapsed());
    trace!("syntax tree:\n{}", expr.debug_tree());
    Ok(expr)
}

/// Parse and type check, rendering any error as a diagnostic.
fn compile(file: &SourceFile, opts: &DiagnosticOptions) -> Result<(Expr, Scheme), String> {
    let expr = parse(file, opts)?;
    let start = Instant::now();
    let scheme = kestrel_typeck::check(&expr).map_err(|e| {
        eprintln!("{}", render_diagnostic(&e, &file.text, &file.name, opts));
        format!("could not compile '{}' due to a type error", file.name)
    })?;
    debug!("inferred `{scheme}` in {:?}", start.elapsed());
    Ok((expr, scheme))
}

/// `kestrelc check`: print the program's principal type.
pub(crate) fn check(path: &Path, opts: &DiagnosticOptions) -> Result<(), String> {
    let file = read_source(path)?;
    let (_, scheme) = compile(&file, opts)?;
    println!("{}: {scheme}", file.name);
    Ok(())
}

/// `kestrelc build`: type check, then write JavaScript.
///
/// Without `-o`, the output goes next to the input with a `.js` extension,
/// or to stdout when the input was stdin. The input itself is never
/// overwritten.
pub(crate) fn build(
    path: &Path,
    output: Option<&Path>,
    opts: &DiagnosticOptions,
) -> Result<(), String> {
    let file = read_source(path)?;
    let (expr, scheme) = compile(&file, opts)?;
    let js = kestrel_codegen::generate_javascript(&expr);

    let out_path = match (output, &file.path) {
        (Some(out), _) => out.to_path_buf(),
        (None, Some(input)) => input.with_extension("js"),
        (None, None) => {
            print!("{js}");
            return Ok(());
        }
    };
    if file.path.as_deref() == Some(out_path.as_path()) {
        return Err(format!(
            "output path '{}' is the input file; pass -o to choose another",
            out_path.display()
        ));
    }
    std::fs::write(&out_path, js)
        .map_err(|e| format!("could not write '{}': {e}", out_path.display()))?;
    info!("wrote {} (program type `{scheme}`)", out_path.display());
    Ok(())
}

/// `kestrelc tokens`: one line per token, trivia included. With `--json`
/// each line is the serialized token.
pub(crate) fn tokens(path: &Path, opts: &DiagnosticOptions) -> Result<(), String> {
    let file = read_source(path)?;
    let mut lexer = Lexer::new(&file.text);
    for token in lexer.by_ref() {
        if opts.json {
            let line = serde_json::to_string(&token).map_err(|e| e.to_string())?;
            println!("{line}");
        } else {
            println!(
                "{:?} {:?} {}..{}",
                token.kind,
                token.text(&file.text),
                token.span.start,
                token.span.end
            );
        }
    }
    match lexer.errors().first() {
        Some(err) => Err(report_parse_error(&file, &ParseError::from(err.clone()), opts)),
        None => Ok(()),
    }
}

/// `kestrelc ast`: the parsed tree, one node per line.
pub(crate) fn ast(path: &Path, opts: &DiagnosticOptions) -> Result<(), String> {
    let file = read_source(path)?;
    let expr = parse(&file, opts)?;
    print!("{}", expr.debug_tree());
    Ok(())
}
