// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use ariadne::Config;
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::fs;
use std::io;
use std::ops::Range;
use std::path::Path;

use oq2_syntax::ast as synast; // Syntactic AST

use crate::source_file::{range_to_span, ErrorTrait, SourceFile, SourceString};

/// Read source from `file_path` and parse to the syntactic AST.
pub fn parse_source_file<T: AsRef<Path>>(file_path: T) -> io::Result<SourceFile> {
    let full_path = fs::canonicalize(file_path.as_ref())?;
    let source = fs::read_to_string(&full_path)?;
    let syntax_ast = synast::SourceFile::parse(&source);
    Ok(SourceFile::new(full_path, source, syntax_ast))
}

/// Parse `source` to the syntactic AST. `fake_file_path` is only used in diagnostics.
/// It defaults to "no file".
pub fn parse_source_string<T: AsRef<str>, P: AsRef<Path>>(
    source: T,
    fake_file_path: Option<P>,
) -> SourceString {
    let syntax_ast = synast::SourceFile::parse(source.as_ref());
    match fake_file_path {
        Some(path) => SourceString::new(source, path, syntax_ast),
        None => SourceString::new(source, "no file", syntax_ast),
    }
}

/// Print compiler errors. Diagnostics include text taken from `source`.
/// The file `info_file_path` is only used for printing error messages. In particular,
/// it does not need to correspond to an existing file.
pub fn inner_print_compiler_errors<T: ErrorTrait>(
    errors: &[T],
    info_file_path: &Path,
    source: &str,
) -> io::Result<()> {
    // ariadne wants the path as &str, not PathBuf.
    let file_path = info_file_path.to_string_lossy();
    for err in errors.iter() {
        let err_string = err.message();
        let err_span = range_to_span(&err.range());
        report_error(&err_string, &err_span, &file_path, source)?;
        println!();
    }
    Ok(())
}

/// Read the text of `file_path` and print `errors` against it.
pub fn print_compiler_errors<T: ErrorTrait>(errors: &[T], file_path: &Path) -> io::Result<()> {
    let source = fs::read_to_string(file_path)?;
    inner_print_compiler_errors(errors, file_path, &source)
}

pub fn report_error(
    message: &str,
    span: &Range<usize>,
    file_path: &str,
    source: &str,
) -> io::Result<()> {
    let mut colors = ColorGenerator::new();
    let a = colors.next();
    Report::build(ReportKind::Error, (file_path, span.clone()))
        .with_message(message)
        .with_config(Config::default().with_compact(true))
        .with_label(
            Label::new((file_path, span.clone()))
                .with_message("Near this point")
                .with_color(a),
        )
        .finish()
        .print((file_path, Source::from(source)))
}
