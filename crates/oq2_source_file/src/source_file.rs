// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use std::io;
use std::path::{Path, PathBuf};

use oq2_syntax::ast as synast; // Syntactic AST
use oq2_syntax::{Parse, TextRange};

use crate::api::inner_print_compiler_errors;

/// The tree produced by the parser, together with any syntax errors.
pub type ParsedSource = Parse<synast::SourceFile>;

/// The crate text-range defines `TextRange`.
/// Errors are displayed with the crate `ariadne`, which uses `Range<usize>`.
/// We have to convert from the former to the latter.
pub fn range_to_span(range: &TextRange) -> std::ops::Range<usize> {
    let r1: usize = range.start().into();
    let r2: usize = range.end().into();
    r1..r2
}

pub trait ErrorTrait {
    /// Return a message describing the error.
    fn message(&self) -> String;

    /// Return the character range in the source associated with the error.
    fn range(&self) -> TextRange;
}

impl ErrorTrait for oq2_syntax::SyntaxError {
    fn message(&self) -> String {
        self.message().to_string()
    }

    fn range(&self) -> TextRange {
        self.range()
    }
}

pub trait SourceTrait {
    /// Return `true` if the source produced a lexing or parse error.
    fn any_parse_errors(&self) -> bool {
        !self.syntax_ast().errors().is_empty()
    }

    fn syntax_ast(&self) -> &ParsedSource;

    /// The path used when printing diagnostics.
    fn file_path(&self) -> &Path;

    fn source(&self) -> &str;

    fn print_syntax_errors(&self) -> io::Result<()> {
        inner_print_compiler_errors(self.syntax_ast().errors(), self.file_path(), self.source())
    }
}

#[derive(Clone, Debug)]
pub struct SourceFile {
    file_path: PathBuf,
    source: String,
    syntax_ast: ParsedSource,
}

impl SourceTrait for SourceFile {
    fn syntax_ast(&self) -> &ParsedSource {
        &self.syntax_ast
    }

    fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn source(&self) -> &str {
        &self.source
    }
}

impl SourceFile {
    pub fn new<F: AsRef<Path>>(file_path: F, source: String, syntax_ast: ParsedSource) -> SourceFile {
        SourceFile {
            file_path: file_path.as_ref().to_owned(),
            source,
            syntax_ast,
        }
    }
}

/// Structure for managing parsing QASM from a string with no associated
/// source file. `fake_file_path` contains something like "no file" and is
/// present in order to make it easier to avoid duplicating code supporting
/// QASM read from source files.
#[derive(Clone, Debug)]
pub struct SourceString {
    fake_file_path: PathBuf,
    source: String,
    syntax_ast: ParsedSource,
}

impl SourceTrait for SourceString {
    fn syntax_ast(&self) -> &ParsedSource {
        &self.syntax_ast
    }

    fn file_path(&self) -> &Path {
        &self.fake_file_path
    }

    fn source(&self) -> &str {
        &self.source
    }
}

impl SourceString {
    pub fn new<T: AsRef<str>, P: AsRef<Path>>(
        source: T,
        fake_file_path: P,
        syntax_ast: ParsedSource,
    ) -> SourceString {
        SourceString {
            source: source.as_ref().to_owned(),
            fake_file_path: fake_file_path.as_ref().to_owned(),
            syntax_ast,
        }
    }

    pub fn fake_file_path(&self) -> &Path {
        &self.fake_file_path
    }
}
