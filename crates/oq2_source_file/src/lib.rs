// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

//! Management of source text for OpenQASM 2 parsing and semantic analysis. The main `struct`s here
//! are `SourceFile`, which holds the path to a source file together with its text and the tree
//! produced by the parser, and `SourceString`, which does the same for source that did not come
//! from a file.
//!
//! Files named in `include` statements are not read. The statement is recorded and nothing more.
//!
//! `report_error` formats error messages using the external crate `ariadne`.

mod api;
mod source_file;

pub use source_file::{range_to_span, ErrorTrait, ParsedSource, SourceFile, SourceString, SourceTrait};

pub use api::{
    inner_print_compiler_errors, parse_source_file, parse_source_string, print_compiler_errors,
    report_error,
};
