// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

//! Syntax tree for OpenQASM 2.
//!
//! Text is lexed into a [`LexedStr`] and parsed by a recursive descent parser into
//! a tree of plain tagged nodes defined in [`ast`]. Each node records the
//! [`TextRange`] of the source it came from. No name resolution or other
//! semantic checking is done here.
//!
//! Parsing never fails outright. [`SourceFile::parse`] always returns a tree together
//! with a (possibly empty) list of [`SyntaxError`]s.

mod lexed_str;
mod parsing;
mod syntax_error;
mod syntax_kind;

pub mod ast;

#[cfg(test)]
mod tests;

pub use crate::{
    ast::{AstNode, SourceFile},
    lexed_str::LexedStr,
    syntax_error::SyntaxError,
    syntax_kind::SyntaxKind,
};
pub use rowan::{TextRange, TextSize};
pub use smol_str::SmolStr;

/// `Parse` is the result of the parsing: a syntax tree and a collection of
/// errors.
///
/// Note that we always produce a syntax tree, even for completely invalid
/// files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parse<T> {
    tree: T,
    errors: Vec<SyntaxError>,
}

impl<T> Parse<T> {
    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn into_tree(self) -> T {
        self.tree
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn ok(self) -> Result<T, Vec<SyntaxError>> {
        if self.errors.is_empty() {
            Ok(self.tree)
        } else {
            Err(self.errors)
        }
    }
}

impl SourceFile {
    pub fn parse(text: &str) -> Parse<SourceFile> {
        let (tree, errors) = parsing::parse_text(text);
        Parse { tree, errors }
    }
}
