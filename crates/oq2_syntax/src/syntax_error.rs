// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use crate::TextRange;

/// Represents the result of unsuccessful tokenization or parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SyntaxError(String, TextRange);

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self(message.into(), range)
    }

    pub fn range(&self) -> TextRange {
        self.1
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
