// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use num_bigint::BigUint;
use oq2_source_file::ErrorTrait;
use oq2_syntax::{AstNode, SyntaxError};
use std::fmt;

// re-exported in lib.rs from rowan
use crate::TextRange;

/// Whether a register holds qubits or classical bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegisterKind {
    Quantum,
    Classical,
}

impl fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterKind::Quantum => write!(f, "quantum"),
            RegisterKind::Classical => write!(f, "classical"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SemanticErrorKind {
    /// The name is not a declared register.
    UndeclaredRegisterError(String),
    IndexOutOfRangeError {
        register: String,
        index: BigUint,
        size: usize,
    },
    /// A register name, or a formal name in a gate signature, is declared twice.
    DuplicateDeclarationError(String),
    UnknownMathFunctionError(String),
    /// The program does not start with `OPENQASM 2.x;`.
    MissingVersionError,
    UnsupportedVersionError(String),
    /// An identifier in an expression is not a formal parameter of the enclosing gate.
    UndefinedParameterError(String),
    /// An operand in a gate body is not a formal qubit of the gate.
    UndefinedGateArgumentError(String),
    /// A quantum register was used where a classical one is required, or vice versa.
    RegisterKindError {
        register: String,
        expected: RegisterKind,
    },
    /// The declared size of a register does not fit in a `usize`.
    RegisterSizeError(String),
    /// The text of a numeric literal could not be read. Trees from the parser never contain these.
    InvalidLiteralError(String),
}

impl fmt::Display for SemanticErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SemanticErrorKind::*;
        match self {
            UndeclaredRegisterError(name) => write!(f, "register '{name}' is not declared"),
            IndexOutOfRangeError {
                register,
                index,
                size,
            } => write!(
                f,
                "index {index} is out of range for register '{register}' of size {size}"
            ),
            DuplicateDeclarationError(name) => write!(f, "'{name}' is already defined"),
            UnknownMathFunctionError(name) => write!(f, "unknown function '{name}'"),
            MissingVersionError => write!(f, "the program must start with a version declaration"),
            UnsupportedVersionError(version) => {
                write!(f, "unsupported OpenQASM version '{version}'")
            }
            UndefinedParameterError(name) => write!(f, "'{name}' is not a gate parameter"),
            UndefinedGateArgumentError(name) => write!(f, "'{name}' is not a gate qubit argument"),
            RegisterKindError { register, expected } => {
                write!(f, "'{register}' is not a {expected} register")
            }
            RegisterSizeError(size) => write!(f, "register size {size} is too large"),
            InvalidLiteralError(text) => write!(f, "invalid numeric literal '{text}'"),
        }
    }
}

/// A semantic error, with the range of the source it was found in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SemanticError {
    error_kind: SemanticErrorKind,
    range: TextRange,
}

impl SemanticError {
    pub fn new<T>(error_kind: SemanticErrorKind, node: &T) -> Self
    where
        T: AstNode,
    {
        Self::with_range(error_kind, node.text_range())
    }

    pub fn with_range(error_kind: SemanticErrorKind, range: TextRange) -> Self {
        Self { error_kind, range }
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn kind(&self) -> &SemanticErrorKind {
        &self.error_kind
    }

    pub fn message(&self) -> String {
        self.error_kind.to_string()
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {:?}", self.error_kind, self.range)
    }
}

impl std::error::Error for SemanticError {}

impl ErrorTrait for SemanticError {
    fn message(&self) -> String {
        self.message()
    }

    fn range(&self) -> TextRange {
        self.range()
    }
}

/// Why building a program from source failed.
/// Semantic analysis is only run on source without syntax errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    SyntaxError(Vec<SyntaxError>),
    SemanticError(SemanticError),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::SyntaxError(errors) => {
                write!(f, "{} syntax error(s)", errors.len())?;
                if let Some(first) = errors.first() {
                    write!(f, ", first: {first}")?;
                }
                Ok(())
            }
            BuildError::SemanticError(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<SemanticError> for BuildError {
    fn from(error: SemanticError) -> BuildError {
        BuildError::SemanticError(error)
    }
}
