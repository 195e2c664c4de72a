// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use boolenum::BoolEnum;
use oq2_syntax::ast::AstNode;

use crate::asg::{ClassicalRegister, Operand, QuantumRegister, Reference};
use crate::semantic_error::SemanticErrorKind::*;
use crate::semantic_error::{RegisterKind, SemanticError, SemanticErrorKind};
use crate::symbols::{SymbolError, SymbolTable};

/// May a quantum and a classical register have the same name?
#[derive(BoolEnum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SharedRegisterNames {
    True,
    False,
}

/// Options controlling one build of a `Program`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BuildOptions {
    pub shared_register_names: SharedRegisterNames,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            shared_register_names: SharedRegisterNames::False,
        }
    }
}

impl BuildOptions {
    pub fn new() -> BuildOptions {
        BuildOptions::default()
    }

    pub fn with_shared_register_names(mut self, shared: SharedRegisterNames) -> BuildOptions {
        self.shared_register_names = shared;
        self
    }
}

/// State of one build. Symbol table errors are turned into `SemanticError`s here,
/// located at the node that caused them.
#[derive(Clone, Debug)]
pub struct Context {
    pub symbol_table: SymbolTable,
}

impl Context {
    pub(crate) fn new(options: &BuildOptions) -> Context {
        Context {
            symbol_table: SymbolTable::new(options.shared_register_names),
        }
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn into_symbol_table(self) -> SymbolTable {
        self.symbol_table
    }

    pub(crate) fn declare_qreg<T>(
        &mut self,
        name: &str,
        size: usize,
        node: &T,
    ) -> Result<QuantumRegister, SemanticError>
    where
        T: AstNode,
    {
        self.symbol_table
            .declare_qreg(name, size)
            .cloned()
            .map_err(|err| symbol_error(err, node))
    }

    pub(crate) fn declare_creg<T>(
        &mut self,
        name: &str,
        size: usize,
        node: &T,
    ) -> Result<ClassicalRegister, SemanticError>
    where
        T: AstNode,
    {
        self.symbol_table
            .declare_creg(name, size)
            .cloned()
            .map_err(|err| symbol_error(err, node))
    }

    /// Resolve a reference that must designate qubits.
    pub(crate) fn resolve_quantum<T>(
        &self,
        reference: &Reference,
        node: &T,
    ) -> Result<Operand, SemanticError>
    where
        T: AstNode,
    {
        let operand = self
            .symbol_table
            .resolve(reference)
            .map_err(|err| symbol_error(err, node))?;
        if operand.is_quantum() {
            Ok(operand)
        } else {
            Err(kind_error(reference, RegisterKind::Quantum, node))
        }
    }

    /// Resolve a reference that must designate classical bits.
    // Looks in the classical table directly, so that a creg sharing its name with a qreg
    // is found when names are shared.
    pub(crate) fn resolve_classical<T>(
        &self,
        reference: &Reference,
        node: &T,
    ) -> Result<Operand, SemanticError>
    where
        T: AstNode,
    {
        match self.symbol_table.resolve_classical(reference) {
            Err(SymbolError::MissingBinding(_))
                if self.symbol_table.qreg(reference.name()).is_some() =>
            {
                Err(kind_error(reference, RegisterKind::Classical, node))
            }
            result => result.map_err(|err| symbol_error(err, node)),
        }
    }
}

fn kind_error<T: AstNode>(reference: &Reference, expected: RegisterKind, node: &T) -> SemanticError {
    let kind = RegisterKindError {
        register: reference.name().to_string(),
        expected,
    };
    SemanticError::new(kind, node)
}

fn symbol_error<T: AstNode>(err: SymbolError, node: &T) -> SemanticError {
    let kind: SemanticErrorKind = match err {
        SymbolError::MissingBinding(name) => UndeclaredRegisterError(name),
        SymbolError::AlreadyBound(name) => DuplicateDeclarationError(name),
        SymbolError::IndexOutOfRange { name, index, size } => IndexOutOfRangeError {
            register: name,
            index,
            size,
        },
        SymbolError::TooManyBits(size) => RegisterSizeError(size.to_string()),
    };
    SemanticError::new(kind, node)
}
