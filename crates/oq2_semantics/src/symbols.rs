// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

// Defines data structures and api for registers, scope, and the symbol table.

use indexmap::IndexMap;
use num_bigint::BigUint;

use crate::asg::{Cbit, ClassicalRegister, Operand, QuantumRegister, Qubit, Reference};
use crate::context::SharedRegisterNames;

/// Where a statement sits. This decides how names are resolved.
///
/// At `Global` scope operands name registers and are resolved against the `SymbolTable`.
/// In a gate body operands name formal qubits, identifiers in expressions name formal
/// parameters, and the `SymbolTable` is never consulted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope<'a> {
    Global,
    GateBody {
        params: &'a [String],
        qubits: &'a [String],
    },
}

impl Scope<'_> {
    /// True if `name` is a formal parameter of the enclosing gate.
    pub fn has_param(&self, name: &str) -> bool {
        match self {
            Scope::Global => false,
            Scope::GateBody { params, .. } => params.iter().any(|param| param == name),
        }
    }

    /// The position of `name` in the formal qubit list of the enclosing gate.
    pub fn qubit_position(&self, name: &str) -> Option<usize> {
        match self {
            Scope::Global => None,
            Scope::GateBody { qubits, .. } => qubits.iter().position(|qubit| qubit == name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolError {
    MissingBinding(String),
    AlreadyBound(String),
    IndexOutOfRange {
        name: String,
        index: BigUint,
        size: usize,
    },
    TooManyBits(usize),
}

pub type OperandResult = Result<Operand, SymbolError>;

/// The registers declared so far, and the counters used to allocate fresh qubits and bits.
///
/// Quantum and classical registers live in separate tables. Whether a name may appear in
/// both is decided by `SharedRegisterNames`.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    qregs: IndexMap<String, QuantumRegister>,
    cregs: IndexMap<String, ClassicalRegister>,
    num_qubits: usize,
    num_cbits: usize,
    shared_register_names: SharedRegisterNames,
}

impl SymbolTable {
    pub fn new(shared_register_names: SharedRegisterNames) -> SymbolTable {
        SymbolTable {
            qregs: IndexMap::new(),
            cregs: IndexMap::new(),
            num_qubits: 0,
            num_cbits: 0,
            shared_register_names,
        }
    }

    /// Declare a quantum register of `size` fresh qubits.
    pub fn declare_qreg(
        &mut self,
        name: &str,
        size: usize,
    ) -> Result<&QuantumRegister, SymbolError> {
        if self.qregs.contains_key(name) || (!self.shares_names() && self.cregs.contains_key(name))
        {
            return Err(SymbolError::AlreadyBound(name.to_string()));
        }
        let (qubits, num_qubits) = allocate(self.num_qubits, size, Qubit::new)?;
        self.num_qubits = num_qubits;
        let qreg = self
            .qregs
            .entry(name.to_string())
            .or_insert(QuantumRegister::new(name, qubits));
        Ok(&*qreg)
    }

    /// Declare a classical register of `size` fresh bits.
    pub fn declare_creg(
        &mut self,
        name: &str,
        size: usize,
    ) -> Result<&ClassicalRegister, SymbolError> {
        if self.cregs.contains_key(name) || (!self.shares_names() && self.qregs.contains_key(name))
        {
            return Err(SymbolError::AlreadyBound(name.to_string()));
        }
        let (cbits, num_cbits) = allocate(self.num_cbits, size, Cbit::new)?;
        self.num_cbits = num_cbits;
        let creg = self
            .cregs
            .entry(name.to_string())
            .or_insert(ClassicalRegister::new(name, cbits));
        Ok(&*creg)
    }

    fn shares_names(&self) -> bool {
        self.shared_register_names.into()
    }

    /// Resolve `reference`, looking first for a quantum register, then for a classical one.
    pub fn resolve(&self, reference: &Reference) -> OperandResult {
        if self.qregs.contains_key(reference.name()) {
            self.resolve_quantum(reference)
        } else {
            self.resolve_classical(reference)
        }
    }

    /// Resolve `reference` against the quantum registers only.
    pub fn resolve_quantum(&self, reference: &Reference) -> OperandResult {
        let qreg = self
            .qregs
            .get(reference.name())
            .ok_or_else(|| SymbolError::MissingBinding(reference.name().to_string()))?;
        match reference.index() {
            None => Ok(Operand::QuantumRegister(qreg.clone())),
            Some(index) => index_into(reference.name(), qreg.qubits(), index).map(Operand::Qubit),
        }
    }

    /// Resolve `reference` against the classical registers only.
    pub fn resolve_classical(&self, reference: &Reference) -> OperandResult {
        let creg = self
            .cregs
            .get(reference.name())
            .ok_or_else(|| SymbolError::MissingBinding(reference.name().to_string()))?;
        match reference.index() {
            None => Ok(Operand::ClassicalRegister(creg.clone())),
            Some(index) => index_into(reference.name(), creg.cbits(), index).map(Operand::Cbit),
        }
    }

    pub fn qreg(&self, name: &str) -> Option<&QuantumRegister> {
        self.qregs.get(name)
    }

    pub fn creg(&self, name: &str) -> Option<&ClassicalRegister> {
        self.cregs.get(name)
    }

    pub fn qregs(&self) -> &IndexMap<String, QuantumRegister> {
        &self.qregs
    }

    pub fn cregs(&self) -> &IndexMap<String, ClassicalRegister> {
        &self.cregs
    }

    /// Consume the table, returning the quantum and classical registers in declaration order.
    pub fn into_registers(
        self,
    ) -> (
        IndexMap<String, QuantumRegister>,
        IndexMap<String, ClassicalRegister>,
    ) {
        (self.qregs, self.cregs)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new(SharedRegisterNames::False)
    }
}

fn index_into<T: Copy>(name: &str, items: &[T], index: &BigUint) -> Result<T, SymbolError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i).copied())
        .ok_or_else(|| SymbolError::IndexOutOfRange {
            name: name.to_string(),
            index: index.clone(),
            size: items.len(),
        })
}

// Fresh ids `first..first + size` and the new count. An error if the count overflows
// or the ids cannot be stored.
fn allocate<T>(
    first: usize,
    size: usize,
    new: impl Fn(usize) -> T,
) -> Result<(Vec<T>, usize), SymbolError> {
    let end = first
        .checked_add(size)
        .ok_or(SymbolError::TooManyBits(size))?;
    let mut ids = Vec::new();
    ids.try_reserve_exact(size)
        .map_err(|_| SymbolError::TooManyBits(size))?;
    ids.extend((first..end).map(new));
    Ok((ids, end))
}
