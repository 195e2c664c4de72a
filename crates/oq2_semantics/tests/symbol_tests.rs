// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use num_bigint::BigUint;

use oq2_semantics::asg::{Operand, Reference};
use oq2_semantics::context::SharedRegisterNames;
use oq2_semantics::symbols::{Scope, SymbolError, SymbolTable};

fn reference(name: &str, index: Option<u32>) -> Reference {
    Reference::new(name, index.map(BigUint::from))
}

#[test]
fn test_declare_allocates_fresh_qubits() {
    let mut table = SymbolTable::new(SharedRegisterNames::False);
    let a = table.declare_qreg("a", 2).unwrap().clone();
    let b = table.declare_qreg("b", 3).unwrap().clone();
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 3);
    assert!(a.qubits().iter().all(|qubit| !b.qubits().contains(qubit)));
}

#[test]
fn test_declare_empty_register() {
    let mut table = SymbolTable::default();
    assert!(table.declare_creg("c", 0).unwrap().is_empty());
    assert_eq!(
        table.resolve(&reference("c", Some(0))),
        Err(SymbolError::IndexOutOfRange {
            name: "c".to_string(),
            index: BigUint::from(0u32),
            size: 0,
        })
    );
}

#[test]
fn test_resolve_is_stable() {
    let mut table = SymbolTable::default();
    table.declare_qreg("q", 2).unwrap();
    let first = table.resolve(&reference("q", Some(1))).unwrap();
    let second = table.resolve(&reference("q", Some(1))).unwrap();
    let other = table.resolve(&reference("q", Some(0))).unwrap();
    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[test]
fn test_resolve_whole_register() {
    let mut table = SymbolTable::default();
    let qreg = table.declare_qreg("q", 2).unwrap().clone();
    assert_eq!(
        table.resolve(&reference("q", None)),
        Ok(Operand::QuantumRegister(qreg))
    );
}

#[test]
fn test_resolve_falls_back_to_classical() {
    let mut table = SymbolTable::default();
    let creg = table.declare_creg("c", 1).unwrap().clone();
    assert_eq!(
        table.resolve(&reference("c", Some(0))),
        Ok(Operand::Cbit(creg.cbits()[0]))
    );
}

#[test]
fn test_resolve_missing() {
    let table = SymbolTable::default();
    assert_eq!(
        table.resolve(&reference("q", None)),
        Err(SymbolError::MissingBinding("q".to_string()))
    );
}

#[test]
fn test_shared_names() {
    let mut rejecting = SymbolTable::new(SharedRegisterNames::False);
    rejecting.declare_creg("r", 1).unwrap();
    assert_eq!(
        rejecting.declare_qreg("r", 1).map(|qreg| qreg.len()),
        Err(SymbolError::AlreadyBound("r".to_string()))
    );

    let mut sharing = SymbolTable::new(SharedRegisterNames::True);
    sharing.declare_creg("r", 1).unwrap();
    sharing.declare_qreg("r", 2).unwrap();
    assert!(sharing.resolve(&reference("r", None)).unwrap().is_quantum());
    assert!(sharing
        .resolve_classical(&reference("r", None))
        .unwrap()
        .is_classical());
    let (qregs, cregs) = sharing.into_registers();
    assert_eq!(qregs["r"].len(), 2);
    assert_eq!(cregs["r"].len(), 1);
}

#[test]
fn test_scope() {
    let params = vec!["theta".to_string()];
    let qubits = vec!["a".to_string(), "b".to_string()];
    let scope = Scope::GateBody {
        params: &params,
        qubits: &qubits,
    };
    assert!(scope.has_param("theta"));
    assert!(!scope.has_param("a"));
    assert_eq!(scope.qubit_position("b"), Some(1));
    assert_eq!(scope.qubit_position("theta"), None);
    assert!(!Scope::Global.has_param("theta"));
    assert_eq!(Scope::Global.qubit_position("a"), None);
}

#[test]
fn test_oversized_register_is_not_declared() {
    let mut table = SymbolTable::default();
    assert_eq!(
        table.declare_qreg("big", usize::MAX).map(|qreg| qreg.len()),
        Err(SymbolError::TooManyBits(usize::MAX))
    );
    assert!(table.qreg("big").is_none());
    let qreg = table.declare_qreg("q", 2).unwrap();
    assert_eq!(
        qreg.qubits().iter().copied().map(usize::from).collect::<Vec<_>>(),
        vec![0, 1]
    );
}
