// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

// Checks on a finished `Program` that the builder does not make.
// Callers decide whether a finding is an error.

use hashbrown::HashSet;

use crate::asg::{Call, Measure, Program, QOp, Stmt};

/// Names of the operations that need no definition.
pub const BUILTIN_OPS: [&str; 4] = ["U", "CX", "reset", "barrier"];

// Everything below walks the top-level operations of a program in source order,
// including those guarded by `if`, and applies a function to each one.
enum Visit<'a> {
    Definition(&'a str),
    Call(&'a Call),
    Measure(&'a Measure),
}

trait WalkOps<'a> {
    fn walk_ops<F: FnMut(Visit<'a>)>(&'a self, func: &mut F);
}

impl<'a> WalkOps<'a> for Program {
    fn walk_ops<F: FnMut(Visit<'a>)>(&'a self, func: &mut F) {
        for stmt in self.stmts() {
            stmt.walk_ops(func);
        }
    }
}

impl<'a> WalkOps<'a> for Stmt {
    fn walk_ops<F: FnMut(Visit<'a>)>(&'a self, func: &mut F) {
        match self {
            Stmt::GateDefinition(gate_def) => func(Visit::Definition(gate_def.name())),
            Stmt::OpaqueDefinition(opaque) => func(Visit::Definition(opaque.name())),
            Stmt::Call(call) => func(Visit::Call(call)),
            Stmt::Measure(measure) => func(Visit::Measure(measure)),
            Stmt::If(if_stmt) => if_stmt.qop().walk_ops(func),
            Stmt::QRegDecl(_) | Stmt::CRegDecl(_) | Stmt::Include(_) => (),
        }
    }
}

impl<'a> WalkOps<'a> for QOp {
    fn walk_ops<F: FnMut(Visit<'a>)>(&'a self, func: &mut F) {
        match self {
            QOp::Call(call) => func(Visit::Call(call)),
            QOp::Measure(measure) => func(Visit::Measure(measure)),
        }
    }
}

/// Measurements of a whole quantum register into a whole classical register of a different size.
pub fn measure_width_mismatches(program: &Program) -> Vec<&Measure> {
    let mut mismatches = Vec::new();
    program.walk_ops(&mut |visit| {
        if let Visit::Measure(measure) = visit {
            let (qubits, cbits) = (measure.qubits(), measure.cbits());
            if qubits.is_register() && cbits.is_register() && qubits.width() != cbits.width() {
                mismatches.push(measure);
            }
        }
    });
    mismatches
}

/// Names of calls that are not built in and are not defined by an earlier `gate` or `opaque`.
/// Files named in `include` are not read, so gates they define are reported too.
pub fn undefined_gate_calls(program: &Program) -> Vec<&str> {
    let mut defined: HashSet<&str> = BUILTIN_OPS.into_iter().collect();
    let mut undefined = Vec::new();
    program.walk_ops(&mut |visit| match visit {
        Visit::Definition(name) => {
            defined.insert(name);
        }
        Visit::Call(call) => {
            if !defined.contains(call.name()) {
                undefined.push(call.name());
            }
        }
        Visit::Measure(_) => (),
    });
    undefined
}
