// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use num_bigint::BigUint;

use oq2_semantics::asg;
use oq2_semantics::context::BuildOptions;
use oq2_semantics::semantic_error::SemanticErrorKind;
use oq2_semantics::syntax_to_semantics::parse_source_string;

fn parse_string(code: &str) -> asg::Program {
    parse_source_string(code, None, &BuildOptions::default())
        .into_result()
        .unwrap()
}

fn semantic_error_kind(code: &str) -> SemanticErrorKind {
    let result = parse_source_string(code, None, &BuildOptions::default());
    assert!(!result.any_syntax_errors());
    result.semantic_error().unwrap().kind().clone()
}

fn gate_at(program: &asg::Program, i: usize) -> &asg::GateDefinition {
    match &program[i] {
        asg::Stmt::GateDefinition(gate_def) => gate_def,
        stmt => panic!("expected a gate definition, found {stmt:?}"),
    }
}

fn call_at(program: &asg::Program, i: usize) -> &asg::Call {
    match &program[i] {
        asg::Stmt::Call(call) => call,
        stmt => panic!("expected a call, found {stmt:?}"),
    }
}

fn int(value: u32) -> asg::Exp {
    asg::Exp::Int(BigUint::from(value))
}

#[test]
fn test_gate_body_uses_placeholders() {
    let code = r##"
OPENQASM 2.0;
qreg q[1];
gate g a { U(pi/2, 0, 0) a; }
g q[0];
"##;
    let program = parse_string(code);
    let gate_def = gate_at(&program, 1);
    assert_eq!(gate_def.name(), "g");
    assert!(gate_def.params().is_empty());
    assert_eq!(gate_def.qubits(), &["a".to_string()]);

    let body = gate_def.body();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].name(), "U");
    assert_eq!(body[0].args(), &[asg::Placeholder::new("a", 0)]);
    let half_pi = asg::BinaryExp::new(asg::ArithOp::Div, asg::Exp::Pi, int(2)).to_exp();
    assert_eq!(body[0].params(), &[half_pi, int(0), int(0)]);

    let call = call_at(&program, 2);
    let q0 = asg::Operand::Qubit(program.qregs()["q"].get(0).unwrap());
    assert_eq!(call.name(), "g");
    assert_eq!(call.args(), &[q0.clone()]);

    let bindings = gate_def.qubit_bindings(call).unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings["a"], &q0);
}

#[test]
fn test_gate_placeholder_positions() {
    let code = r##"
OPENQASM 2.0;
gate swap a, b {
  CX a, b;
  CX b, a;
  CX a, b;
}
"##;
    let program = parse_string(code);
    let gate_def = gate_at(&program, 0);
    let body = gate_def.body();
    assert_eq!(body.len(), 3);
    assert_eq!(body[1].name(), "CX");
    assert_eq!(
        body[1].args(),
        &[asg::Placeholder::new("b", 1), asg::Placeholder::new("a", 0)]
    );
    assert_eq!(body[1].args()[0].position(), 1);
    assert_eq!(body[1].args()[0].name(), "b");
}

#[test]
fn test_gate_body_barrier_and_call() {
    let code = r##"
OPENQASM 2.0;
gate inner a { U(0, 0, 0) a; }
gate outer a, b {
  barrier a, b;
  inner b;
}
"##;
    let program = parse_string(code);
    let body = gate_at(&program, 1).body();
    assert_eq!(body[0].name(), "barrier");
    assert_eq!(body[0].args().len(), 2);
    assert_eq!(body[1].name(), "inner");
    assert_eq!(body[1].args(), &[asg::Placeholder::new("b", 1)]);
}

#[test]
fn test_gate_empty_body() {
    let code = r##"
OPENQASM 2.0;
gate id a { }
"##;
    let program = parse_string(code);
    assert!(gate_at(&program, 0).body().is_empty());
}

#[test]
fn test_gate_formal_names_not_registers() {
    let code = r##"
OPENQASM 2.0;
gate g a { U(0, 0, 0) a; }
qreg q[1];
"##;
    let program = parse_string(code);
    let names: Vec<&str> = program.qregs().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["q"]);
    assert!(program.cregs().is_empty());
}

#[test]
fn test_gate_formal_name_not_visible_globally() {
    let code = r##"
OPENQASM 2.0;
gate g a { U(0, 0, 0) a; }
qreg q[1];
U(0, 0, 0) a;
"##;
    assert_eq!(
        semantic_error_kind(code),
        SemanticErrorKind::UndeclaredRegisterError("a".to_string())
    );
}

#[test]
fn test_gate_register_not_visible_in_body() {
    let code = r##"
OPENQASM 2.0;
qreg q[1];
gate g a { CX a, q; }
"##;
    assert_eq!(
        semantic_error_kind(code),
        SemanticErrorKind::UndefinedGateArgumentError("q".to_string())
    );
}

#[test]
fn test_gate_duplicate_param() {
    let code = r##"
OPENQASM 2.0;
gate g(t, t) a { }
"##;
    assert_eq!(
        semantic_error_kind(code),
        SemanticErrorKind::DuplicateDeclarationError("t".to_string())
    );
}

#[test]
fn test_gate_param_and_qubit_same_name() {
    let code = r##"
OPENQASM 2.0;
gate g(a) a { }
"##;
    assert_eq!(
        semantic_error_kind(code),
        SemanticErrorKind::DuplicateDeclarationError("a".to_string())
    );
}

#[test]
fn test_gate_param_reference() {
    let code = r##"
OPENQASM 2.0;
gate rz(theta) a { U(0, 0, theta) a; }
"##;
    let program = parse_string(code);
    let gate_def = gate_at(&program, 0);
    assert_eq!(gate_def.params(), &["theta".to_string()]);
    assert_eq!(
        gate_def.body()[0].params()[2],
        asg::Exp::Param("theta".to_string())
    );
}

#[test]
fn test_gate_undefined_param() {
    let code = r##"
OPENQASM 2.0;
gate rz(theta) a { U(0, 0, phi) a; }
"##;
    assert_eq!(
        semantic_error_kind(code),
        SemanticErrorKind::UndefinedParameterError("phi".to_string())
    );
}

#[test]
fn test_identifier_at_top_level() {
    let code = r##"
OPENQASM 2.0;
qreg q[1];
U(0, 0, theta) q[0];
"##;
    assert_eq!(
        semantic_error_kind(code),
        SemanticErrorKind::UndefinedParameterError("theta".to_string())
    );
}

#[test]
fn test_gate_param_bindings() {
    let code = r##"
OPENQASM 2.0;
gate rz(theta) a { U(0, 0, theta) a; }
gate other a { }
qreg q[1];
rz(pi/4) q[0];
other q[0];
"##;
    let program = parse_string(code);
    let rz = gate_at(&program, 0);
    let rz_call = call_at(&program, 3);
    let bindings = rz.param_bindings(rz_call).unwrap();
    let quarter_pi = asg::BinaryExp::new(asg::ArithOp::Div, asg::Exp::Pi, int(4)).to_exp();
    assert_eq!(bindings["theta"], &quarter_pi);

    let other_call = call_at(&program, 4);
    assert!(rz.param_bindings(other_call).is_none());
    assert!(rz.qubit_bindings(other_call).is_none());
}

#[test]
fn test_gate_bindings_arity_mismatch() {
    let code = r##"
OPENQASM 2.0;
gate cx2 a, b { CX a, b; }
qreg q[3];
cx2 q[0], q[1], q[2];
"##;
    let program = parse_string(code);
    let gate_def = gate_at(&program, 0);
    assert!(gate_def.qubit_bindings(call_at(&program, 2)).is_none());
}

#[test]
fn test_opaque() {
    let code = r##"
OPENQASM 2.0;
opaque magic(x) a, b;
qreg q[2];
magic(0.5) q[0], q[1];
"##;
    let program = parse_string(code);
    match &program[0] {
        asg::Stmt::OpaqueDefinition(opaque) => {
            assert_eq!(opaque.name(), "magic");
            assert_eq!(opaque.params(), &["x".to_string()]);
            assert_eq!(opaque.qubits(), &["a".to_string(), "b".to_string()]);
        }
        stmt => panic!("expected opaque, found {stmt:?}"),
    }
    assert_eq!(call_at(&program, 2).name(), "magic");
}

#[test]
fn test_opaque_duplicate_qubit() {
    let code = r##"
OPENQASM 2.0;
opaque magic a, a;
"##;
    assert_eq!(
        semantic_error_kind(code),
        SemanticErrorKind::DuplicateDeclarationError("a".to_string())
    );
}
