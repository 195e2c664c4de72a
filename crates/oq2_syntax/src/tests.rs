// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write;

use expect_test::{expect, Expect};

use crate::ast::{self, AstNode, BinaryOp};
use crate::{LexedStr, SourceFile, SyntaxKind, TextRange, TextSize};

fn only_stmt(code: &str) -> ast::Stmt {
    let mut stmts = match SourceFile::parse(code).ok() {
        Ok(file) => file.stmts,
        Err(errors) => panic!("{errors:?}"),
    };
    assert_eq!(stmts.len(), 1);
    stmts.remove(0)
}

/// The parameters of `U(params) q;`, one per line.
fn check_params(params: &str, expect: Expect) {
    let ugate = match only_stmt(&format!("U({params}) q;")) {
        ast::Stmt::UGate(ugate) => ugate,
        stmt => panic!("expected U gate, found {stmt:?}"),
    };
    let actual = ugate.params.iter().fold(String::new(), |mut output, expr| {
        let _ = writeln!(output, "{}", sexp(expr));
        output
    });
    expect.assert_eq(&actual)
}

/// The syntax errors in `code`, one per line with their ranges.
fn check_errors(code: &str, expect: Expect) {
    let parse = SourceFile::parse(code);
    let actual = parse.errors().iter().fold(String::new(), |mut output, err| {
        let (start, end) = (u32::from(err.range().start()), u32::from(err.range().end()));
        let _ = writeln!(output, "{start}..{end} {}", err.message());
        output
    });
    expect.assert_eq(&actual)
}

/// Render an expression fully parenthesized.
fn sexp(expr: &ast::Expr) -> String {
    match expr {
        ast::Expr::IntNumber(it) => it.text().to_string(),
        ast::Expr::FloatNumber(it) => it.text().to_string(),
        ast::Expr::Pi(_) => "pi".to_string(),
        ast::Expr::Identifier(it) => it.string(),
        ast::Expr::Neg(it) => format!("(-{})", sexp(&it.expr)),
        ast::Expr::BinExpr(it) => {
            let op = match it.op {
                BinaryOp::Add => "+",
                BinaryOp::Sub => "-",
                BinaryOp::Mul => "*",
                BinaryOp::Div => "/",
                BinaryOp::Pow => "^",
            };
            format!("({} {op} {})", sexp(&it.lhs), sexp(&it.rhs))
        }
        ast::Expr::MathFun(it) => format!("{}({})", it.name.text(), sexp(&it.arg)),
    }
}

#[test]
fn parse_version_test() {
    let code = r##"
OPENQASM 2.0;
qreg q[1];
"##;
    let parse = SourceFile::parse(code);
    assert!(parse.errors().is_empty());
    let file = parse.tree();
    assert_eq!(file.version().map(|v| v.number.as_str()), Some("2.0"));
    assert_eq!(file.statements().count(), 1);
}

#[test]
fn parse_no_version_test() {
    let parse = SourceFile::parse("qreg q[1];");
    assert!(parse.errors().is_empty());
    assert!(parse.tree().version().is_none());
}

#[test]
fn parse_late_version_test() {
    let code = r##"
qreg q[1];
OPENQASM 2.0;
"##;
    check_errors(
        code,
        expect![[r#"
            12..20 the version declaration must be the first statement
        "#]],
    );
}

#[test]
fn parse_register_decls_test() {
    let code = r##"
qreg q[2];
creg c[3];
"##;
    let parse = SourceFile::parse(code);
    assert!(parse.errors().is_empty());
    let stmts = &parse.tree().stmts;
    match (&stmts[0], &stmts[1]) {
        (ast::Stmt::QRegDecl(q), ast::Stmt::CRegDecl(c)) => {
            assert_eq!(q.name.text(), "q");
            assert_eq!(q.size.text(), "2");
            assert_eq!(c.name.text(), "c");
            assert_eq!(c.size.text(), "3");
        }
        _ => panic!("expected qreg and creg declarations"),
    }
}

#[test]
fn parse_include_test() {
    match only_stmt(r#"include "qelib1.inc";"#) {
        ast::Stmt::Include(include) => assert_eq!(include.file.text(), "qelib1.inc"),
        stmt => panic!("expected include, found {stmt:?}"),
    }
}

#[test]
fn parse_measure_test() {
    match only_stmt("measure q[0] -> c[1];") {
        ast::Stmt::Measure(measure) => {
            assert_eq!(measure.qubits.name.text(), "q");
            assert_eq!(measure.qubits.index.as_ref().map(|i| i.text()), Some("0"));
            assert_eq!(measure.cbits.name.text(), "c");
            assert_eq!(measure.cbits.index.as_ref().map(|i| i.text()), Some("1"));
        }
        stmt => panic!("expected measure, found {stmt:?}"),
    }
}

#[test]
fn parse_measure_err_test() {
    check_errors(
        "measure q;",
        expect![[r#"
            9..10 expected '->', found ';'
        "#]],
    );
}

#[test]
fn parse_barrier_test() {
    match only_stmt("barrier q, r[1];") {
        ast::Stmt::Barrier(barrier) => assert_eq!(barrier.args.len(), 2),
        stmt => panic!("expected barrier, found {stmt:?}"),
    }
}

#[test]
fn parse_empty_barrier_test() {
    let parse = SourceFile::parse("barrier;");
    assert_eq!(parse.errors().len(), 1);
}

#[test]
fn parse_gate_def_test() {
    let code = r##"
gate g(theta, phi) a, b {
    U(theta, phi, 0) a;
    CX a, b;
    h b;
    barrier a, b;
}
"##;
    match only_stmt(code) {
        ast::Stmt::GateDef(gate) => {
            assert_eq!(gate.name.text(), "g");
            let params: Vec<_> = gate.params.iter().map(|p| p.text()).collect();
            assert_eq!(params, ["theta", "phi"]);
            let qubits: Vec<_> = gate.qubits.iter().map(|q| q.text()).collect();
            assert_eq!(qubits, ["a", "b"]);
            assert!(matches!(gate.body[0], ast::GateOp::UGate(_)));
            assert!(matches!(gate.body[1], ast::GateOp::CXGate(_)));
            assert!(matches!(gate.body[2], ast::GateOp::GCall(_)));
            assert!(matches!(gate.body[3], ast::GateOp::Barrier(_)));
        }
        stmt => panic!("expected gate definition, found {stmt:?}"),
    }
}

#[test]
fn parse_gate_def_empty_params_test() {
    match only_stmt("gate g() a { }") {
        ast::Stmt::GateDef(gate) => {
            assert!(gate.params.is_empty());
            assert!(gate.body.is_empty());
        }
        stmt => panic!("expected gate definition, found {stmt:?}"),
    }
}

#[test]
fn parse_gate_body_errors_test() {
    let code = r##"
gate g a {
    measure a -> c;
    CX a a;
    U(0, 0, 0) a;
}
qreg q[1];
"##;
    check_errors(
        code,
        expect![[r#"
            16..23 expected a gate operation, found 'measure'
            41..42 expected ',', found an identifier
        "#]],
    );
    let parse = SourceFile::parse(code);
    let file = parse.tree();
    assert_eq!(file.stmts.len(), 2);
    match &file.stmts[0] {
        ast::Stmt::GateDef(gate) => assert_eq!(gate.body.len(), 1),
        stmt => panic!("expected gate definition, found {stmt:?}"),
    }
}

#[test]
fn parse_gate_indexed_operand_err_test() {
    let parse = SourceFile::parse("gate g a { CX a[0], a; }");
    assert_eq!(parse.errors().len(), 1);
}

#[test]
fn parse_opaque_test() {
    match only_stmt("opaque magic(x) a, b;") {
        ast::Stmt::Opaque(opaque) => {
            assert_eq!(opaque.name.text(), "magic");
            assert_eq!(opaque.params.len(), 1);
            assert_eq!(opaque.qubits.len(), 2);
        }
        stmt => panic!("expected opaque, found {stmt:?}"),
    }
}

#[test]
fn parse_gate_call_test() {
    match only_stmt("crz(pi/2) q[0], r;") {
        ast::Stmt::QCall(call) => {
            assert_eq!(call.name.text(), "crz");
            assert_eq!(call.params.len(), 1);
            assert_eq!(call.args.len(), 2);
            assert!(call.args[0].index.is_some());
            assert!(call.args[1].index.is_none());
        }
        stmt => panic!("expected gate call, found {stmt:?}"),
    }
}

#[test]
fn parse_u_param_count_test() {
    check_errors(
        "U(0, 0) q;",
        expect![[r#"
            1..7 U takes 3 parameters, found 2
        "#]],
    );
}

#[test]
fn parse_if_test() {
    match only_stmt("if (c == 3) x q[0];") {
        ast::Stmt::If(if_stmt) => {
            assert_eq!(if_stmt.register.name.text(), "c");
            assert_eq!(if_stmt.value.text(), "3");
            assert!(matches!(*if_stmt.qop, ast::QOp::QCall(_)));
        }
        stmt => panic!("expected if statement, found {stmt:?}"),
    }
}

#[test]
fn parse_if_barrier_err_test() {
    check_errors(
        "if (c == 1) barrier q;",
        expect![[r#"
            12..19 expected a quantum operation, found 'barrier'
        "#]],
    );
}

#[test]
fn parse_recovery_test() {
    let code = r##"
qreg q[;
creg c[1];
CX q[0] q[1];
reset q[0];
"##;
    check_errors(
        code,
        expect![[r#"
            8..9 expected an integer, found ';'
            29..30 expected ',', found an identifier
        "#]],
    );
    let parse = SourceFile::parse(code);
    let file = parse.tree();
    assert_eq!(file.stmts.len(), 2);
    assert!(matches!(file.stmts[0], ast::Stmt::CRegDecl(_)));
    assert!(matches!(file.stmts[1], ast::Stmt::Reset(_)));
}

#[test]
fn parse_lex_error_test() {
    check_errors(
        "qreg q[1];\n/* unterminated",
        expect![[r#"
            11..26 Missing trailing `*/` symbols to terminate the block comment
        "#]],
    );
}

#[test]
fn parse_comments_test() {
    let code = r##"
// line comment
qreg /* inline */ q[1];
"##;
    let parse = SourceFile::parse(code);
    assert!(parse.errors().is_empty());
    assert_eq!(parse.tree().stmts.len(), 1);
}

#[test]
fn expr_precedence_test() {
    check_params(
        "1 + 2 * 3, 1 - 2 - 3, 8 / 4 / 2",
        expect![[r#"
            (1 + (2 * 3))
            ((1 - 2) - 3)
            ((8 / 4) / 2)
        "#]],
    );
    check_params(
        "2 ^ 3 ^ 2, -2 ^ 2, (-2) ^ 2",
        expect![[r#"
            (2 ^ (3 ^ 2))
            (-(2 ^ 2))
            ((-2) ^ 2)
        "#]],
    );
    check_params(
        "-a * b, (1 + 2) * 3, +pi",
        expect![[r#"
            ((-a) * b)
            ((1 + 2) * 3)
            pi
        "#]],
    );
}

#[test]
fn expr_math_fun_test() {
    // Unknown names parse. They are rejected during semantic analysis.
    check_params(
        "sin(pi / 2), foo(1), 2 ^ -cos(x)",
        expect![[r#"
            sin((pi / 2))
            foo(1)
            (2 ^ (-cos(x)))
        "#]],
    );
}

#[test]
fn expr_real_literal_test() {
    check_params(
        "0.1, 1.5e-3, .5",
        expect![[r#"
            0.1
            1.5e-3
            .5
        "#]],
    );
}

#[test]
fn expr_missing_operand_test() {
    check_errors(
        "U(1 +, 0, 0) q;",
        expect![[r#"
            5..6 expected an operand, found ','
        "#]],
    );
}

#[test]
fn expr_depth_limit_test() {
    let depth = 1000;
    let code = format!("U({}0{}, 0, 0) q;", "(".repeat(depth), ")".repeat(depth));
    let parse = SourceFile::parse(&code);
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[0].message(), "expression is nested too deeply");
}

#[test]
fn text_range_test() {
    let code = "qreg q[2];\nCX q[0], q[1];";
    let parse = SourceFile::parse(code);
    let stmts = &parse.tree().stmts;
    assert_eq!(
        stmts[0].text_range(),
        TextRange::new(TextSize::from(0), TextSize::from(10))
    );
    let cx_range = stmts[1].text_range();
    assert_eq!(&code[cx_range], "CX q[0], q[1];");
}

#[test]
fn lexed_str_keywords_test() {
    let lexed = LexedStr::new("gate U pi sin");
    let kinds: Vec<_> = (0..lexed.len())
        .map(|i| lexed.kind(i))
        .filter(|k| !k.is_trivia())
        .collect();
    assert_eq!(
        kinds,
        [
            SyntaxKind::GATE_KW,
            SyntaxKind::U_KW,
            SyntaxKind::PI_KW,
            SyntaxKind::IDENT
        ]
    );
}

#[test]
fn make_test() {
    let file = ast::make::source_file(
        Some(ast::make::version("2.0")),
        vec![
            ast::make::qreg_decl("q", 1),
            ast::Stmt::Reset(ast::make::reset(ast::make::indexed_argument("q", 0))),
        ],
    );
    assert_eq!(file.stmts.len(), 2);
    assert_eq!(file.text_range(), TextRange::empty(TextSize::from(0)));
}
