// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

//! Free-standing functions for creating syntax tree fragments out of smaller pieces.
//!
//! These are stupid constructors, they just assemble a node from its immediate
//! children. No validation is done. Every node gets an empty range at offset zero.
//! They are used to build programs without source text.

use crate::ast::{self, BinaryOp};
use crate::{TextRange, TextSize};

fn no_range() -> TextRange {
    TextRange::empty(TextSize::from(0))
}

pub fn ident(text: &str) -> ast::Ident {
    ast::Ident {
        text: text.into(),
        range: no_range(),
    }
}

pub fn int_number<T: ToString>(value: T) -> ast::IntNumber {
    ast::IntNumber {
        text: value.to_string().into(),
        range: no_range(),
    }
}

pub fn source_file(version: Option<ast::Version>, stmts: Vec<ast::Stmt>) -> ast::SourceFile {
    ast::SourceFile {
        version,
        stmts,
        range: no_range(),
    }
}

pub fn version(number: &str) -> ast::Version {
    ast::Version {
        number: number.into(),
        range: no_range(),
    }
}

pub fn qreg_decl(name: &str, size: usize) -> ast::Stmt {
    ast::Stmt::QRegDecl(reg_decl(name, size))
}

pub fn creg_decl(name: &str, size: usize) -> ast::Stmt {
    ast::Stmt::CRegDecl(reg_decl(name, size))
}

fn reg_decl(name: &str, size: usize) -> ast::RegDecl {
    ast::RegDecl {
        name: ident(name),
        size: int_number(size),
        range: no_range(),
    }
}

pub fn include(file: &str) -> ast::Stmt {
    ast::Stmt::Include(ast::Include {
        file: ast::FilePath {
            text: file.into(),
            range: no_range(),
        },
        range: no_range(),
    })
}

pub fn gate_def(name: &str, params: &[&str], qubits: &[&str], body: Vec<ast::GateOp>) -> ast::Stmt {
    ast::Stmt::GateDef(ast::GateDef {
        name: ident(name),
        params: idents(params),
        qubits: idents(qubits),
        body,
        range: no_range(),
    })
}

pub fn opaque(name: &str, params: &[&str], qubits: &[&str]) -> ast::Stmt {
    ast::Stmt::Opaque(ast::Opaque {
        name: ident(name),
        params: idents(params),
        qubits: idents(qubits),
        range: no_range(),
    })
}

fn idents(names: &[&str]) -> Vec<ast::Ident> {
    names.iter().map(|name| ident(name)).collect()
}

/// `q`
pub fn argument(name: &str) -> ast::Argument {
    ast::Argument {
        name: ident(name),
        index: None,
        range: no_range(),
    }
}

/// `q[index]`
pub fn indexed_argument(name: &str, index: usize) -> ast::Argument {
    ast::Argument {
        name: ident(name),
        index: Some(int_number(index)),
        range: no_range(),
    }
}

pub fn call<A>(name: &str, params: Vec<ast::Expr>, args: Vec<A>) -> ast::Call<A> {
    ast::Call {
        name: ident(name),
        params,
        args,
        range: no_range(),
    }
}

pub fn ugate<A>(theta: ast::Expr, phi: ast::Expr, lambda: ast::Expr, arg: A) -> ast::UGate<A> {
    ast::UGate {
        params: vec![theta, phi, lambda],
        arg,
        range: no_range(),
    }
}

pub fn cxgate<A>(control: A, target: A) -> ast::CXGate<A> {
    ast::CXGate {
        control,
        target,
        range: no_range(),
    }
}

pub fn barrier<A>(args: Vec<A>) -> ast::Barrier<A> {
    ast::Barrier {
        args,
        range: no_range(),
    }
}

pub fn measure(qubits: ast::Argument, cbits: ast::Argument) -> ast::Measure {
    ast::Measure {
        qubits,
        cbits,
        range: no_range(),
    }
}

pub fn reset(arg: ast::Argument) -> ast::Reset {
    ast::Reset {
        arg,
        range: no_range(),
    }
}

pub fn if_stmt(register: ast::Argument, value: usize, qop: ast::QOp) -> ast::Stmt {
    ast::Stmt::If(ast::IfStmt {
        register,
        value: int_number(value),
        qop: Box::new(qop),
        range: no_range(),
    })
}

pub fn expr_int<T: ToString>(value: T) -> ast::Expr {
    ast::Expr::IntNumber(int_number(value))
}

/// `text` is used as written, for example "0.1".
pub fn expr_float(text: &str) -> ast::Expr {
    ast::Expr::FloatNumber(ast::FloatNumber {
        text: text.into(),
        range: no_range(),
    })
}

pub fn expr_pi() -> ast::Expr {
    ast::Expr::Pi(ast::Pi { range: no_range() })
}

pub fn expr_ident(name: &str) -> ast::Expr {
    ast::Expr::Identifier(ident(name))
}

pub fn expr_neg(expr: ast::Expr) -> ast::Expr {
    ast::Expr::Neg(Box::new(ast::NegExpr {
        expr,
        range: no_range(),
    }))
}

pub fn expr_bin(op: BinaryOp, lhs: ast::Expr, rhs: ast::Expr) -> ast::Expr {
    ast::Expr::BinExpr(Box::new(ast::BinExpr {
        op,
        lhs,
        rhs,
        range: no_range(),
    }))
}

pub fn expr_math_fun(name: &str, arg: ast::Expr) -> ast::Expr {
    ast::Expr::MathFun(Box::new(ast::MathFun {
        name: ident(name),
        arg,
        range: no_range(),
    }))
}
