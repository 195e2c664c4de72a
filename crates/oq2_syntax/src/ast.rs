// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

//! The tagged syntax tree produced by the parser.
//!
//! Nodes are plain data. Every node records the range of source text it was
//! parsed from. Nodes built with the constructors in [`make`] carry an empty range.

pub mod make;

use crate::{SmolStr, TextRange};

/// The interface shared by all nodes of the tree.
pub trait AstNode {
    fn text_range(&self) -> TextRange;
}

macro_rules! impl_ast_node {
    ($($node:ident $(<$param:ident>)?),* $(,)?) => {
        $(
            impl $(<$param>)? AstNode for $node $(<$param>)? {
                fn text_range(&self) -> TextRange {
                    self.range
                }
            }
        )*
    };
}

impl_ast_node!(
    Ident,
    IntNumber,
    FloatNumber,
    FilePath,
    Pi,
    SourceFile,
    Version,
    RegDecl,
    Include,
    GateDef,
    Opaque,
    Call<A>,
    UGate<A>,
    CXGate<A>,
    Barrier<A>,
    Reset,
    Measure,
    IfStmt,
    Argument,
    NegExpr,
    BinExpr,
    MathFun,
);

//
// Tokens
//

/// An identifier. Keywords are never identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ident {
    pub text: SmolStr,
    pub range: TextRange,
}

impl Ident {
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    pub fn string(&self) -> String {
        self.text.to_string()
    }
}

/// A non-negative integer literal, kept as written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IntNumber {
    pub text: SmolStr,
    pub range: TextRange,
}

impl IntNumber {
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// A real literal, kept as written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FloatNumber {
    pub text: SmolStr,
    pub range: TextRange,
}

impl FloatNumber {
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// The file name in an `include` statement, without the quotes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FilePath {
    pub text: SmolStr,
    pub range: TextRange,
}

impl FilePath {
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// The constant `pi`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pi {
    pub range: TextRange,
}

//
// Program structure
//

/// The root of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub version: Option<Version>,
    pub stmts: Vec<Stmt>,
    pub range: TextRange,
}

impl SourceFile {
    pub fn version(&self) -> Option<&Version> {
        self.version.as_ref()
    }

    pub fn statements(&self) -> impl Iterator<Item = &Stmt> {
        self.stmts.iter()
    }
}

/// `OPENQASM 2.0;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Version {
    /// The version number as written, for example "2.0".
    pub number: SmolStr,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    QRegDecl(RegDecl),
    CRegDecl(RegDecl),
    Include(Include),
    GateDef(GateDef),
    Opaque(Opaque),
    QCall(Call<Argument>),
    UGate(UGate<Argument>),
    CXGate(CXGate<Argument>),
    Barrier(Barrier<Argument>),
    Reset(Reset),
    Measure(Measure),
    If(IfStmt),
}

impl AstNode for Stmt {
    fn text_range(&self) -> TextRange {
        match self {
            Stmt::QRegDecl(it) | Stmt::CRegDecl(it) => it.text_range(),
            Stmt::Include(it) => it.text_range(),
            Stmt::GateDef(it) => it.text_range(),
            Stmt::Opaque(it) => it.text_range(),
            Stmt::QCall(it) => it.text_range(),
            Stmt::UGate(it) => it.text_range(),
            Stmt::CXGate(it) => it.text_range(),
            Stmt::Barrier(it) => it.text_range(),
            Stmt::Reset(it) => it.text_range(),
            Stmt::Measure(it) => it.text_range(),
            Stmt::If(it) => it.text_range(),
        }
    }
}

impl From<QOp> for Stmt {
    fn from(qop: QOp) -> Stmt {
        match qop {
            QOp::QCall(it) => Stmt::QCall(it),
            QOp::UGate(it) => Stmt::UGate(it),
            QOp::CXGate(it) => Stmt::CXGate(it),
            QOp::Measure(it) => Stmt::Measure(it),
            QOp::Reset(it) => Stmt::Reset(it),
        }
    }
}

/// `qreg q[2];` or `creg c[2];`. Which one is recorded by the enclosing [`Stmt`] variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegDecl {
    pub name: Ident,
    pub size: IntNumber,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Include {
    pub file: FilePath,
    pub range: TextRange,
}

/// `gate name(params) qubits { body }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateDef {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub qubits: Vec<Ident>,
    pub body: Vec<GateOp>,
    pub range: TextRange,
}

/// `opaque name(params) qubits;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opaque {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub qubits: Vec<Ident>,
    pub range: TextRange,
}

/// An operation allowed in a gate body. Operands are bare identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOp {
    UGate(UGate<Ident>),
    CXGate(CXGate<Ident>),
    GCall(Call<Ident>),
    Barrier(Barrier<Ident>),
}

impl AstNode for GateOp {
    fn text_range(&self) -> TextRange {
        match self {
            GateOp::UGate(it) => it.text_range(),
            GateOp::CXGate(it) => it.text_range(),
            GateOp::GCall(it) => it.text_range(),
            GateOp::Barrier(it) => it.text_range(),
        }
    }
}

/// A quantum operation. This is what may follow `if (...)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QOp {
    QCall(Call<Argument>),
    UGate(UGate<Argument>),
    CXGate(CXGate<Argument>),
    Measure(Measure),
    Reset(Reset),
}

impl AstNode for QOp {
    fn text_range(&self) -> TextRange {
        match self {
            QOp::QCall(it) => it.text_range(),
            QOp::UGate(it) => it.text_range(),
            QOp::CXGate(it) => it.text_range(),
            QOp::Measure(it) => it.text_range(),
            QOp::Reset(it) => it.text_range(),
        }
    }
}

/// A call of a user-defined gate. `A` is [`Argument`] at top level and [`Ident`] in gate bodies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call<A> {
    pub name: Ident,
    pub params: Vec<Expr>,
    pub args: Vec<A>,
    pub range: TextRange,
}

/// `U(theta, phi, lambda) q;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UGate<A> {
    pub params: Vec<Expr>,
    pub arg: A,
    pub range: TextRange,
}

/// `CX control, target;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CXGate<A> {
    pub control: A,
    pub target: A,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Barrier<A> {
    pub args: Vec<A>,
    pub range: TextRange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reset {
    pub arg: Argument,
    pub range: TextRange,
}

/// `measure qubits -> cbits;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Measure {
    pub qubits: Argument,
    pub cbits: Argument,
    pub range: TextRange,
}

/// `if (register == value) qop`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStmt {
    pub register: Argument,
    pub value: IntNumber,
    pub qop: Box<QOp>,
    pub range: TextRange,
}

/// A register name, optionally indexed: `q` or `q[1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument {
    pub name: Ident,
    pub index: Option<IntNumber>,
    pub range: TextRange,
}

//
// Expressions
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    IntNumber(IntNumber),
    FloatNumber(FloatNumber),
    Pi(Pi),
    /// A bare identifier. In valid programs this names a gate parameter.
    Identifier(Ident),
    Neg(Box<NegExpr>),
    BinExpr(Box<BinExpr>),
    MathFun(Box<MathFun>),
}

impl AstNode for Expr {
    fn text_range(&self) -> TextRange {
        match self {
            Expr::IntNumber(it) => it.text_range(),
            Expr::FloatNumber(it) => it.text_range(),
            Expr::Pi(it) => it.text_range(),
            Expr::Identifier(it) => it.text_range(),
            Expr::Neg(it) => it.text_range(),
            Expr::BinExpr(it) => it.text_range(),
            Expr::MathFun(it) => it.text_range(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegExpr {
    pub expr: Expr,
    pub range: TextRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinExpr {
    pub op: BinaryOp,
    pub lhs: Expr,
    pub rhs: Expr,
    pub range: TextRange,
}

/// `name(arg)`. The name is not checked against the known functions here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathFun {
    pub name: Ident,
    pub arg: Expr,
    pub range: TextRange,
}
