// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

// The definition of the program model as well as the API for using it.
// Construction of the model from the syntactic AST is in syntax_to_semantics.rs

// All names at top level are resolved. Qubits and bits are represented by identity tokens,
// so two operands refer to the same qubit iff their tokens are equal.
// Gate bodies are the exception. Their operands are `Placeholder`s for the formal arguments.

use std::fmt;

use bigdecimal::BigDecimal;
use hashbrown::HashMap;
use indexmap::IndexMap;
use num_bigint::BigUint;

/// Identity of one qubit. Allocated once, when its register is declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qubit(usize);

/// Identity of one classical bit. Allocated once, when its register is declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cbit(usize);

impl Qubit {
    pub(crate) fn new(id: usize) -> Qubit {
        Qubit(id)
    }
}

impl Cbit {
    pub(crate) fn new(id: usize) -> Cbit {
        Cbit(id)
    }
}

// Consumers may want a dense index, for example to allocate simulator state.
impl From<Qubit> for usize {
    fn from(qubit: Qubit) -> usize {
        qubit.0
    }
}

impl From<Cbit> for usize {
    fn from(cbit: Cbit) -> usize {
        cbit.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantumRegister {
    name: String,
    qubits: Vec<Qubit>,
}

impl QuantumRegister {
    pub fn new<T: ToString>(name: T, qubits: Vec<Qubit>) -> QuantumRegister {
        QuantumRegister {
            name: name.to_string(),
            qubits,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    pub fn get(&self, index: usize) -> Option<Qubit> {
        self.qubits.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.qubits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.qubits.is_empty()
    }

    pub fn to_stmt(self) -> Stmt {
        Stmt::QRegDecl(self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassicalRegister {
    name: String,
    cbits: Vec<Cbit>,
}

impl ClassicalRegister {
    pub fn new<T: ToString>(name: T, cbits: Vec<Cbit>) -> ClassicalRegister {
        ClassicalRegister {
            name: name.to_string(),
            cbits,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cbits(&self) -> &[Cbit] {
        &self.cbits
    }

    pub fn get(&self, index: usize) -> Option<Cbit> {
        self.cbits.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.cbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cbits.is_empty()
    }

    pub fn to_stmt(self) -> Stmt {
        Stmt::CRegDecl(self)
    }
}

/// A symbolic reference to a register, or to one element of it, before resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reference {
    name: String,
    index: Option<BigUint>,
}

impl Reference {
    pub fn new<T: ToString>(name: T, index: Option<BigUint>) -> Reference {
        Reference {
            name: name.to_string(),
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> Option<&BigUint> {
        self.index.as_ref()
    }
}

/// A resolved operand: one qubit or bit, or a whole register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Qubit(Qubit),
    QuantumRegister(QuantumRegister),
    Cbit(Cbit),
    ClassicalRegister(ClassicalRegister),
}

impl Operand {
    pub fn is_quantum(&self) -> bool {
        matches!(self, Operand::Qubit(_) | Operand::QuantumRegister(_))
    }

    pub fn is_classical(&self) -> bool {
        !self.is_quantum()
    }

    /// The number of qubits or bits designated.
    pub fn width(&self) -> usize {
        match self {
            Operand::Qubit(_) | Operand::Cbit(_) => 1,
            Operand::QuantumRegister(reg) => reg.len(),
            Operand::ClassicalRegister(reg) => reg.len(),
        }
    }

    pub fn is_register(&self) -> bool {
        matches!(
            self,
            Operand::QuantumRegister(_) | Operand::ClassicalRegister(_)
        )
    }
}

/// An operand inside a gate body: a formal qubit argument of the enclosing gate.
/// `position` is the index of `name` in the gate's list of formal qubits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placeholder {
    name: String,
    position: usize,
}

impl Placeholder {
    pub fn new<T: ToString>(name: T, position: usize) -> Placeholder {
        Placeholder {
            name: name.to_string(),
            position,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> usize {
        self.position
    }
}

//
// Expressions
//

// Variants have the form XXX(XXX)
// The outer name XXX is the name of the variant
// The inner name XXX is the name of the struct expressing the structure of the expression.
/// A parameter expression. It is never evaluated here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Exp {
    Int(BigUint),
    Real(BigDecimal),
    Pi,
    /// A formal parameter of the enclosing gate.
    Param(String),
    Neg(Box<Exp>),
    Binary(Box<BinaryExp>),
    Pow(Box<PowExp>),
    MathFun(Box<MathFunExp>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryExp {
    op: ArithOp,
    lhs: Exp,
    rhs: Exp,
}

impl BinaryExp {
    pub fn new(op: ArithOp, lhs: Exp, rhs: Exp) -> BinaryExp {
        BinaryExp { op, lhs, rhs }
    }

    pub fn to_exp(self) -> Exp {
        Exp::Binary(Box::new(self))
    }

    pub fn op(&self) -> ArithOp {
        self.op
    }

    pub fn lhs(&self) -> &Exp {
        &self.lhs
    }

    pub fn rhs(&self) -> &Exp {
        &self.rhs
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowExp {
    base: Exp,
    exponent: Exp,
}

impl PowExp {
    pub fn new(base: Exp, exponent: Exp) -> PowExp {
        PowExp { base, exponent }
    }

    pub fn to_exp(self) -> Exp {
        Exp::Pow(Box::new(self))
    }

    pub fn base(&self) -> &Exp {
        &self.base
    }

    pub fn exponent(&self) -> &Exp {
        &self.exponent
    }
}

/// The functions that may be applied in parameter expressions. There are no others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
}

impl MathFunction {
    pub fn from_name(name: &str) -> Option<MathFunction> {
        let function = match name {
            "sin" => MathFunction::Sin,
            "cos" => MathFunction::Cos,
            "tan" => MathFunction::Tan,
            "exp" => MathFunction::Exp,
            "ln" => MathFunction::Ln,
            "sqrt" => MathFunction::Sqrt,
            _ => return None,
        };
        Some(function)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Sin => "sin",
            MathFunction::Cos => "cos",
            MathFunction::Tan => "tan",
            MathFunction::Exp => "exp",
            MathFunction::Ln => "ln",
            MathFunction::Sqrt => "sqrt",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MathFunExp {
    function: MathFunction,
    arg: Exp,
}

impl MathFunExp {
    pub fn new(function: MathFunction, arg: Exp) -> MathFunExp {
        MathFunExp { function, arg }
    }

    pub fn to_exp(self) -> Exp {
        Exp::MathFun(Box::new(self))
    }

    pub fn function(&self) -> MathFunction {
        self.function
    }

    pub fn arg(&self) -> &Exp {
        &self.arg
    }
}

// Negation and binary operations are always parenthesized, so the output reads back
// to the same tree.
impl fmt::Display for Exp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exp::Int(int) => write!(f, "{int}"),
            Exp::Real(real) => write!(f, "{real}"),
            Exp::Pi => write!(f, "pi"),
            Exp::Param(name) => write!(f, "{name}"),
            Exp::Neg(exp) => write!(f, "(-{exp})"),
            Exp::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.lhs,
                binary.op.symbol(),
                binary.rhs
            ),
            Exp::Pow(pow) => write!(f, "({} ^ {})", pow.base, pow.exponent),
            Exp::MathFun(fun) => write!(f, "{}({})", fun.function.name(), fun.arg),
        }
    }
}

//
// Statements
//

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stmt {
    QRegDecl(QuantumRegister),
    CRegDecl(ClassicalRegister),
    Include(Include),
    GateDefinition(GateDefinition),
    OpaqueDefinition(OpaqueDefinition),
    Call(Call),
    Measure(Measure),
    If(IfStatement),
}

/// `include "file";`. The file is not read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Include {
    path: String,
}

impl Include {
    pub fn new<T: ToString>(path: T) -> Include {
        Include {
            path: path.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn to_stmt(self) -> Stmt {
        Stmt::Include(self)
    }
}

/// Application of a built-in operation (`U`, `CX`, `reset`, `barrier`) or of a gate.
/// At top level the operands are resolved `Operand`s. In gate bodies they are `Placeholder`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call<A = Operand> {
    name: String,
    params: Vec<Exp>,
    args: Vec<A>,
}

impl<A> Call<A> {
    pub fn new<T: ToString>(name: T, params: Vec<Exp>, args: Vec<A>) -> Call<A> {
        Call {
            name: name.to_string(),
            params,
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Exp] {
        &self.params
    }

    pub fn args(&self) -> &[A] {
        &self.args
    }
}

impl Call {
    pub fn to_stmt(self) -> Stmt {
        Stmt::Call(self)
    }
}

/// A gate template. The body is never resolved against the registers of the program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GateDefinition {
    name: String,
    params: Vec<String>,
    qubits: Vec<String>,
    body: Vec<Call<Placeholder>>,
}

impl GateDefinition {
    pub fn new<T: ToString>(
        name: T,
        params: Vec<String>,
        qubits: Vec<String>,
        body: Vec<Call<Placeholder>>,
    ) -> GateDefinition {
        GateDefinition {
            name: name.to_string(),
            params,
            qubits,
            body,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn qubits(&self) -> &[String] {
        &self.qubits
    }

    pub fn body(&self) -> &[Call<Placeholder>] {
        &self.body
    }

    pub fn to_stmt(self) -> Stmt {
        Stmt::GateDefinition(self)
    }

    /// Map each formal qubit to the corresponding operand of `call`.
    /// Returns `None` if `call` does not name this gate or has the wrong number of operands.
    pub fn qubit_bindings<'a>(&'a self, call: &'a Call) -> Option<HashMap<&'a str, &'a Operand>> {
        if call.name() != self.name || call.args().len() != self.qubits.len() {
            return None;
        }
        Some(
            self.qubits
                .iter()
                .map(String::as_str)
                .zip(call.args())
                .collect(),
        )
    }

    /// Map each formal parameter to the corresponding parameter expression of `call`.
    /// Returns `None` if `call` does not name this gate or has the wrong number of parameters.
    pub fn param_bindings<'a>(&'a self, call: &'a Call) -> Option<HashMap<&'a str, &'a Exp>> {
        if call.name() != self.name || call.params().len() != self.params.len() {
            return None;
        }
        Some(
            self.params
                .iter()
                .map(String::as_str)
                .zip(call.params())
                .collect(),
        )
    }
}

/// `opaque name(params) qubits;`: a gate with no body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpaqueDefinition {
    name: String,
    params: Vec<String>,
    qubits: Vec<String>,
}

impl OpaqueDefinition {
    pub fn new<T: ToString>(name: T, params: Vec<String>, qubits: Vec<String>) -> OpaqueDefinition {
        OpaqueDefinition {
            name: name.to_string(),
            params,
            qubits,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn qubits(&self) -> &[String] {
        &self.qubits
    }

    pub fn to_stmt(self) -> Stmt {
        Stmt::OpaqueDefinition(self)
    }
}

/// `measure qubits -> cbits;`. The widths of the two sides are not checked here.
/// See `validate::measure_width_mismatches`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Measure {
    qubits: Operand,
    cbits: Operand,
}

impl Measure {
    pub fn new(qubits: Operand, cbits: Operand) -> Measure {
        Measure { qubits, cbits }
    }

    pub fn qubits(&self) -> &Operand {
        &self.qubits
    }

    pub fn cbits(&self) -> &Operand {
        &self.cbits
    }

    pub fn to_stmt(self) -> Stmt {
        Stmt::Measure(self)
    }
}

/// The operation guarded by an `if`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QOp {
    Call(Call),
    Measure(Measure),
}

/// `if (register == equals) qop`. The condition is recorded, not evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfStatement {
    register: Operand,
    equals: BigUint,
    qop: QOp,
}

impl IfStatement {
    pub fn new(register: Operand, equals: BigUint, qop: QOp) -> IfStatement {
        IfStatement {
            register,
            equals,
            qop,
        }
    }

    pub fn register(&self) -> &Operand {
        &self.register
    }

    pub fn equals(&self) -> &BigUint {
        &self.equals
    }

    pub fn qop(&self) -> &QOp {
        &self.qop
    }

    pub fn to_stmt(self) -> Stmt {
        Stmt::If(self)
    }
}

//
// Program
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenQASMVersion {
    major: usize,
    minor: usize,
}

impl OpenQASMVersion {
    pub fn new(major: usize, minor: usize) -> OpenQASMVersion {
        OpenQASMVersion { major, minor }
    }

    pub fn major(&self) -> usize {
        self.major
    }

    pub fn minor(&self) -> usize {
        self.minor
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    version: OpenQASMVersion,
    qregs: IndexMap<String, QuantumRegister>,
    cregs: IndexMap<String, ClassicalRegister>,
    stmts: Vec<Stmt>,
}

impl Program {
    pub fn new(
        version: OpenQASMVersion,
        qregs: IndexMap<String, QuantumRegister>,
        cregs: IndexMap<String, ClassicalRegister>,
        stmts: Vec<Stmt>,
    ) -> Program {
        Program {
            version,
            qregs,
            cregs,
            stmts,
        }
    }

    pub fn version(&self) -> OpenQASMVersion {
        self.version
    }

    /// Quantum registers in declaration order.
    pub fn qregs(&self) -> &IndexMap<String, QuantumRegister> {
        &self.qregs
    }

    /// Classical registers in declaration order.
    pub fn cregs(&self) -> &IndexMap<String, ClassicalRegister> {
        &self.cregs
    }

    pub fn stmts(&self) -> &[Stmt] {
        &self.stmts
    }

    /// The total number of qubits declared.
    pub fn num_qubits(&self) -> usize {
        self.qregs.values().map(QuantumRegister::len).sum()
    }

    /// The total number of classical bits declared.
    pub fn num_cbits(&self) -> usize {
        self.cregs.values().map(ClassicalRegister::len).sum()
    }

    /// Print the program using the pretty print `Debug` trait.
    pub fn print_asg_debug_pretty(&self) {
        for stmt in self.iter() {
            println!("{stmt:#?}");
        }
    }

    /// Print the program using the `Debug` trait.
    pub fn print_asg_debug(&self) {
        for stmt in self.iter() {
            println!("{stmt:?}\n");
        }
    }
}

// Forward methods for Iterator to Program statements.
impl std::ops::Deref for Program {
    type Target = Vec<Stmt>;

    fn deref(&self) -> &Self::Target {
        &self.stmts
    }
}
