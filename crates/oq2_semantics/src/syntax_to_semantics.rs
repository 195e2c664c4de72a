// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

// Build the program model defined in asg.rs from the syntactic AST
// constructed in the crate oq2_syntax.
//
// In the filename syntax_to_semantics.rs, "syntax" is a noun and "semantics" is a noun.

use std::io;
use std::path::Path;

use bigdecimal::BigDecimal;
use hashbrown::HashSet;
use num_bigint::BigUint;

use crate::asg;
use crate::asg::{ArithOp, MathFunction};
use crate::context::{BuildOptions, Context};
use crate::semantic_error::SemanticErrorKind::*;
use crate::semantic_error::{BuildError, SemanticError};
use crate::symbols::Scope;
use crate::{TextRange, TextSize};
use oq2_source_file::{inner_print_compiler_errors, SourceFile, SourceString, SourceTrait};
use oq2_syntax::ast as synast; // Syntactic AST
use oq2_syntax::AstNode;

type BuildResult<T> = Result<T, SemanticError>;

/// The outcome of parsing and analyzing one source unit.
/// Semantic analysis is skipped if there are syntax errors.
pub struct ParseResult<T: SourceTrait> {
    syntax_result: T, // syntax tree and errors
    build: Option<BuildResult<asg::Program>>,
}

impl<T: SourceTrait> ParseResult<T> {
    pub fn any_syntax_errors(&self) -> bool {
        self.syntax_result.any_parse_errors()
    }

    pub fn any_semantic_errors(&self) -> bool {
        self.semantic_error().is_some()
    }

    pub fn any_errors(&self) -> bool {
        self.any_syntax_errors() || self.any_semantic_errors()
    }

    /// The program, if both parsing and analysis succeeded.
    pub fn program(&self) -> Option<&asg::Program> {
        self.build.as_ref().and_then(|build| build.as_ref().ok())
    }

    pub fn semantic_error(&self) -> Option<&SemanticError> {
        self.build.as_ref().and_then(|build| build.as_ref().err())
    }

    pub fn syntax_result(&self) -> &T {
        &self.syntax_result
    }

    pub fn into_result(self) -> Result<asg::Program, BuildError> {
        let ParseResult {
            syntax_result,
            build,
        } = self;
        match build {
            Some(build) => Ok(build?),
            None => Err(BuildError::SyntaxError(
                syntax_result.syntax_ast().errors().to_vec(),
            )),
        }
    }

    /// Print any errors recorded during lexing, parsing, and analysis.
    pub fn print_errors(&self) -> io::Result<()> {
        let synres = self.syntax_result();
        synres.print_syntax_errors()?;
        if let Some(error) = self.semantic_error() {
            inner_print_compiler_errors(
                std::slice::from_ref(error),
                synres.file_path(),
                synres.source(),
            )?;
        }
        Ok(())
    }
}

/// Parse string containing source to the program model.
/// Fake file name is used for printing diagnostics.
pub fn parse_source_string<T: AsRef<str>>(
    source: T,
    fake_file_path: Option<&str>,
    options: &BuildOptions,
) -> ParseResult<SourceString> {
    let parsed_source = oq2_source_file::parse_source_string(source, fake_file_path);
    analyze_source(parsed_source, options)
}

/// Parse source file to the program model.
pub fn parse_source_file<P: AsRef<Path>>(
    file_path: P,
    options: &BuildOptions,
) -> io::Result<ParseResult<SourceFile>> {
    let parsed_source = oq2_source_file::parse_source_file(file_path)?;
    Ok(analyze_source(parsed_source, options))
}

fn analyze_source<T: SourceTrait>(parsed_source: T, options: &BuildOptions) -> ParseResult<T> {
    // on syntax errors, do not continue with semantic analysis.
    let build = if parsed_source.any_parse_errors() {
        None
    } else {
        Some(syntax_to_semantic(parsed_source.syntax_ast().tree(), options))
    };
    ParseResult {
        syntax_result: parsed_source,
        build,
    }
}

/// Build a `Program` from a syntax tree. The tree must be free of syntax errors.
/// Statements are processed in source order. The first error ends the build.
pub fn syntax_to_semantic(
    source_file: &synast::SourceFile,
    options: &BuildOptions,
) -> Result<asg::Program, SemanticError> {
    let version = from_version(source_file)?;
    let mut context = Context::new(options);
    let stmts = source_file
        .statements()
        .map(|stmt| from_stmt(stmt, &mut context))
        .collect::<BuildResult<Vec<_>>>()?;
    let (qregs, cregs) = context.into_symbol_table().into_registers();
    Ok(asg::Program::new(version, qregs, cregs, stmts))
}

fn from_version(source_file: &synast::SourceFile) -> BuildResult<asg::OpenQASMVersion> {
    let Some(version) = source_file.version() else {
        let range = source_file
            .statements()
            .next()
            .map_or_else(|| TextRange::empty(TextSize::from(0)), |stmt| stmt.text_range());
        return Err(SemanticError::with_range(MissingVersionError, range));
    };
    let number = version.number.as_str();
    let unsupported = || SemanticError::new(UnsupportedVersionError(number.to_string()), version);
    let (major, minor) = number.split_once('.').unwrap_or((number, "0"));
    let major: usize = major.parse().map_err(|_| unsupported())?;
    let minor: usize = minor.parse().map_err(|_| unsupported())?;
    if major != 2 {
        return Err(unsupported());
    }
    Ok(asg::OpenQASMVersion::new(major, minor))
}

fn from_stmt(stmt: &synast::Stmt, context: &mut Context) -> BuildResult<asg::Stmt> {
    let stmt = match stmt {
        synast::Stmt::QRegDecl(decl) => {
            let size = register_size(&decl.size)?;
            context.declare_qreg(decl.name.text(), size, decl)?.to_stmt()
        }

        synast::Stmt::CRegDecl(decl) => {
            let size = register_size(&decl.size)?;
            context.declare_creg(decl.name.text(), size, decl)?.to_stmt()
        }

        // The file is not read.
        synast::Stmt::Include(include) => asg::Include::new(include.file.text()).to_stmt(),

        synast::Stmt::GateDef(gate_def) => from_gate_def(gate_def)?.to_stmt(),

        synast::Stmt::Opaque(opaque) => {
            let (params, qubits) = formal_names(&opaque.params, &opaque.qubits)?;
            asg::OpaqueDefinition::new(opaque.name.text(), params, qubits).to_stmt()
        }

        synast::Stmt::Barrier(barrier) => from_barrier(barrier, quantum(context))?.to_stmt(),

        synast::Stmt::If(if_stmt) => from_if_stmt(if_stmt, context)?.to_stmt(),

        synast::Stmt::QCall(call) => from_call(call, &Scope::Global, quantum(context))?.to_stmt(),

        synast::Stmt::UGate(ugate) => from_ugate(ugate, &Scope::Global, quantum(context))?.to_stmt(),

        synast::Stmt::CXGate(cxgate) => from_cxgate(cxgate, quantum(context))?.to_stmt(),

        synast::Stmt::Reset(reset) => from_reset(reset, context)?.to_stmt(),

        synast::Stmt::Measure(measure) => from_measure(measure, context)?.to_stmt(),
    };
    Ok(stmt)
}

/// The operation guarded by an `if`.
fn from_qop(qop: &synast::QOp, context: &Context) -> BuildResult<asg::QOp> {
    let qop = match qop {
        synast::QOp::QCall(call) => {
            asg::QOp::Call(from_call(call, &Scope::Global, quantum(context))?)
        }
        synast::QOp::UGate(ugate) => {
            asg::QOp::Call(from_ugate(ugate, &Scope::Global, quantum(context))?)
        }
        synast::QOp::CXGate(cxgate) => asg::QOp::Call(from_cxgate(cxgate, quantum(context))?),
        synast::QOp::Reset(reset) => asg::QOp::Call(from_reset(reset, context)?),
        synast::QOp::Measure(measure) => asg::QOp::Measure(from_measure(measure, context)?),
    };
    Ok(qop)
}

fn from_reset(reset: &synast::Reset, context: &Context) -> BuildResult<asg::Call> {
    let arg = quantum_operand(&reset.arg, context)?;
    Ok(asg::Call::new("reset", Vec::new(), vec![arg]))
}

fn from_measure(measure: &synast::Measure, context: &Context) -> BuildResult<asg::Measure> {
    let qubits = quantum_operand(&measure.qubits, context)?;
    let cbits = classical_operand(&measure.cbits, context)?;
    Ok(asg::Measure::new(qubits, cbits))
}

fn from_if_stmt(if_stmt: &synast::IfStmt, context: &Context) -> BuildResult<asg::IfStatement> {
    let register = classical_operand(&if_stmt.register, context)?;
    let equals = from_int(&if_stmt.value)?;
    let qop = from_qop(&if_stmt.qop, context)?;
    Ok(asg::IfStatement::new(register, equals, qop))
}

//
// Calls. These are shared by top level and gate bodies. `operand` builds one argument.
//

fn from_call<A, B>(
    call: &synast::Call<A>,
    scope: &Scope,
    operand: impl Fn(&A) -> BuildResult<B>,
) -> BuildResult<asg::Call<B>> {
    let params = from_exprs(&call.params, scope)?;
    let args = call.args.iter().map(operand).collect::<BuildResult<Vec<_>>>()?;
    Ok(asg::Call::new(call.name.text(), params, args))
}

fn from_ugate<A, B>(
    ugate: &synast::UGate<A>,
    scope: &Scope,
    operand: impl Fn(&A) -> BuildResult<B>,
) -> BuildResult<asg::Call<B>> {
    let params = from_exprs(&ugate.params, scope)?;
    let arg = operand(&ugate.arg)?;
    Ok(asg::Call::new("U", params, vec![arg]))
}

fn from_cxgate<A, B>(
    cxgate: &synast::CXGate<A>,
    operand: impl Fn(&A) -> BuildResult<B>,
) -> BuildResult<asg::Call<B>> {
    let control = operand(&cxgate.control)?;
    let target = operand(&cxgate.target)?;
    Ok(asg::Call::new("CX", Vec::new(), vec![control, target]))
}

fn from_barrier<A, B>(
    barrier: &synast::Barrier<A>,
    operand: impl Fn(&A) -> BuildResult<B>,
) -> BuildResult<asg::Call<B>> {
    let args = barrier.args.iter().map(operand).collect::<BuildResult<Vec<_>>>()?;
    Ok(asg::Call::new("barrier", Vec::new(), args))
}

//
// Gate definitions
//

fn from_gate_def(gate_def: &synast::GateDef) -> BuildResult<asg::GateDefinition> {
    let (params, qubits) = formal_names(&gate_def.params, &gate_def.qubits)?;
    let scope = Scope::GateBody {
        params: &params,
        qubits: &qubits,
    };
    let body = gate_def
        .body
        .iter()
        .map(|gate_op| from_gate_op(gate_op, &scope))
        .collect::<BuildResult<Vec<_>>>()?;
    Ok(asg::GateDefinition::new(
        gate_def.name.text(),
        params,
        qubits,
        body,
    ))
}

/// Formal parameter and qubit names of a gate signature. No name may appear twice, in either list.
fn formal_names(
    params: &[synast::Ident],
    qubits: &[synast::Ident],
) -> BuildResult<(Vec<String>, Vec<String>)> {
    let mut seen = HashSet::new();
    for ident in params.iter().chain(qubits) {
        if !seen.insert(ident.text()) {
            return Err(SemanticError::new(
                DuplicateDeclarationError(ident.string()),
                ident,
            ));
        }
    }
    let names = |idents: &[synast::Ident]| -> Vec<String> {
        idents.iter().map(synast::Ident::string).collect()
    };
    Ok((names(params), names(qubits)))
}

fn from_gate_op(gate_op: &synast::GateOp, scope: &Scope) -> BuildResult<asg::Call<asg::Placeholder>> {
    let formal = |ident: &synast::Ident| placeholder(ident, scope);
    match gate_op {
        synast::GateOp::UGate(ugate) => from_ugate(ugate, scope, formal),
        synast::GateOp::CXGate(cxgate) => from_cxgate(cxgate, formal),
        synast::GateOp::GCall(call) => from_call(call, scope, formal),
        synast::GateOp::Barrier(barrier) => from_barrier(barrier, formal),
    }
}

// Gate body operands are never looked up in the symbol table.
fn placeholder(ident: &synast::Ident, scope: &Scope) -> BuildResult<asg::Placeholder> {
    scope
        .qubit_position(ident.text())
        .map(|position| asg::Placeholder::new(ident.text(), position))
        .ok_or_else(|| SemanticError::new(UndefinedGateArgumentError(ident.string()), ident))
}

//
// Operands
//

fn from_argument(arg: &synast::Argument) -> BuildResult<asg::Reference> {
    let index = arg.index.as_ref().map(from_int).transpose()?;
    Ok(asg::Reference::new(arg.name.text(), index))
}

/// Operand builder for top-level quantum arguments.
fn quantum(context: &Context) -> impl Fn(&synast::Argument) -> BuildResult<asg::Operand> + '_ {
    move |arg: &synast::Argument| quantum_operand(arg, context)
}

fn quantum_operand(arg: &synast::Argument, context: &Context) -> BuildResult<asg::Operand> {
    let reference = from_argument(arg)?;
    context.resolve_quantum(&reference, arg)
}

fn classical_operand(arg: &synast::Argument, context: &Context) -> BuildResult<asg::Operand> {
    let reference = from_argument(arg)?;
    context.resolve_classical(&reference, arg)
}

//
// Literals and expressions
//

fn from_int(int: &synast::IntNumber) -> BuildResult<BigUint> {
    int.text()
        .parse::<BigUint>()
        .map_err(|_| SemanticError::new(InvalidLiteralError(int.text().to_string()), int))
}

fn from_real(real: &synast::FloatNumber) -> BuildResult<BigDecimal> {
    real.text()
        .parse::<BigDecimal>()
        .map_err(|_| SemanticError::new(InvalidLiteralError(real.text().to_string()), real))
}

fn register_size(size: &synast::IntNumber) -> BuildResult<usize> {
    let big = from_int(size)?;
    usize::try_from(&big)
        .map_err(|_| SemanticError::new(RegisterSizeError(size.text().to_string()), size))
}

fn from_exprs(exprs: &[synast::Expr], scope: &Scope) -> BuildResult<Vec<asg::Exp>> {
    exprs.iter().map(|expr| from_expr(expr, scope)).collect()
}

// Operands are built before the node that holds them.
// Precedence and associativity were settled by the parser.
fn from_expr(expr: &synast::Expr, scope: &Scope) -> BuildResult<asg::Exp> {
    let exp = match expr {
        synast::Expr::IntNumber(int) => asg::Exp::Int(from_int(int)?),

        synast::Expr::FloatNumber(real) => asg::Exp::Real(from_real(real)?),

        synast::Expr::Pi(_) => asg::Exp::Pi,

        synast::Expr::Identifier(ident) => {
            if !scope.has_param(ident.text()) {
                return Err(SemanticError::new(
                    UndefinedParameterError(ident.string()),
                    ident,
                ));
            }
            asg::Exp::Param(ident.string())
        }

        synast::Expr::Neg(neg) => asg::Exp::Neg(Box::new(from_expr(&neg.expr, scope)?)),

        synast::Expr::BinExpr(bin_expr) => {
            let lhs = from_expr(&bin_expr.lhs, scope)?;
            let rhs = from_expr(&bin_expr.rhs, scope)?;
            let op = match bin_expr.op {
                synast::BinaryOp::Add => ArithOp::Add,
                synast::BinaryOp::Sub => ArithOp::Sub,
                synast::BinaryOp::Mul => ArithOp::Mul,
                synast::BinaryOp::Div => ArithOp::Div,
                synast::BinaryOp::Pow => return Ok(asg::PowExp::new(lhs, rhs).to_exp()),
            };
            asg::BinaryExp::new(op, lhs, rhs).to_exp()
        }

        synast::Expr::MathFun(math_fun) => {
            let arg = from_expr(&math_fun.arg, scope)?;
            let Some(function) = MathFunction::from_name(math_fun.name.text()) else {
                return Err(SemanticError::new(
                    UnknownMathFunctionError(math_fun.name.string()),
                    &math_fun.name,
                ));
            };
            asg::MathFunExp::new(function, arg).to_exp()
        }
    };
    Ok(exp)
}
