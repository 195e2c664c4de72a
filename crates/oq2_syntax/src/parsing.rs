// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser from tokens to the tree in [`crate::ast`].
//!
//! Each statement is parsed independently. On an error, the error is recorded and
//! tokens are skipped up to the end of the statement, so that a single pass
//! reports errors in all statements.
//!
//! Parameter expressions are parsed by operator precedence. The binding powers
//! are those of `binary_power` and `PREFIX_POWER` below.

use limit::Limit;

use crate::ast::{self, AstNode, BinaryOp};
use crate::{
    LexedStr, SyntaxError,
    SyntaxKind::{self, *},
    TextRange, TextSize, T,
};

/// Deeper nesting of parameter expressions is a syntax error.
static EXPR_DEPTH_LIMIT: Limit = Limit::new(256);

/// Binding power of unary `-` and `+`.
const PREFIX_POWER: u8 = 5;

/// The left and right binding powers of an infix operator.
/// Left-associative operators bind more strongly on their right.
fn binary_power(op: BinaryOp) -> (u8, u8) {
    match op {
        BinaryOp::Add | BinaryOp::Sub => (1, 2),
        BinaryOp::Mul | BinaryOp::Div => (3, 4),
        BinaryOp::Pow => (8, 7),
    }
}

type PResult<T> = Result<T, SyntaxError>;

pub(crate) fn parse_text(text: &str) -> (ast::SourceFile, Vec<SyntaxError>) {
    let lexed = LexedStr::new(text);
    let mut parser = Parser::new(&lexed);
    let file = source_file(&mut parser);

    let mut errors: Vec<SyntaxError> = lexed
        .errors()
        .map(|(i, msg)| SyntaxError::new(msg, lexed.text_range(i)))
        .collect();
    errors.extend(parser.errors);
    errors.sort_by_key(|err| err.range().start());
    (file, errors)
}

struct Token<'t> {
    kind: SyntaxKind,
    text: &'t str,
    range: TextRange,
}

struct Parser<'t> {
    lexed: &'t LexedStr<'t>,
    /// Indices into `lexed` of the tokens that are not trivia. The last is `EOF`.
    tokens: Vec<usize>,
    pos: usize,
    /// End of the most recently consumed token.
    prev_end: TextSize,
    depth: usize,
    errors: Vec<SyntaxError>,
}

impl<'t> Parser<'t> {
    fn new(lexed: &'t LexedStr<'t>) -> Parser<'t> {
        let tokens = (0..=lexed.len())
            .filter(|&i| !lexed.kind(i).is_trivia())
            .collect();
        Parser {
            lexed,
            tokens,
            pos: 0,
            prev_end: TextSize::from(0),
            depth: 0,
            errors: Vec::new(),
        }
    }

    fn token_index(&self) -> usize {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current(&self) -> SyntaxKind {
        self.lexed.kind(self.token_index())
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn current_range(&self) -> TextRange {
        self.lexed.text_range(self.token_index())
    }

    /// Start of the current token. Used to mark the start of a node.
    fn start(&self) -> TextSize {
        self.current_range().start()
    }

    /// Range from `start` to the end of the last consumed token.
    fn range_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.prev_end.max(start))
    }

    fn bump(&mut self) -> Token<'t> {
        let i = self.token_index();
        let kind = self.lexed.kind(i);
        if kind != EOF {
            self.pos += 1;
        }
        let range = self.lexed.text_range(i);
        self.prev_end = range.end();
        Token {
            kind,
            text: self.lexed.text(i),
            range,
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> Option<Token<'t>> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> PResult<Token<'t>> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.error_here(&format!("expected {}", kind.describe()))),
        }
    }

    /// An error at the current token, mentioning what was found there.
    fn error_here(&self, message: &str) -> SyntaxError {
        SyntaxError::new(
            format!("{message}, found {}", self.current().describe()),
            self.current_range(),
        )
    }

    fn push_error(&mut self, error: SyntaxError) {
        self.errors.push(error);
    }

    /// Skip to the end of the current top-level statement. A braced block is
    /// skipped as a whole.
    fn recover(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                EOF => break,
                T![;] if depth == 0 => {
                    self.bump();
                    break;
                }
                T!['{'] => {
                    depth += 1;
                    self.bump();
                }
                T!['}'] => {
                    self.bump();
                    if depth <= 1 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Skip to the end of the current statement in a gate body, stopping before
    /// the closing brace.
    fn recover_in_block(&mut self) {
        loop {
            match self.current() {
                EOF | T!['}'] => break,
                T![;] => {
                    self.bump();
                    break;
                }
                _ => {
                    self.bump();
                }
            }
        }
    }
}

fn source_file(p: &mut Parser<'_>) -> ast::SourceFile {
    let version = if p.at(T![OPENQASM]) {
        match version(p) {
            Ok(version) => Some(version),
            Err(err) => {
                p.push_error(err);
                p.recover();
                None
            }
        }
    } else {
        None
    };
    let mut stmts = Vec::new();
    while !p.at(EOF) {
        match statement(p) {
            Ok(stmt) => stmts.push(stmt),
            Err(err) => {
                p.push_error(err);
                p.recover();
            }
        }
    }
    ast::SourceFile {
        version,
        stmts,
        range: TextRange::up_to(TextSize::of(p.lexed.as_str())),
    }
}

fn version(p: &mut Parser<'_>) -> PResult<ast::Version> {
    let start = p.start();
    p.bump();
    let number = match p.current() {
        INT_NUMBER | FLOAT_NUMBER => p.bump(),
        _ => return Err(p.error_here("expected a version number")),
    };
    p.expect(T![;])?;
    Ok(ast::Version {
        number: number.text.into(),
        range: p.range_from(start),
    })
}

fn statement(p: &mut Parser<'_>) -> PResult<ast::Stmt> {
    let stmt = match p.current() {
        T![qreg] => ast::Stmt::QRegDecl(reg_decl(p)?),
        T![creg] => ast::Stmt::CRegDecl(reg_decl(p)?),
        T![include] => ast::Stmt::Include(include(p)?),
        T![gate] => ast::Stmt::GateDef(gate_def(p)?),
        T![opaque] => ast::Stmt::Opaque(opaque(p)?),
        T![barrier] => ast::Stmt::Barrier(barrier(p, argument)?),
        T![if] => ast::Stmt::If(if_stmt(p)?),
        T![U] | T![CX] | T![measure] | T![reset] | IDENT => qop(p)?.into(),
        T![OPENQASM] => {
            return Err(SyntaxError::new(
                "the version declaration must be the first statement",
                p.current_range(),
            ))
        }
        _ => return Err(p.error_here("expected a statement")),
    };
    Ok(stmt)
}

fn reg_decl(p: &mut Parser<'_>) -> PResult<ast::RegDecl> {
    let start = p.start();
    p.bump();
    let name = ident(p)?;
    p.expect(T!['['])?;
    let size = int_number(p)?;
    p.expect(T![']'])?;
    p.expect(T![;])?;
    Ok(ast::RegDecl {
        name,
        size,
        range: p.range_from(start),
    })
}

fn include(p: &mut Parser<'_>) -> PResult<ast::Include> {
    let start = p.start();
    p.bump();
    let token = p.expect(STRING)?;
    let text = token.text.strip_prefix('"').unwrap_or(token.text);
    let text = text.strip_suffix('"').unwrap_or(text);
    let file = ast::FilePath {
        text: text.into(),
        range: token.range,
    };
    p.expect(T![;])?;
    Ok(ast::Include {
        file,
        range: p.range_from(start),
    })
}

fn gate_def(p: &mut Parser<'_>) -> PResult<ast::GateDef> {
    let start = p.start();
    p.bump();
    let name = ident(p)?;
    let params = formal_params(p)?;
    let qubits = list(p, ident)?;
    p.expect(T!['{'])?;
    let mut body = Vec::new();
    while !p.at(T!['}']) && !p.at(EOF) {
        match gate_op(p) {
            Ok(op) => body.push(op),
            Err(err) => {
                p.push_error(err);
                p.recover_in_block();
            }
        }
    }
    p.expect(T!['}'])?;
    Ok(ast::GateDef {
        name,
        params,
        qubits,
        body,
        range: p.range_from(start),
    })
}

fn opaque(p: &mut Parser<'_>) -> PResult<ast::Opaque> {
    let start = p.start();
    p.bump();
    let name = ident(p)?;
    let params = formal_params(p)?;
    let qubits = list(p, ident)?;
    p.expect(T![;])?;
    Ok(ast::Opaque {
        name,
        params,
        qubits,
        range: p.range_from(start),
    })
}

/// `(a, b)`, `()` or nothing at all.
fn formal_params(p: &mut Parser<'_>) -> PResult<Vec<ast::Ident>> {
    if p.eat(T!['(']).is_none() {
        return Ok(Vec::new());
    }
    if p.eat(T![')']).is_some() {
        return Ok(Vec::new());
    }
    let params = list(p, ident)?;
    p.expect(T![')'])?;
    Ok(params)
}

fn gate_op(p: &mut Parser<'_>) -> PResult<ast::GateOp> {
    let op = match p.current() {
        T![U] => ast::GateOp::UGate(ugate(p, ident)?),
        T![CX] => ast::GateOp::CXGate(cxgate(p, ident)?),
        T![barrier] => ast::GateOp::Barrier(barrier(p, ident)?),
        IDENT => ast::GateOp::GCall(call(p, ident)?),
        _ => return Err(p.error_here("expected a gate operation")),
    };
    Ok(op)
}

fn qop(p: &mut Parser<'_>) -> PResult<ast::QOp> {
    let op = match p.current() {
        T![U] => ast::QOp::UGate(ugate(p, argument)?),
        T![CX] => ast::QOp::CXGate(cxgate(p, argument)?),
        T![measure] => ast::QOp::Measure(measure(p)?),
        T![reset] => ast::QOp::Reset(reset(p)?),
        IDENT => ast::QOp::QCall(call(p, argument)?),
        _ => return Err(p.error_here("expected a quantum operation")),
    };
    Ok(op)
}

fn ugate<A>(
    p: &mut Parser<'_>,
    operand: impl Fn(&mut Parser<'_>) -> PResult<A>,
) -> PResult<ast::UGate<A>> {
    let start = p.start();
    p.bump();
    let params_start = p.start();
    p.expect(T!['('])?;
    let params = expr_list(p)?;
    p.expect(T![')'])?;
    if params.len() != 3 {
        return Err(SyntaxError::new(
            format!("U takes 3 parameters, found {}", params.len()),
            p.range_from(params_start),
        ));
    }
    let arg = operand(p)?;
    p.expect(T![;])?;
    Ok(ast::UGate {
        params,
        arg,
        range: p.range_from(start),
    })
}

fn cxgate<A>(
    p: &mut Parser<'_>,
    operand: impl Fn(&mut Parser<'_>) -> PResult<A>,
) -> PResult<ast::CXGate<A>> {
    let start = p.start();
    p.bump();
    let control = operand(p)?;
    p.expect(T![,])?;
    let target = operand(p)?;
    p.expect(T![;])?;
    Ok(ast::CXGate {
        control,
        target,
        range: p.range_from(start),
    })
}

fn barrier<A>(
    p: &mut Parser<'_>,
    operand: impl Fn(&mut Parser<'_>) -> PResult<A>,
) -> PResult<ast::Barrier<A>> {
    let start = p.start();
    p.bump();
    let args = list(p, operand)?;
    p.expect(T![;])?;
    Ok(ast::Barrier {
        args,
        range: p.range_from(start),
    })
}

fn call<A>(
    p: &mut Parser<'_>,
    operand: impl Fn(&mut Parser<'_>) -> PResult<A>,
) -> PResult<ast::Call<A>> {
    let start = p.start();
    let name = ident(p)?;
    let params = if p.eat(T!['(']).is_some() {
        let params = expr_list(p)?;
        p.expect(T![')'])?;
        params
    } else {
        Vec::new()
    };
    let args = list(p, operand)?;
    p.expect(T![;])?;
    Ok(ast::Call {
        name,
        params,
        args,
        range: p.range_from(start),
    })
}

fn measure(p: &mut Parser<'_>) -> PResult<ast::Measure> {
    let start = p.start();
    p.bump();
    let qubits = argument(p)?;
    p.expect(T![->])?;
    let cbits = argument(p)?;
    p.expect(T![;])?;
    Ok(ast::Measure {
        qubits,
        cbits,
        range: p.range_from(start),
    })
}

fn reset(p: &mut Parser<'_>) -> PResult<ast::Reset> {
    let start = p.start();
    p.bump();
    let arg = argument(p)?;
    p.expect(T![;])?;
    Ok(ast::Reset {
        arg,
        range: p.range_from(start),
    })
}

fn if_stmt(p: &mut Parser<'_>) -> PResult<ast::IfStmt> {
    let start = p.start();
    p.bump();
    p.expect(T!['('])?;
    let register = argument(p)?;
    p.expect(T![==])?;
    let value = int_number(p)?;
    p.expect(T![')'])?;
    let qop = qop(p)?;
    Ok(ast::IfStmt {
        register,
        value,
        qop: Box::new(qop),
        range: p.range_from(start),
    })
}

/// One or more comma-separated items.
fn list<A>(
    p: &mut Parser<'_>,
    item: impl Fn(&mut Parser<'_>) -> PResult<A>,
) -> PResult<Vec<A>> {
    let mut items = vec![item(p)?];
    while p.eat(T![,]).is_some() {
        items.push(item(p)?);
    }
    Ok(items)
}

fn argument(p: &mut Parser<'_>) -> PResult<ast::Argument> {
    let start = p.start();
    let name = ident(p)?;
    let index = if p.eat(T!['[']).is_some() {
        let index = int_number(p)?;
        p.expect(T![']'])?;
        Some(index)
    } else {
        None
    };
    Ok(ast::Argument {
        name,
        index,
        range: p.range_from(start),
    })
}

fn ident(p: &mut Parser<'_>) -> PResult<ast::Ident> {
    let token = p.expect(IDENT)?;
    Ok(ast::Ident {
        text: token.text.into(),
        range: token.range,
    })
}

fn int_number(p: &mut Parser<'_>) -> PResult<ast::IntNumber> {
    let token = p.expect(INT_NUMBER)?;
    Ok(ast::IntNumber {
        text: token.text.into(),
        range: token.range,
    })
}

/// Zero or more comma-separated expressions, ending before `)`.
fn expr_list(p: &mut Parser<'_>) -> PResult<Vec<ast::Expr>> {
    if p.at(T![')']) {
        return Ok(Vec::new());
    }
    list(p, expr)
}

fn expr(p: &mut Parser<'_>) -> PResult<ast::Expr> {
    expr_bp(p, 0)
}

fn expr_bp(p: &mut Parser<'_>, power_min: u8) -> PResult<ast::Expr> {
    p.depth += 1;
    let result = if EXPR_DEPTH_LIMIT.check(p.depth).is_err() {
        Err(SyntaxError::new(
            "expression is nested too deeply",
            p.current_range(),
        ))
    } else {
        expr_bp_inner(p, power_min)
    };
    p.depth -= 1;
    result
}

// Parse a prefix or atom, then as many infix operators as bind at least as
// strongly as `power_min`.
fn expr_bp_inner(p: &mut Parser<'_>, power_min: u8) -> PResult<ast::Expr> {
    let start = p.start();
    let mut lhs = match p.current() {
        INT_NUMBER => ast::Expr::IntNumber(int_number(p)?),
        FLOAT_NUMBER => {
            let token = p.bump();
            ast::Expr::FloatNumber(ast::FloatNumber {
                text: token.text.into(),
                range: token.range,
            })
        }
        T![pi] => {
            let token = p.bump();
            ast::Expr::Pi(ast::Pi { range: token.range })
        }
        IDENT => {
            let name = ident(p)?;
            if p.eat(T!['(']).is_some() {
                let arg = expr(p)?;
                p.expect(T![')'])?;
                ast::Expr::MathFun(Box::new(ast::MathFun {
                    name,
                    arg,
                    range: p.range_from(start),
                }))
            } else {
                ast::Expr::Identifier(name)
            }
        }
        T!['('] => {
            p.bump();
            let inner = expr(p)?;
            p.expect(T![')'])?;
            inner
        }
        T![-] | T![+] => {
            let op = p.bump();
            let operand = expr_bp(p, PREFIX_POWER)?;
            if op.kind == T![-] {
                ast::Expr::Neg(Box::new(ast::NegExpr {
                    expr: operand,
                    range: p.range_from(start),
                }))
            } else {
                operand
            }
        }
        _ => {
            let message = if power_min == 0 {
                "expected an expression"
            } else {
                "expected an operand"
            };
            return Err(p.error_here(message));
        }
    };
    loop {
        let op = match p.current() {
            T![+] => BinaryOp::Add,
            T![-] => BinaryOp::Sub,
            T![*] => BinaryOp::Mul,
            T![/] => BinaryOp::Div,
            T![^] => BinaryOp::Pow,
            _ => break,
        };
        let (power_l, power_r) = binary_power(op);
        if power_l < power_min {
            break;
        }
        p.bump();
        let rhs = expr_bp(p, power_r)?;
        let range = lhs.text_range().cover(rhs.text_range());
        lhs = ast::Expr::BinExpr(Box::new(ast::BinExpr {
            op,
            lhs,
            rhs,
            range,
        }));
    }
    Ok(lhs)
}
