// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

use super::*;

use expect_test::{expect, Expect};
use std::fmt::Write;

fn check_lexing(src: &str, expect: Expect) {
    let actual: String = tokenize(src).fold(String::new(), |mut output, token| {
        let _ = writeln!(output, "{token:?}");
        output
    });
    expect.assert_eq(&actual)
}

#[test]
fn smoke_test() {
    check_lexing(
        "OPENQASM 2.0;\n",
        expect![[r#"
            Token { kind: Ident, len: 8 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Literal { kind: Float { empty_exponent: false } }, len: 3 }
            Token { kind: Semi, len: 1 }
            Token { kind: Whitespace, len: 1 }
        "#]],
    )
}

#[test]
fn measure_arrow() {
    check_lexing(
        "measure q[0] -> c[0];",
        expect![[r#"
            Token { kind: Ident, len: 7 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Ident, len: 1 }
            Token { kind: OpenBracket, len: 1 }
            Token { kind: Literal { kind: Int }, len: 1 }
            Token { kind: CloseBracket, len: 1 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Arrow, len: 2 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Ident, len: 1 }
            Token { kind: OpenBracket, len: 1 }
            Token { kind: Literal { kind: Int }, len: 1 }
            Token { kind: CloseBracket, len: 1 }
            Token { kind: Semi, len: 1 }
        "#]],
    )
}

#[test]
fn comment_flavors() {
    check_lexing(
        "// line\n/* block */ /* open",
        expect![[r#"
            Token { kind: LineComment, len: 7 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: BlockComment { terminated: true }, len: 11 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: BlockComment { terminated: false }, len: 7 }
        "#]],
    )
}

#[test]
fn real_literals() {
    check_lexing(
        "0.1 .5 2. 1e3 1e 3.14E-2",
        expect![[r#"
            Token { kind: Literal { kind: Float { empty_exponent: false } }, len: 3 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Literal { kind: Float { empty_exponent: false } }, len: 2 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Literal { kind: Float { empty_exponent: false } }, len: 2 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Literal { kind: Float { empty_exponent: false } }, len: 3 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Literal { kind: Float { empty_exponent: true } }, len: 2 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Literal { kind: Float { empty_exponent: false } }, len: 7 }
        "#]],
    )
}

#[test]
fn if_condition() {
    check_lexing(
        "if(c==1)",
        expect![[r#"
            Token { kind: Ident, len: 2 }
            Token { kind: OpenParen, len: 1 }
            Token { kind: Ident, len: 1 }
            Token { kind: EqEq, len: 2 }
            Token { kind: Literal { kind: Int }, len: 1 }
            Token { kind: CloseParen, len: 1 }
        "#]],
    )
}

#[test]
fn stray_symbols() {
    check_lexing(
        "= > №",
        expect![[r#"
            Token { kind: Eq, len: 1 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Gt, len: 1 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Unknown, len: 3 }
        "#]],
    )
}

#[test]
fn file_name_strings() {
    check_lexing(
        "\"qelib1.inc\" \"open\n",
        expect![[r#"
            Token { kind: Literal { kind: Str { terminated: true } }, len: 12 }
            Token { kind: Whitespace, len: 1 }
            Token { kind: Literal { kind: Str { terminated: false } }, len: 6 }
        "#]],
    )
}

#[test]
fn token_lengths_cover_input() {
    let src = "OPENQASM 2.0;\ngate g(theta) a { U(theta, 0, pi/2) a; }\n// done";
    let total: u32 = tokenize(src).map(|token| token.len).sum();
    assert_eq!(total as usize, src.len());
}

#[test]
fn identifiers() {
    assert!(is_ident("q0"));
    assert!(is_ident("_anc"));
    assert!(!is_ident("0q"));
    assert!(!is_ident(""));
}
