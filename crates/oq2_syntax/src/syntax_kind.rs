// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

//! Defines [`SyntaxKind`] -- a fieldless enum of all tokens
//! of the OpenQASM 2 language.

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u16)]
pub enum SyntaxKind {
    SEMICOLON,
    COMMA,
    L_PAREN,
    R_PAREN,
    L_CURLY,
    R_CURLY,
    L_BRACK,
    R_BRACK,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    CARET,
    EQ,
    EQ2,
    GT,
    THIN_ARROW,
    OPENQASM_KW,
    INCLUDE_KW,
    QREG_KW,
    CREG_KW,
    GATE_KW,
    OPAQUE_KW,
    MEASURE_KW,
    RESET_KW,
    BARRIER_KW,
    IF_KW,
    PI_KW,
    U_KW,
    CX_KW,
    INT_NUMBER,
    FLOAT_NUMBER,
    STRING,
    IDENT,
    WHITESPACE,
    COMMENT,
    ERROR,
    EOF,
}

use self::SyntaxKind::*;

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, WHITESPACE | COMMENT)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            OPENQASM_KW
                | INCLUDE_KW
                | QREG_KW
                | CREG_KW
                | GATE_KW
                | OPAQUE_KW
                | MEASURE_KW
                | RESET_KW
                | BARRIER_KW
                | IF_KW
                | PI_KW
                | U_KW
                | CX_KW
        )
    }

    /// Return the keyword kind spelled by `ident`, if any.
    pub fn from_keyword(ident: &str) -> Option<SyntaxKind> {
        let kw = match ident {
            "OPENQASM" => OPENQASM_KW,
            "include" => INCLUDE_KW,
            "qreg" => QREG_KW,
            "creg" => CREG_KW,
            "gate" => GATE_KW,
            "opaque" => OPAQUE_KW,
            "measure" => MEASURE_KW,
            "reset" => RESET_KW,
            "barrier" => BARRIER_KW,
            "if" => IF_KW,
            "pi" => PI_KW,
            "U" => U_KW,
            "CX" => CX_KW,
            _ => return None,
        };
        Some(kw)
    }

    /// A short description of the token, for use in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            SEMICOLON => "';'",
            COMMA => "','",
            L_PAREN => "'('",
            R_PAREN => "')'",
            L_CURLY => "'{'",
            R_CURLY => "'}'",
            L_BRACK => "'['",
            R_BRACK => "']'",
            PLUS => "'+'",
            MINUS => "'-'",
            STAR => "'*'",
            SLASH => "'/'",
            CARET => "'^'",
            EQ => "'='",
            EQ2 => "'=='",
            GT => "'>'",
            THIN_ARROW => "'->'",
            OPENQASM_KW => "'OPENQASM'",
            INCLUDE_KW => "'include'",
            QREG_KW => "'qreg'",
            CREG_KW => "'creg'",
            GATE_KW => "'gate'",
            OPAQUE_KW => "'opaque'",
            MEASURE_KW => "'measure'",
            RESET_KW => "'reset'",
            BARRIER_KW => "'barrier'",
            IF_KW => "'if'",
            PI_KW => "'pi'",
            U_KW => "'U'",
            CX_KW => "'CX'",
            INT_NUMBER => "an integer",
            FLOAT_NUMBER => "a real number",
            STRING => "a string",
            IDENT => "an identifier",
            WHITESPACE => "whitespace",
            COMMENT => "a comment",
            ERROR => "an invalid token",
            EOF => "end of input",
        }
    }
}

/// Shorthand for the `SyntaxKind` of punctuation and keywords.
#[macro_export]
macro_rules! T {
    [;] => { $crate::SyntaxKind::SEMICOLON };
    [,] => { $crate::SyntaxKind::COMMA };
    ['('] => { $crate::SyntaxKind::L_PAREN };
    [')'] => { $crate::SyntaxKind::R_PAREN };
    ['{'] => { $crate::SyntaxKind::L_CURLY };
    ['}'] => { $crate::SyntaxKind::R_CURLY };
    ['['] => { $crate::SyntaxKind::L_BRACK };
    [']'] => { $crate::SyntaxKind::R_BRACK };
    [+] => { $crate::SyntaxKind::PLUS };
    [-] => { $crate::SyntaxKind::MINUS };
    [*] => { $crate::SyntaxKind::STAR };
    [/] => { $crate::SyntaxKind::SLASH };
    [^] => { $crate::SyntaxKind::CARET };
    [=] => { $crate::SyntaxKind::EQ };
    [==] => { $crate::SyntaxKind::EQ2 };
    [>] => { $crate::SyntaxKind::GT };
    [->] => { $crate::SyntaxKind::THIN_ARROW };
    [OPENQASM] => { $crate::SyntaxKind::OPENQASM_KW };
    [include] => { $crate::SyntaxKind::INCLUDE_KW };
    [qreg] => { $crate::SyntaxKind::QREG_KW };
    [creg] => { $crate::SyntaxKind::CREG_KW };
    [gate] => { $crate::SyntaxKind::GATE_KW };
    [opaque] => { $crate::SyntaxKind::OPAQUE_KW };
    [measure] => { $crate::SyntaxKind::MEASURE_KW };
    [reset] => { $crate::SyntaxKind::RESET_KW };
    [barrier] => { $crate::SyntaxKind::BARRIER_KW };
    [if] => { $crate::SyntaxKind::IF_KW };
    [pi] => { $crate::SyntaxKind::PI_KW };
    [U] => { $crate::SyntaxKind::U_KW };
    [CX] => { $crate::SyntaxKind::CX_KW };
    [ident] => { $crate::SyntaxKind::IDENT };
}
