// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

//! Low-level OpenQASM 2 lexer.
//!
//! The design follows `rustc_lexer`: the lexer knows nothing about keywords or
//! spans, it only splits the input into a sequence of [`Token`]s, each carrying
//! a [`TokenKind`] and a length. Keywords are recognized later, when the tokens
//! are converted for the parser.
//!
//! Nothing is dropped. The lengths of the tokens always sum to the length of the input.

mod cursor;

#[cfg(test)]
mod tests;

pub use crate::cursor::Cursor;

use self::LiteralKind::*;
use self::TokenKind::*;

/// Parsed token.
/// It doesn't contain information about data that has been parsed,
/// only the type of the token and its size.
#[derive(Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub len: u32,
}

impl Token {
    fn new(kind: TokenKind, len: u32) -> Token {
        Token { kind, len }
    }
}

/// Enum representing common lexeme types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Multi-char tokens:
    /// "// comment"
    LineComment,

    /// `/* block comment */`
    ///
    /// Block comments do not nest in OpenQASM 2. The first `*/` closes the comment.
    BlockComment { terminated: bool },

    /// Any whitespace character sequence.
    Whitespace,

    /// "qreg", "q", "U"
    ///
    /// At this step, keywords are also considered identifiers.
    Ident,

    /// Examples: `12`, `1.0e-40`, `"qelib1.inc"`.
    ///
    /// See [LiteralKind] for more details.
    Literal { kind: LiteralKind },

    /// "->"
    Arrow,
    /// "=="
    EqEq,

    // One-char tokens:
    /// ";"
    Semi,
    /// ","
    Comma,
    /// "("
    OpenParen,
    /// ")"
    CloseParen,
    /// "{"
    OpenBrace,
    /// "}"
    CloseBrace,
    /// "["
    OpenBracket,
    /// "]"
    CloseBracket,
    /// "="
    Eq,
    /// ">"
    Gt,
    /// "-"
    Minus,
    /// "+"
    Plus,
    /// "*"
    Star,
    /// "/"
    Slash,
    /// "^"
    Caret,

    /// Unknown token, not expected by the lexer, e.g. "№"
    Unknown,

    /// End of input.
    Eof,
}

/// Enum representing the literal types supported by the lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LiteralKind {
    /// "12", "0"
    Int,
    /// "12.34", "1e3", ".5", "2."
    Float { empty_exponent: bool },
    /// ""qelib1.inc"", ""abc"
    Str { terminated: bool },
}

/// Creates an iterator that produces tokens from the input string.
pub fn tokenize(input: &str) -> impl Iterator<Item = Token> + '_ {
    let mut cursor = Cursor::new(input);
    std::iter::from_fn(move || {
        let token = cursor.advance_token();
        if token.kind != TokenKind::Eof {
            Some(token)
        } else {
            None
        }
    })
}

/// True if `c` is considered whitespace.
pub fn is_whitespace(c: char) -> bool {
    // This is Pattern_White_Space.
    //
    // Note that this set is stable (ie, it doesn't change with different
    // Unicode versions), so it's ok to just hard-code the values.

    matches!(
        c,
        // Usual ASCII suspects
        '\u{0009}'   // \t
        | '\u{000A}' // \n
        | '\u{000B}' // vertical tab
        | '\u{000C}' // form feed
        | '\u{000D}' // \r
        | '\u{0020}' // space

        // NEXT LINE from latin1
        | '\u{0085}'

        // Bidi markers
        | '\u{200E}' // LEFT-TO-RIGHT MARK
        | '\u{200F}' // RIGHT-TO-LEFT MARK

        // Dedicated whitespace characters from Unicode
        | '\u{2028}' // LINE SEPARATOR
        | '\u{2029}' // PARAGRAPH SEPARATOR
    )
}

/// True if `c` is valid as a first character of an identifier.
pub fn is_id_start(c: char) -> bool {
    // This is XID_Start OR '_' (which formally is not a XID_Start).
    c == '_' || unicode_xid::UnicodeXID::is_xid_start(c)
}

/// True if `c` is valid as a non-first character of an identifier.
pub fn is_id_continue(c: char) -> bool {
    unicode_xid::UnicodeXID::is_xid_continue(c)
}

/// The passed string is lexically an identifier.
pub fn is_ident(string: &str) -> bool {
    let mut chars = string.chars();
    if let Some(start) = chars.next() {
        is_id_start(start) && chars.all(is_id_continue)
    } else {
        false
    }
}

impl Cursor<'_> {
    /// Parses a token from the input string.
    pub fn advance_token(&mut self) -> Token {
        let first_char = match self.bump() {
            Some(c) => c,
            None => return Token::new(TokenKind::Eof, 0),
        };
        let token_kind = match first_char {
            // Slash, comment or block comment.
            '/' => match self.first() {
                '/' => self.line_comment(),
                '*' => self.block_comment(),
                _ => Slash,
            },

            // Whitespace sequence.
            c if is_whitespace(c) => self.whitespace(),

            // Identifier (this should be checked after other variant that can
            // start as identifier).
            c if is_id_start(c) => self.ident(),

            // Numeric literal.
            '0'..='9' => Literal {
                kind: self.number(),
            },

            // A real literal may omit the integer part: `.5`
            '.' if self.first().is_ascii_digit() => Literal {
                kind: self.fraction(),
            },

            '-' => match self.first() {
                '>' => {
                    self.bump();
                    Arrow
                }
                _ => Minus,
            },

            '=' => match self.first() {
                '=' => {
                    self.bump();
                    EqEq
                }
                _ => Eq,
            },

            // One-symbol tokens.
            ';' => Semi,
            ',' => Comma,
            '(' => OpenParen,
            ')' => CloseParen,
            '{' => OpenBrace,
            '}' => CloseBrace,
            '[' => OpenBracket,
            ']' => CloseBracket,
            '>' => Gt,
            '+' => Plus,
            '*' => Star,
            '^' => Caret,

            // String literal. Only used for file names in `include`.
            '"' => Literal {
                kind: Str {
                    terminated: self.double_quoted_string(),
                },
            },
            _ => Unknown,
        };
        let res = Token::new(token_kind, self.pos_within_token());
        self.reset_pos_within_token();
        res
    }

    fn line_comment(&mut self) -> TokenKind {
        debug_assert!(self.prev() == '/' && self.first() == '/');
        self.bump();

        self.eat_while(|c| c != '\n');
        LineComment
    }

    fn block_comment(&mut self) -> TokenKind {
        debug_assert!(self.prev() == '/' && self.first() == '*');
        self.bump();

        while let Some(c) = self.bump() {
            if c == '*' && self.first() == '/' {
                self.bump();
                return BlockComment { terminated: true };
            }
        }

        BlockComment { terminated: false }
    }

    fn whitespace(&mut self) -> TokenKind {
        debug_assert!(is_whitespace(self.prev()));
        self.eat_while(is_whitespace);
        Whitespace
    }

    fn ident(&mut self) -> TokenKind {
        debug_assert!(is_id_start(self.prev()));
        // Start is already eaten, eat the rest of identifier.
        self.eat_while(is_id_continue);
        Ident
    }

    // OpenQASM 2 has only decimal literals. There are no base prefixes, no
    // underscores and no suffixes.
    fn number(&mut self) -> LiteralKind {
        debug_assert!(self.prev().is_ascii_digit());
        self.eat_decimal_digits();

        match self.first() {
            '.' => {
                self.bump();
                self.fraction()
            }
            'e' | 'E' => {
                self.bump();
                let empty_exponent = !self.eat_float_exponent();
                Float { empty_exponent }
            }
            _ => Int,
        }
    }

    // Lex the part of a real literal after the decimal point. The point is already eaten.
    fn fraction(&mut self) -> LiteralKind {
        debug_assert!(self.prev() == '.');
        self.eat_decimal_digits();
        let mut empty_exponent = false;
        if matches!(self.first(), 'e' | 'E') {
            self.bump();
            empty_exponent = !self.eat_float_exponent();
        }
        Float { empty_exponent }
    }

    /// Eats double-quoted string and returns `true` if the string is terminated.
    /// File names may not span lines, so a newline ends an unterminated string.
    fn double_quoted_string(&mut self) -> bool {
        debug_assert!(self.prev() == '"');
        while let Some(c) = self.bump() {
            match c {
                '"' => return true,
                '\n' => return false,
                _ => (),
            }
        }
        // End of file reached.
        false
    }

    fn eat_decimal_digits(&mut self) -> bool {
        let mut has_digits = false;
        while self.first().is_ascii_digit() {
            has_digits = true;
            self.bump();
        }
        has_digits
    }

    /// Eats the float exponent. Returns true if at least one digit was met,
    /// and returns false otherwise.
    fn eat_float_exponent(&mut self) -> bool {
        debug_assert!(self.prev() == 'e' || self.prev() == 'E');
        if self.first() == '-' || self.first() == '+' {
            self.bump();
        }
        self.eat_decimal_digits()
    }
}
