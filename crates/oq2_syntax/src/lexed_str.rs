// Copyright contributors to the openqasm2-semantics project
// SPDX-License-Identifier: Apache-2.0

//! Lexing `&str` into a sequence of OpenQASM 2 tokens.
//!
//! Note that `str` does *not* refer to a string in the target language.
//!
//! These tokens, unlike the tokens the parser consumes, include comments and whitespace.

use rowan::{TextRange, TextSize};

use crate::{
    SyntaxKind::{self, *},
    T,
};

pub struct LexedStr<'a> {
    text: &'a str,
    kind: Vec<SyntaxKind>,
    start: Vec<u32>,
    error: Vec<LexError>,
}

struct LexError {
    msg: String,
    token: u32,
}

impl<'a> LexedStr<'a> {
    pub fn new(text: &'a str) -> LexedStr<'a> {
        let mut conv = Converter::new(text);

        for token in oq2_lexer::tokenize(text) {
            let token_text = &text[conv.offset..][..token.len as usize];
            conv.extend_token(&token.kind, token_text);
        }

        conv.finalize_with_eof()
    }

    pub fn as_str(&self) -> &str {
        self.text
    }

    /// The number of tokens, not counting the final `EOF`.
    pub fn len(&self) -> usize {
        self.kind.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The kind of token `i`. Index `len()` is the `EOF` token.
    pub fn kind(&self, i: usize) -> SyntaxKind {
        assert!(i <= self.len());
        self.kind[i]
    }

    pub fn text(&self, i: usize) -> &str {
        let range = self.text_range(i);
        &self.text[range]
    }

    pub fn text_range(&self, i: usize) -> TextRange {
        assert!(i <= self.len());
        let lo = self.start[i];
        let hi = if i == self.len() { lo } else { self.start[i + 1] };
        TextRange::new(TextSize::from(lo), TextSize::from(hi))
    }

    pub fn errors(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.error
            .iter()
            .map(|it| (it.token as usize, it.msg.as_str()))
    }

    fn push(&mut self, kind: SyntaxKind, offset: usize) {
        self.kind.push(kind);
        self.start.push(offset as u32);
    }
}

struct Converter<'a> {
    res: LexedStr<'a>,
    offset: usize,
}

impl<'a> Converter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            res: LexedStr {
                text,
                kind: Vec::new(),
                start: Vec::new(),
                error: Vec::new(),
            },
            offset: 0,
        }
    }

    fn finalize_with_eof(mut self) -> LexedStr<'a> {
        self.res.push(EOF, self.offset);
        self.res
    }

    fn push(&mut self, kind: SyntaxKind, len: usize, err: Option<&str>) {
        if let Some(err) = err {
            let token = self.res.kind.len() as u32;
            let msg = err.to_string();
            self.res.error.push(LexError { msg, token });
        }
        self.res.push(kind, self.offset);
        self.offset += len;
    }

    fn extend_token(&mut self, kind: &oq2_lexer::TokenKind, token_text: &str) {
        let mut err = "";
        let syntax_kind = {
            match kind {
                oq2_lexer::TokenKind::LineComment => COMMENT,
                oq2_lexer::TokenKind::BlockComment { terminated } => {
                    if !terminated {
                        err = "Missing trailing `*/` symbols to terminate the block comment";
                    }
                    COMMENT
                }

                oq2_lexer::TokenKind::Whitespace => WHITESPACE,

                oq2_lexer::TokenKind::Ident => {
                    SyntaxKind::from_keyword(token_text).unwrap_or(IDENT)
                }

                oq2_lexer::TokenKind::Literal { kind } => {
                    err = literal_error(kind);
                    match kind {
                        oq2_lexer::LiteralKind::Int => INT_NUMBER,
                        oq2_lexer::LiteralKind::Float { .. } => FLOAT_NUMBER,
                        oq2_lexer::LiteralKind::Str { .. } => STRING,
                    }
                }

                oq2_lexer::TokenKind::Arrow => T![->],
                oq2_lexer::TokenKind::EqEq => T![==],
                oq2_lexer::TokenKind::Semi => T![;],
                oq2_lexer::TokenKind::Comma => T![,],
                oq2_lexer::TokenKind::OpenParen => T!['('],
                oq2_lexer::TokenKind::CloseParen => T![')'],
                oq2_lexer::TokenKind::OpenBrace => T!['{'],
                oq2_lexer::TokenKind::CloseBrace => T!['}'],
                oq2_lexer::TokenKind::OpenBracket => T!['['],
                oq2_lexer::TokenKind::CloseBracket => T![']'],
                oq2_lexer::TokenKind::Eq => T![=],
                oq2_lexer::TokenKind::Gt => T![>],
                oq2_lexer::TokenKind::Minus => T![-],
                oq2_lexer::TokenKind::Plus => T![+],
                oq2_lexer::TokenKind::Star => T![*],
                oq2_lexer::TokenKind::Slash => T![/],
                oq2_lexer::TokenKind::Caret => T![^],

                oq2_lexer::TokenKind::Unknown => {
                    err = "unknown character";
                    ERROR
                }
                oq2_lexer::TokenKind::Eof => EOF,
            }
        };

        let err = if err.is_empty() { None } else { Some(err) };
        self.push(syntax_kind, token_text.len(), err);
    }
}

fn literal_error(kind: &oq2_lexer::LiteralKind) -> &'static str {
    match *kind {
        oq2_lexer::LiteralKind::Float {
            empty_exponent: true,
        } => "Missing digits after the exponent symbol",
        oq2_lexer::LiteralKind::Str { terminated: false } => {
            "Missing trailing `\"` symbol to terminate the string literal"
        }
        _ => "",
    }
}
