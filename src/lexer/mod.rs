// Author: Dustin Pilgrim
// License: MIT

//! Comment stripping for fixture sources.
//!
//! Fixture files are JSON with `//` line comments and `/* */` block comments.
//! Comments are replaced by spaces (newlines are kept) so that parse errors
//! reported against the stripped text still point at the right line and
//! column of the original file.

use std::str::Chars;

mod scanner;

pub struct Lexer<'a> {
    input: Chars<'a>,
    peek: Option<char>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            input: input.chars(),
            peek: None,
            line: 1,
            column: 0,
        };
        lexer.peek = lexer.input.next();
        lexer
    }

    /// Consume the whole input, returning it with every comment blanked out.
    pub fn strip(mut self) -> String {
        let mut out = String::new();

        while let Some(c) = self.peek {
            match c {
                '"' => scanner::copy_string(&mut self, &mut out),
                '/' => match scanner::peek_next(&self) {
                    Some('/') => scanner::blank_line_comment(&mut self, &mut out),
                    Some('*') => scanner::blank_block_comment(&mut self, &mut out),
                    _ => {
                        scanner::bump(&mut self);
                        out.push(c);
                    }
                },
                _ => {
                    scanner::bump(&mut self);
                    out.push(c);
                }
            }
        }

        out
    }
}

/// Strip `//` and `/* */` comments from JSON text.
pub fn strip_comments(input: &str) -> String {
    Lexer::new(input).strip()
}
