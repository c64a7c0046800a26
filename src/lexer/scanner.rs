use super::*;

/// Advance the character iterator and update line/column tracking
pub(super) fn bump(lexer: &mut Lexer) -> Option<char> {
    let curr = lexer.peek;
    if let Some(c) = curr {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        } else {
            lexer.column += 1;
        }
    }
    lexer.peek = lexer.input.next();
    curr
}

/// Look one character past `peek` without consuming anything
pub(super) fn peek_next(lexer: &Lexer) -> Option<char> {
    lexer.input.clone().next()
}

/// Copy a string literal verbatim, escapes included
pub(super) fn copy_string(lexer: &mut Lexer, out: &mut String) {
    if let Some(quote) = bump(lexer) {
        out.push(quote);
    }

    while let Some(ch) = bump(lexer) {
        out.push(ch);
        match ch {
            '\\' => {
                if let Some(escaped) = bump(lexer) {
                    out.push(escaped);
                }
            }
            '"' => break,
            _ => {}
        }
    }
}

pub(super) fn blank_line_comment(lexer: &mut Lexer, out: &mut String) {
    while let Some(c) = lexer.peek {
        if c == '\n' || c == '\r' {
            break;
        }
        bump(lexer);
        out.push(' ');
    }
}

pub(super) fn blank_block_comment(lexer: &mut Lexer, out: &mut String) {
    let (line, column) = (lexer.line, lexer.column);

    // opening "/*"
    bump(lexer);
    bump(lexer);
    out.push_str("  ");

    while let Some(ch) = bump(lexer) {
        if ch == '*' && lexer.peek == Some('/') {
            bump(lexer);
            out.push_str("  ");
            return;
        }
        out.push(if ch == '\n' || ch == '\r' { ch } else { ' ' });
    }

    tracing::trace!(line, column, "block comment runs to end of input");
}
