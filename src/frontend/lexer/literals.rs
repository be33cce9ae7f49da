//! Literal scanning implementations
//! Handles numeric constants, string literals and inline C blocks

use super::tokenizer::Lexer;
use crate::frontend::error::SyntaxError;
use crate::frontend::lexer::tokens::*;

/// Scan a numeric constant
///
/// `first_char` is a digit or the `-` of a negative constant. The literal is
/// kept verbatim so the generated C sees exactly what the user wrote.
pub fn scan_number(
    lexer: &mut Lexer<'_>,
    first_char: char,
) -> Token {
    let mut value = String::new();
    value.push(first_char);

    scan_digits(lexer, &mut value);

    if lexer.peek() == Some(&'.') {
        value.push('.');
        lexer.advance();
        scan_digits(lexer, &mut value);
    }

    // Exponent only when digits follow; `1e` is `1` then identifier `e`
    if matches!(lexer.peek(), Some('e') | Some('E')) {
        let sign = lexer.peek_nth(1);
        let has_sign = matches!(sign, Some('+') | Some('-'));
        let digit = if has_sign {
            lexer.peek_nth(2)
        } else {
            sign
        };

        if digit.map(is_digit).unwrap_or(false) {
            for _ in 0..if has_sign { 2 } else { 1 } {
                if let Some(c) = lexer.advance() {
                    value.push(c);
                }
            }
            scan_digits(lexer, &mut value);
        }
    }

    lexer.make_token(TokenKind::NumericConstant, value)
}

fn scan_digits(
    lexer: &mut Lexer<'_>,
    value: &mut String,
) {
    while let Some(&c) = lexer.peek() {
        if is_digit(c) {
            value.push(c);
            lexer.advance();
        } else {
            break;
        }
    }
}

/// Scan a string literal; the opening quote is already consumed
///
/// The literal excludes the quotes, the span includes them. A missing
/// closing quote takes the rest of the file.
pub fn scan_string(lexer: &mut Lexer<'_>) -> Token {
    let mut value = String::new();

    while let Some(c) = lexer.advance() {
        if c == '"' {
            break;
        }
        value.push(c);
    }

    lexer.make_token(TokenKind::StringLiteral, value)
}

/// Scan an inline C block; `__c` is already consumed
///
/// Captures the raw text between the outer braces, nested braces included.
pub fn scan_inline_c(lexer: &mut Lexer<'_>) -> Result<Token, SyntaxError> {
    while let Some(&c) = lexer.peek() {
        if c.is_whitespace() {
            lexer.advance();
        } else {
            break;
        }
    }

    if lexer.advance() != Some('{') {
        return Err(lexer.error("expected '{' after '__c'"));
    }

    let mut code = String::new();
    let mut depth = 1usize;

    loop {
        match lexer.advance() {
            None => return Err(lexer.error("unterminated inline C block")),
            Some('{') => {
                depth += 1;
                code.push('{');
            }
            Some('}') => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
                code.push('}');
            }
            Some(c) => code.push(c),
        }
    }

    Ok(lexer.make_token(TokenKind::InlineC, code))
}

/// Check if character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if character can continue an identifier
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check if character is a decimal digit
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}
