//! Tokenizer for `Debug`-style text.
//!
//! The lexer is total: every input, balanced or not, produces a token stream whose
//! concatenation (modulo whitespace collapsing) is the input.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Open(char),
    Close(char),
    Comma,
    /// Double-quoted literal, quotes included, escapes untouched.
    Str(String),
    /// Single-quoted char literal, quotes included.
    Char(String),
    Space,
    Text(String),
}

pub(crate) fn is_open(c: char) -> bool {
    matches!(c, '[' | '{' | '(')
}

pub(crate) fn is_close(c: char) -> bool {
    matches!(c, ']' | '}' | ')')
}

pub(crate) fn closing_for(open: char) -> char {
    match open {
        '[' => ']',
        '{' => '}',
        _ => ')',
    }
}

fn is_special(c: char) -> bool {
    is_open(c) || is_close(c) || c == ',' || c == '"' || c == '\'' || c.is_whitespace()
}

// Longest char literal Debug produces is '\u{10ffff}'.
const MAX_CHAR_LITERAL: usize = 12;

pub(crate) fn tokenize(input: &str) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if is_open(c) {
            tokens.push(Token::Open(c));
            i += 1;
        } else if is_close(c) {
            tokens.push(Token::Close(c));
            i += 1;
        } else if c == ',' {
            tokens.push(Token::Comma);
            i += 1;
        } else if c.is_whitespace() {
            while i < chars.len() && chars[i].is_whitespace() {
                i += 1;
            }
            tokens.push(Token::Space);
        } else if c == '"' {
            let end = string_end(&chars, i);
            tokens.push(Token::Str(chars[i..end].iter().collect()));
            i = end;
        } else if c == '\'' {
            match char_literal_end(&chars, i) {
                Some(end) => {
                    tokens.push(Token::Char(chars[i..end].iter().collect()));
                    i = end;
                }
                None => {
                    push_text(&mut tokens, "'");
                    i += 1;
                }
            }
        } else {
            let start = i;
            while i < chars.len() && !is_special(chars[i]) {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            push_text(&mut tokens, &text);
        }
    }

    tokens
}

fn push_text(tokens: &mut Vec<Token>, text: &str) {
    if let Some(Token::Text(prev)) = tokens.last_mut() {
        prev.push_str(text);
    } else {
        tokens.push(Token::Text(text.to_string()));
    }
}

/// Index one past the closing quote, or the end of input for an unterminated literal.
fn string_end(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '"' => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

fn char_literal_end(chars: &[char], start: usize) -> Option<usize> {
    let next = *chars.get(start + 1)?;
    if next == '\\' {
        let limit = (start + MAX_CHAR_LITERAL).min(chars.len());
        (start + 3..limit).find(|&j| chars[j] == '\'').map(|j| j + 1)
    } else if next != '\'' && chars.get(start + 2) == Some(&'\'') {
        Some(start + 3)
    } else {
        None
    }
}
