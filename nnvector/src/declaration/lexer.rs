use anyhow::{anyhow, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    /// Numeric literal text, sign included.
    Num(String),
    Punct(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

const PUNCT: &[char] = &['(', ')', '[', ']', '{', '}', ',', ':', '=', '.'];

/// Split declaration text into tokens. `#` starts a comment outside strings.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut line = 1usize;
    let mut pos = 0usize;
    while pos < chars.len() {
        let c = chars[pos];
        match c {
            '\n' => {
                line += 1;
                pos += 1;
            }
            c if c.is_whitespace() => pos += 1,
            '#' => {
                while pos < chars.len() && chars[pos] != '\n' {
                    pos += 1;
                }
            }
            '"' | '\'' => {
                let quote = c;
                let start = pos + 1;
                let mut end = start;
                while end < chars.len() && chars[end] != quote {
                    if chars[end] == '\n' {
                        return Err(anyhow!("line {}: unterminated string", line));
                    }
                    end += 1;
                }
                if end >= chars.len() {
                    return Err(anyhow!("line {}: unterminated string", line));
                }
                tokens.push(Token {
                    kind: TokenKind::Str(chars[start..end].iter().collect()),
                    line,
                });
                pos = end + 1;
            }
            c if starts_number(&chars, pos) => {
                let start = pos;
                if c == '-' || c == '+' {
                    pos += 1;
                }
                if chars[pos..].starts_with(&['i', 'n', 'f']) {
                    pos += 3;
                }
                while pos < chars.len() {
                    let d = chars[pos];
                    let exponent_sign = (d == '-' || d == '+')
                        && matches!(chars.get(pos - 1), Some('e') | Some('E'));
                    if d.is_ascii_digit() || d == '.' || d == 'e' || d == 'E' || exponent_sign {
                        pos += 1;
                    } else {
                        break;
                    }
                }
                if pos < chars.len() && chars[pos] == 'f' {
                    pos += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Num(chars[start..pos].iter().collect()),
                    line,
                });
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                    pos += 1;
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(chars[start..pos].iter().collect()),
                    line,
                });
            }
            c if PUNCT.contains(&c) => {
                tokens.push(Token {
                    kind: TokenKind::Punct(c),
                    line,
                });
                pos += 1;
            }
            other => return Err(anyhow!("line {}: unexpected character '{}'", line, other)),
        }
    }
    Ok(tokens)
}

fn starts_number(chars: &[char], pos: usize) -> bool {
    let digit_at = |idx: usize| chars.get(idx).map_or(false, |c| c.is_ascii_digit());
    match chars[pos] {
        c if c.is_ascii_digit() => true,
        '-' | '+' => {
            digit_at(pos + 1)
                || (chars.get(pos + 1) == Some(&'.') && digit_at(pos + 2))
                || chars[pos + 1..].starts_with(&['i', 'n', 'f'])
        }
        // `.5` is a number, `.To` is member access.
        '.' => digit_at(pos + 1),
        _ => false,
    }
}
