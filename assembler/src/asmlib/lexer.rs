//! The line tokenizer.
//!
//! Source is strictly line-oriented: an optional `label:`, then a
//! head token (the `LOC`/`DATA` directives or an opcode mnemonic),
//! then comma-separated operands, then an optional `;` comment that
//! runs to the end of the line.  The comment is stripped before
//! lexing but preserved verbatim so the listing can reproduce it.
//!
//! The tokenizer is deliberately shallow: it does not know how many
//! operands an opcode wants or what type they have.  That knowledge
//! belongs to the encoder.
use logos::Logos;

use crate::types::{AssemblyError, AssemblyErrorKind};

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
enum RawToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*[ \t]*:", |lex| {
        lex.slice().trim_end_matches(':').trim_end().to_string()
    })]
    Label(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    #[regex(r"-?[0-9]+", |lex| lex.slice().to_string())]
    Number(String),

    #[token(",")]
    Comma,
}

impl RawToken {
    fn describe(&self) -> String {
        match self {
            RawToken::Label(name) => format!("{name}:"),
            RawToken::Ident(text) | RawToken::Number(text) => text.clone(),
            RawToken::Comma => ",".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Loc,
    Data,
}

impl Directive {
    pub fn name(self) -> &'static str {
        match self {
            Directive::Loc => "LOC",
            Directive::Data => "DATA",
        }
    }
}

/// The head of a line: a directive or an opcode mnemonic (already
/// uppercased).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Directive(Directive),
    Mnemonic(String),
}

/// One parsed source line.  Operand case is preserved (operands may
/// be label references); the head is normalised to uppercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    pub line_no: usize,
    pub raw: String,
    pub label: Option<String>,
    pub head: Option<Head>,
    pub operands: Vec<String>,
    pub comment: Option<String>,
}

impl TokenizedLine {
    /// Canonical source text for the listing's right-hand column.
    pub fn reconstruct(&self) -> String {
        let mut text = String::new();
        if let Some(label) = &self.label {
            text.push_str(label);
            text.push_str(": ");
        }
        match &self.head {
            Some(Head::Directive(directive)) => text.push_str(directive.name()),
            Some(Head::Mnemonic(mnemonic)) => text.push_str(mnemonic),
            None => {
                // Label-only line; drop the trailing space.
                while text.ends_with(' ') {
                    text.pop();
                }
                return text;
            }
        }
        if !self.operands.is_empty() {
            text.push(' ');
            text.push_str(&self.operands.join(","));
        }
        text
    }

    /// The original comment with a separating space, or nothing.
    pub fn trailing_comment(&self) -> String {
        match &self.comment {
            Some(comment) => format!(" {comment}"),
            None => String::new(),
        }
    }
}

/// Tokenize one raw source line.  Returns `None` for blank and
/// comment-only lines.
pub fn tokenize_line(line_no: usize, raw: &str) -> Result<Option<TokenizedLine>, AssemblyError> {
    let (code, comment) = match raw.find(';') {
        Some(index) => (&raw[..index], Some(raw[index..].to_string())),
        None => (raw, None),
    };
    if code.trim().is_empty() {
        return Ok(None);
    }

    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(code);
    while let Some(item) = lexer.next() {
        match item {
            Ok(token) => tokens.push(token),
            Err(()) => {
                return Err(AssemblyError::new(
                    line_no,
                    AssemblyErrorKind::UnexpectedToken(lexer.slice().to_string()),
                ));
            }
        }
    }

    let mut iter = tokens.into_iter().peekable();
    let label = match iter.peek() {
        Some(RawToken::Label(_)) => match iter.next() {
            Some(RawToken::Label(name)) => Some(name),
            _ => unreachable!("peek said the next token is a label"),
        },
        _ => None,
    };

    let head = match iter.next() {
        None => None,
        Some(RawToken::Ident(text)) => {
            let upper = text.to_uppercase();
            Some(match upper.as_str() {
                "LOC" => Head::Directive(Directive::Loc),
                "DATA" => Head::Directive(Directive::Data),
                _ => Head::Mnemonic(upper),
            })
        }
        Some(other) => {
            return Err(AssemblyError::new(
                line_no,
                AssemblyErrorKind::UnexpectedToken(other.describe()),
            ));
        }
    };

    let mut operands = Vec::new();
    let mut expect_operand = true;
    for token in iter {
        if expect_operand {
            match token {
                RawToken::Ident(text) | RawToken::Number(text) => {
                    operands.push(text);
                    expect_operand = false;
                }
                other => {
                    return Err(AssemblyError::new(
                        line_no,
                        AssemblyErrorKind::UnexpectedToken(other.describe()),
                    ));
                }
            }
        } else {
            match token {
                RawToken::Comma => expect_operand = true,
                other => {
                    return Err(AssemblyError::new(
                        line_no,
                        AssemblyErrorKind::UnexpectedToken(other.describe()),
                    ));
                }
            }
        }
    }
    if expect_operand && !operands.is_empty() {
        // The line ended on a comma.
        return Err(AssemblyError::new(
            line_no,
            AssemblyErrorKind::UnexpectedToken(",".to_string()),
        ));
    }

    Ok(Some(TokenizedLine {
        line_no,
        raw: raw.to_string(),
        label,
        head,
        operands,
        comment,
    }))
}
