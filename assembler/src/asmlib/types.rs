//! Assembler error types.
//!
//! Every assembly error is fatal and carries the 1-based source line
//! it was detected on; the driver stops at the first one.  I/O
//! problems at the file level wrap into [`AssemblerFailure`] so that
//! the binary has a single error type to print.
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyErrorKind {
    DuplicateLabel(String),
    /// An operand that is neither an integer nor a known label.
    UndefinedSymbol(String),
    UnknownOpcode(String),
    OperandCountMismatch {
        mnemonic: String,
        expected: usize,
        actual: usize,
    },
    /// Covers register indices, immediates, device ids, shift
    /// counts, trap codes, and the 5-bit address field.
    OperandOutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },
    /// LOC or DATA with a missing or unusable argument.
    MalformedDirective(String),
    /// Text the tokenizer could not make a token of.
    UnexpectedToken(String),
    /// A numeric-only field (register, count, device, ...) given
    /// something that does not parse as an integer.
    ExpectedInteger {
        field: &'static str,
        found: String,
    },
}

impl Display for AssemblyErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            AssemblyErrorKind::DuplicateLabel(name) => {
                write!(f, "duplicate label '{name}'")
            }
            AssemblyErrorKind::UndefinedSymbol(name) => {
                write!(f, "undefined symbol '{name}'")
            }
            AssemblyErrorKind::UnknownOpcode(mnemonic) => {
                write!(f, "unknown opcode '{mnemonic}'")
            }
            AssemblyErrorKind::OperandCountMismatch {
                mnemonic,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{mnemonic} expects {expected} operand(s), found {actual}"
                )
            }
            AssemblyErrorKind::OperandOutOfRange {
                field,
                min,
                max,
                actual,
            } => {
                write!(f, "{field} value {actual} out of range [{min}, {max}]")
            }
            AssemblyErrorKind::MalformedDirective(explanation) => f.write_str(explanation),
            AssemblyErrorKind::UnexpectedToken(text) => {
                write!(f, "unexpected token '{text}'")
            }
            AssemblyErrorKind::ExpectedInteger { field, found } => {
                write!(f, "expected an integer for {field}, found '{found}'")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyError {
    pub line: usize,
    pub kind: AssemblyErrorKind,
}

impl AssemblyError {
    pub fn new(line: usize, kind: AssemblyErrorKind) -> AssemblyError {
        AssemblyError { line, kind }
    }
}

impl Display for AssemblyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl Error for AssemblyError {}

#[derive(Debug)]
pub enum AssemblerFailure {
    Assembly(AssemblyError),
    Io { path: PathBuf, error: io::Error },
}

impl Display for AssemblerFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            AssemblerFailure::Assembly(error) => error.fmt(f),
            AssemblerFailure::Io { path, error } => {
                write!(f, "I/O error on {}: {error}", path.display())
            }
        }
    }
}

impl Error for AssemblerFailure {}

impl From<AssemblyError> for AssemblerFailure {
    fn from(error: AssemblyError) -> AssemblerFailure {
        AssemblerFailure::Assembly(error)
    }
}
