use std::fmt;
use std::io;

use thiserror::Error;

/// Outcome of the most recent operation on a [`Tokenizer`](crate::Tokenizer) or
/// [`LineReader`](crate::LineReader).
///
/// Exactly one code is current at any time. `EndOfInput`, `ReadError`, `FileOpenError` and
/// `InvalidatedInstance` are terminal: once set, every later operation fails with the same
/// code without touching the byte source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    #[default]
    Ok,
    EndOfInput,
    UnexpectedEndOfLine,
    MissingValue,
    InvalidFormat,
    OverflowOrUnderflow,
    NonFiniteValue,
    UnsupportedConversion,
    InvalidatedInstance,
    FileOpenError,
    ReadError,
}

impl ErrorCode {
    pub const fn description(self) -> &'static str {
        match self {
            ErrorCode::Ok => "No error",
            ErrorCode::EndOfInput => "End of file",
            ErrorCode::UnexpectedEndOfLine => "Unexpected end of line",
            ErrorCode::MissingValue => "Missing value",
            ErrorCode::InvalidFormat => "Invalid value",
            ErrorCode::OverflowOrUnderflow => "Overflow or underflow",
            ErrorCode::NonFiniteValue => "NaN or infinity read",
            ErrorCode::UnsupportedConversion => "Unknown conversion requested",
            ErrorCode::InvalidatedInstance => "Invalidated instance",
            ErrorCode::FileOpenError => "Error opening file",
            ErrorCode::ReadError => "Error reading input",
        }
    }

    /// Terminal codes stop all further line and field operations.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ErrorCode::EndOfInput
                | ErrorCode::ReadError
                | ErrorCode::FileOpenError
                | ErrorCode::InvalidatedInstance
        )
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, ErrorCode::Ok)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl std::error::Error for ErrorCode {}

/// Where an error happened, rendered as
/// `<context>, line <L>, position <P> / column <C>: <description>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the input file; `None` renders as `input`.
    pub source: Option<String>,
    pub line: u64,
    pub position: usize,
    pub column: usize,
    pub code: ErrorCode,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(name) => write!(f, "file {name}")?,
            None => f.write_str("input")?,
        }
        write!(
            f,
            ", line {}, position {} / column {}: {}",
            self.line, self.position, self.column, self.code
        )
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Parse(Diagnostic),

    #[error("invalid field spec `{spec}`: {message}")]
    FieldSpec { spec: String, message: String },
}

impl Error {
    /// The field-level code behind this error, if it came from parsing.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::Parse(diag) => Some(diag.code),
            _ => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
