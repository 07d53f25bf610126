//! Error types for the script parser.

use std::fmt;

/// Errors that can occur while reading or parsing a script file.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The file could not be read.
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error message.
        message: String,
    },
    /// Unexpected end of file while inside a block.
    UnexpectedEof {
        /// Position in the token stream where EOF was encountered.
        position: usize,
    },
    /// Encountered an unexpected token.
    UnexpectedToken {
        /// Position in the token stream.
        position: usize,
        /// The token that was found.
        token: String,
        /// What was expected instead.
        expected: String,
    },
    /// Missing right-hand side after `=` in an assignment.
    MissingRhs {
        /// Position of the `=` token.
        position: usize,
    },
    /// Parsing stopped before the end of the token stream.
    UnconsumedTokens {
        /// Position where unconsumed tokens start.
        position: usize,
        /// Number of tokens remaining.
        remaining: usize,
    },
    /// Input was empty (no tokens to parse).
    EmptyInput,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io { path, message } => {
                write!(f, "Cannot read {}: {}", path, message)
            }
            ParseError::UnexpectedEof { position } => {
                write!(f, "Unexpected end of file at token {}", position)
            }
            ParseError::UnexpectedToken {
                position,
                token,
                expected,
            } => {
                write!(
                    f,
                    "Unexpected token '{}' at token {}, expected {}",
                    token, position, expected
                )
            }
            ParseError::MissingRhs { position } => {
                write!(f, "Missing right-hand side after '=' at token {}", position)
            }
            ParseError::UnconsumedTokens {
                position,
                remaining,
            } => {
                write!(
                    f,
                    "Parsing incomplete: {} unconsumed tokens starting at token {}",
                    remaining, position
                )
            }
            ParseError::EmptyInput => {
                write!(f, "Cannot parse empty input")
            }
        }
    }
}

impl std::error::Error for ParseError {}
