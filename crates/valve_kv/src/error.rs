//! Error types that can be emitted from this library
//!

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// A quoted string reached the end of the input before its closing quote
    #[error("unterminated string on line {line}")]
    #[diagnostic(code(valve_kv::unterminated_string))]
    UnterminatedString {
        line: usize,
        #[source_code]
        src: String,
        #[label("string starts here")]
        span: SourceSpan,
    },

    /// A character that can not start any token
    #[error("unexpected character {found:?} on line {line}")]
    #[diagnostic(code(valve_kv::unexpected_character))]
    UnexpectedCharacter {
        found: char,
        line: usize,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },

    /// A `}` without a matching `{`
    #[error("closing brace without an open block on line {line}")]
    #[diagnostic(code(valve_kv::unbalanced_block))]
    UnbalancedBlock {
        line: usize,
        #[source_code]
        src: String,
        #[label("nothing to close")]
        span: SourceSpan,
    },

    /// The input ended while blocks were still open
    #[error("{open} block(s) still open at the end of the input")]
    #[diagnostic(code(valve_kv::unclosed_block))]
    UnclosedBlock {
        open: usize,
        #[source_code]
        src: String,
        #[label("innermost block opened here")]
        span: SourceSpan,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
