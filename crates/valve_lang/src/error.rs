//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// The language file is not valid KeyValues text
    #[error(transparent)]
    #[diagnostic(transparent)]
    KeyValues(#[from] valve_kv::error::Error),

    /// The language file has no token table
    #[error("language file has no `{0}` block")]
    #[diagnostic(
        code(valve_lang::missing_tokens),
        help("language files look like \"lang\" {{ \"Tokens\" {{ ... }} }}")
    )]
    MissingTokens(&'static str),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
