//! Error types that can be emitted from this library

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file does not start with the vpk signature
    #[error("invalid vpk signature {0:#010x}")]
    InvalidSignature(u32),

    /// only version 2 directories are supported
    #[error("unsupported vpk version {0}")]
    UnsupportedVersion(u32),

    /// the directory tree is malformed
    #[error("invalid vpk directory: {0}")]
    InvalidDirectory(String),

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),

    /// the directory file name does not end in `_dir`
    #[error("{} is not named like a vpk directory (expected *_dir.vpk)", .0.display())]
    InvalidArchiveName(PathBuf),

    /// reading entry data from a numbered archive failed
    #[error("unable to read {length} bytes at {offset} from {}", .path.display())]
    ArchiveRead {
        path: PathBuf,
        offset: u64,
        length: u64,
        #[source]
        source: std::io::Error,
    },

    /// entry data lies outside of the directory file
    #[error("entry data at {offset} with length {length} is out of bounds")]
    DataOutOfBounds { offset: u64, length: u64 },

    /// assembled entry data does not match the recorded checksum
    #[error("checksum mismatch for {name}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        name: String,
        expected: u32,
        actual: u32,
    },
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested file")]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
