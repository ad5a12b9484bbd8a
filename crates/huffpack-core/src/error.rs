//! HuffPack error types

use thiserror::Error;

/// HuffPack error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid magic number: {}", hex::encode(.0))]
    InvalidMagic([u8; 4]),

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("Corrupt container: {0}")]
    CorruptFormat(String),

    #[error("Checksum mismatch: expected {expected:08x}, got {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse failure category reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CorruptFormat,
    UnsupportedVersion,
    IoFailure,
}

impl Error {
    /// Failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidMagic(_) | Error::CorruptFormat(_) | Error::ChecksumMismatch { .. } => {
                ErrorKind::CorruptFormat
            }
            Error::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            Error::Io(_) => ErrorKind::IoFailure,
        }
    }

    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        Error::CorruptFormat(msg.into())
    }
}

/// HuffPack result type
pub type Result<T> = std::result::Result<T, Error>;
