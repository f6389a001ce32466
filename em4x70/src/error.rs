// em4x70-rs/em4x70/src/error.rs

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no carrier signal above threshold")]
    NoSignal,

    #[error("no listen window found")]
    NoListenWindow,

    #[error("tag response header not found")]
    HeaderNotFound,

    #[error("short read: expected {expected} bits, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("tag did not acknowledge")]
    Nak,

    #[error("invalid block address: {0}")]
    BadBlockAddress(u8),

    #[error("invalid input length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("partial key not found in searched range")]
    KeyNotFound,

    #[error("operation aborted")]
    Aborted,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Host-facing status code for a completed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The operation completed and the reply payload is valid.
    Success,
    /// Tag not present or a protocol failure; the caller may retry.
    SoftFail,
    /// The user or the host interrupted the operation.
    Aborted,
}

impl From<&Error> for Status {
    fn from(err: &Error) -> Self {
        match err {
            Error::Aborted => Status::Aborted,
            _ => Status::SoftFail,
        }
    }
}

impl<T> From<&Result<T>> for Status {
    fn from(result: &Result<T>) -> Self {
        match result {
            Ok(_) => Status::Success,
            Err(e) => Status::from(e),
        }
    }
}
