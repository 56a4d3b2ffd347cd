use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("source exhausted")]
    Exhausted,
    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
    #[error("Cannot write more than 64 bits (requested {0})")]
    InvalidWidth(usize),
    #[error("Pending bit count must be below 8 (got {0})")]
    InvalidBitOffset(u8),
}

impl Error {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Error::Exhausted)
    }

    // io::Error is not Clone; keep its kind and message.
    pub(crate) fn duplicate(&self) -> Error {
        match self {
            Error::Exhausted => Error::Exhausted,
            Error::Io(err) => Error::Io(io::Error::new(err.kind(), err.to_string())),
            Error::InvalidWidth(width) => Error::InvalidWidth(*width),
            Error::InvalidBitOffset(offset) => Error::InvalidBitOffset(*offset),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::Exhausted,
            _ => Error::Io(err),
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Exhausted => io::Error::new(io::ErrorKind::UnexpectedEof, "source exhausted"),
            Error::Io(err) => err,
            other => io::Error::new(io::ErrorKind::InvalidInput, other.to_string()),
        }
    }
}

/// An interpretation of a short read: the value decoded from the bits that
/// were obtained, together with the error that cut the read short.
#[derive(Error, Debug)]
#[error("partial read ({value:?}): {error}")]
pub struct PartialRead<T: fmt::Debug> {
    value: T,
    #[source]
    error: Error,
}

impl<T: fmt::Debug> PartialRead<T> {
    pub(crate) fn new(value: T, error: Error) -> Self {
        PartialRead { value, error }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    pub fn into_error(self) -> Error {
        self.error
    }

    pub fn into_parts(self) -> (T, Error) {
        (self.value, self.error)
    }
}

impl<T: fmt::Debug> From<PartialRead<T>> for Error {
    fn from(partial: PartialRead<T>) -> Self {
        partial.error
    }
}

/// Failure of a multi-argument write. Arguments before `index` were written
/// in full and stay in the writer.
#[derive(Error, Debug)]
#[error("write argument {index} rejected after {bits_written} bits: {source}")]
pub struct WriteError {
    pub index: usize,
    pub bits_written: usize,
    #[source]
    pub source: Error,
}
