use thiserror::Error;

/// Stable numeric discriminant of an [`Error`].
///
/// The numeric values never change and can be matched programmatically,
/// e.g. `err.code() as u8 == 7` for a stream that is no longer usable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    InvalidType = 1,
    OpenFailed = 2,
    SeekFailed = 3,
    ReadFailed = 4,
    WriteFailed = 5,
    TellFailed = 6,
    Unusable = 7,
}

impl ErrorCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// The two families of [`Error`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied an invalid argument. Retrying with the same
    /// argument will fail the same way.
    Argument,
    /// The underlying resource failed or the stream is no longer usable.
    Runtime,
}

/// Error returned by [`Stream`](struct.Stream.html) operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The construction argument is neither a byte sequence nor a
    /// resource handle of a compatible mode.
    #[error("invalid stream source: {0}")]
    InvalidType(String),
    /// Opening the underlying resource failed.
    #[error("unable to open stream resource")]
    Open(#[source] std::io::Error),
    /// Error returned by call to `seek()` from `std::io::Seek` trait, or
    /// seeking a stream that is not seekable.
    #[error("unable to seek stream")]
    Seek(#[source] std::io::Error),
    /// Error returned by call to `read()` from `std::io::Read` trait.
    #[error("unable to read from stream")]
    Read(#[source] std::io::Error),
    /// Error returned by call to `write()` from `std::io::Write` trait.
    #[error("unable to write to stream")]
    Write(#[source] std::io::Error),
    /// Error returned while querying the stream position.
    #[error("unable to determine stream position")]
    Tell(#[source] std::io::Error),
    /// The stream was closed or detached.
    #[error("stream is detached or closed")]
    Unusable,
}

impl Error {
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidType(_) => ErrorCode::InvalidType,
            Error::Open(_) => ErrorCode::OpenFailed,
            Error::Seek(_) => ErrorCode::SeekFailed,
            Error::Read(_) => ErrorCode::ReadFailed,
            Error::Write(_) => ErrorCode::WriteFailed,
            Error::Tell(_) => ErrorCode::TellFailed,
            Error::Unusable => ErrorCode::Unusable,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidType(_) => ErrorKind::Argument,
            _ => ErrorKind::Runtime,
        }
    }
}

/// Result type of [`iostream`](index.html) operations.
/// See [`Error`](enum.Error.html).
pub type Result<T> = std::result::Result<T, Error>;
