//! A stream of bytes over exactly one I/O resource.
//!
//! [`Stream`] wraps either an open resource [`Handle`](handle/trait.Handle.html)
//! (a file, an in-memory buffer, ...) or a new temporary resource seeded
//! with bytes, and exposes uniform read/write/seek/metadata operations on
//! top of it. It is meant to be passed around by libraries that need "a
//! stream" without committing their callers to a concrete resource type.
//!
//! A stream tracks its own lifecycle: it is usable until it is
//! [closed](struct.Stream.html#method.close) or
//! [detached](struct.Stream.html#method.detach), and unusable forever
//! after. Every failure is reported as an [`Error`] carrying a stable
//! numeric [`ErrorCode`].
//!
//! ```
//! use iostream::{ErrorCode, Source, Stream};
//!
//! let mut stream = Stream::new(Source::from("hello")).unwrap();
//! stream.write(b" world").unwrap();
//! assert_eq!(stream.size().unwrap(), Some(11));
//! assert_eq!(stream.to_bytes(), b"hello world");
//!
//! let handle = stream.detach().unwrap();
//! assert!(handle.is_some());
//! assert_eq!(stream.tell().unwrap_err().code(), ErrorCode::Unusable);
//! ```

mod error;
pub use error::{Error, ErrorCode, ErrorKind, Result};

pub mod handle;
pub use handle::Handle;

mod metadata;
pub use metadata::{MetaValue, Metadata};

mod stream;
pub use stream::{Options, Source, Stream, Whence, DEFAULT_READ_SIZE};

#[cfg(feature = "config")]
pub mod config;
