//! Resource handles a [`Stream`](../struct.Stream.html) can own.
//!
//! A handle is an open, system level I/O object supporting
//! read/write/seek primitives. The [`Handle`] trait adds what a stream
//! needs on top of `std::io`: the access mode the resource was opened
//! with, its size when known, and whether the last read reached the end of
//! the resource.
//!
//! Three implementations are provided:
//! * [`FileHandle`]: an open [`std::fs::File`],
//! * [`MemoryHandle`]: a growable buffer of bytes,
//! * [`TempHandle`]: a buffer of bytes that moves into an anonymous
//! temporary file once it grows past a memory limit.

use std::io::{Read, Seek, Write};

/// Combination of traits to work with a resource of bytes.
///
/// Implementers must keep track of the end-of-stream flag returned by
/// [`eof()`](trait.Handle.html#tymethod.eof): it is raised when a read
/// returns fewer bytes than requested and lowered by a successful seek.
/// It must not be derived from comparing the position with the size.
pub trait Handle: Read + Write + Seek + Send {
    /// The fopen-style access mode the resource was opened with,
    /// e.g. `"r+b"`.
    fn mode(&self) -> &str;

    /// A short name of the kind of resource, e.g. `"MEMORY"`.
    fn kind(&self) -> &'static str;

    /// Size of the resource in bytes, if the resource can tell.
    fn size(&self) -> Option<u64>;

    /// Whether the last read operation reached the end of the resource.
    fn eof(&self) -> bool;

    fn is_seekable(&self) -> bool {
        true
    }

    /// Path or URI of the resource, if any.
    fn uri(&self) -> Option<String> {
        None
    }

    /// Read up to and including the next `\n`.
    ///
    /// If `limit` is set, at most `limit` bytes are read. Bytes are
    /// consumed one at a time so that the position is left right after
    /// the line terminator. On an unbuffered resource such as a
    /// [`FileHandle`] this costs one `read()` system call per byte;
    /// handles that can look ahead without consuming should override it,
    /// as [`MemoryHandle`] does.
    fn read_line(&mut self, limit: Option<usize>) -> std::io::Result<Vec<u8>> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];

        while limit.map_or(true, |l| line.len() < l) {
            match self.read(&mut byte) {
                Ok(0) => break,
                Ok(_) => {
                    line.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(line)
    }
}

impl std::fmt::Debug for dyn Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &self.kind())
            .field("mode", &self.mode())
            .finish()
    }
}

impl Handle for Box<dyn Handle> {
    fn mode(&self) -> &str {
        (**self).mode()
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn size(&self) -> Option<u64> {
        (**self).size()
    }

    fn eof(&self) -> bool {
        (**self).eof()
    }

    fn is_seekable(&self) -> bool {
        (**self).is_seekable()
    }

    fn uri(&self) -> Option<String> {
        (**self).uri()
    }

    fn read_line(&mut self, limit: Option<usize>) -> std::io::Result<Vec<u8>> {
        (**self).read_line(limit)
    }
}

mod mode;
pub use mode::{is_readable_mode, is_writable_mode, Mode};
mod file;
pub use file::FileHandle;
mod memory;
pub use memory::MemoryHandle;
mod temp;
pub use temp::{TempHandle, DEFAULT_MEMORY_LIMIT};
