//! `std::io` traits on [`Stream`].
//!
//! The inherent `read()`, `write()` and `seek()` methods of [`Stream`]
//! shadow the trait methods of the same name. Call the trait methods
//! explicitly, e.g. `Read::read(&mut stream, &mut buf)`, or through the
//! provided methods such as `read_to_end()` and `write_all()`.

use crate::error::Error;
use crate::stream::Stream;
use std::io::{Read, Seek, SeekFrom, Write};

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Open(e)
            | Error::Seek(e)
            | Error::Read(e)
            | Error::Write(e)
            | Error::Tell(e) => e,
            Error::InvalidType(_) => {
                std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
            }
            Error::Unusable => std::io::Error::new(std::io::ErrorKind::Other, e),
        }
    }
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.handle_mut()?.read(buf)
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.handle_mut()?.write(buf)?;
        self.invalidate_size();
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.handle_mut()?.flush()
    }
}

impl Seek for Stream {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.handle()?;
        if !self.is_seekable()? {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "stream is not seekable",
            ));
        }
        self.handle_mut()?.seek(pos)
    }
}
