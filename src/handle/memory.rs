use crate::error::Result;
use crate::handle::{Handle, Mode};
use std::io::{Error, ErrorKind, Read, Seek, SeekFrom, Write};

/// An implementation of a [`Handle`](trait.Handle.html) in a `Vec<u8>`.
///
/// Reads and writes are refused with
/// [`PermissionDenied`](std::io::ErrorKind::PermissionDenied) when the
/// handle mode does not allow them. Seeking outside of the buffer is an
/// error.
#[derive(Debug, Clone)]
pub struct MemoryHandle {
    vec: Vec<u8>,
    pos: usize,
    mode: Mode,
    eof: bool,
}

impl MemoryHandle {
    /// An empty buffer open for reading and writing.
    pub fn new() -> Self {
        MemoryHandle {
            vec: Vec::new(),
            pos: 0usize,
            mode: Mode::read_write(),
            eof: false,
        }
    }

    /// A buffer holding `bytes` positioned at its start.
    ///
    /// Like a file opened in a `w` mode, the buffer starts empty when
    /// `mode` truncates: `bytes` are dropped.
    pub fn from_bytes<B: Into<Vec<u8>>>(bytes: B, mode: &str) -> Result<Self> {
        let mode = Mode::parse(mode)?;
        let mut vec = bytes.into();
        if mode.truncates() {
            vec.clear();
        }
        Ok(MemoryHandle {
            vec,
            pos: 0usize,
            mode,
            eof: false,
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        self.vec.as_slice()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.vec
    }
}

impl Default for MemoryHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for MemoryHandle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if !self.mode.can_read() {
            return Err(Error::new(
                ErrorKind::PermissionDenied,
                format!("memory handle opened in mode {}", self.mode),
            ));
        }
        let buf_len = buf.len();
        let len = std::cmp::min(self.vec.len() - self.pos, buf_len);

        buf[..len].copy_from_slice(&self.vec[self.pos..self.pos + len]);
        self.pos += len;
        if len < buf_len {
            self.eof = true;
        }
        Ok(len)
    }
}

impl Write for MemoryHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if !self.mode.can_write() {
            return Err(Error::new(
                ErrorKind::PermissionDenied,
                format!("memory handle opened in mode {}", self.mode),
            ));
        }
        if self.mode.is_append() {
            self.pos = self.vec.len();
        }

        let len = buf.len();
        let end = self.pos + len;
        if self.vec.len() < end {
            self.vec.resize(end, 0u8);
        }
        self.vec[self.pos..end].copy_from_slice(buf);
        self.pos = end;
        Ok(len)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Seek for MemoryHandle {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        let max = self.vec.len() as i64;
        let pos = match pos {
            SeekFrom::Start(pos) => i64::try_from(pos).unwrap_or(i64::MAX),
            SeekFrom::End(pos) => max.saturating_add(pos),
            SeekFrom::Current(pos) => (self.pos as i64).saturating_add(pos),
        };
        if pos < 0 || pos > max {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("position {} outside of buffer of size {}", pos, max),
            ));
        }

        self.pos = pos as usize;
        self.eof = false;
        Ok(pos as u64)
    }
}

impl Handle for MemoryHandle {
    fn mode(&self) -> &str {
        self.mode.as_str()
    }

    fn kind(&self) -> &'static str {
        "MEMORY"
    }

    fn size(&self) -> Option<u64> {
        Some(self.vec.len() as u64)
    }

    fn eof(&self) -> bool {
        self.eof
    }

    fn read_line(&mut self, limit: Option<usize>) -> std::io::Result<Vec<u8>> {
        if !self.mode.can_read() {
            return Err(Error::new(
                ErrorKind::PermissionDenied,
                format!("memory handle opened in mode {}", self.mode),
            ));
        }
        let rest = &self.vec[self.pos..];
        let max = limit.map_or(rest.len(), |l| std::cmp::min(l, rest.len()));
        let len = match rest[..max].iter().position(|&b| b == b'\n') {
            Some(i) => i + 1,
            None => max,
        };

        let line = rest[..len].to_vec();
        self.pos += len;
        if len < limit.unwrap_or(usize::MAX) && line.last() != Some(&b'\n') {
            self.eof = true;
        }
        Ok(line)
    }
}
