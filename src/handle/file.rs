use crate::error::{Error, Result};
use crate::handle::{Handle, Mode};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A [`Handle`](trait.Handle.html) implementation based on a file.
///
/// The file is closed when the handle goes out of scope. Files created
/// with [`temporary()`](struct.FileHandle.html#method.temporary) have no
/// path and are removed by the OS once closed.
///
/// Only regular files are seekable. Pipes, FIFOs, sockets and character
/// devices are not.
#[derive(Debug)]
pub struct FileHandle {
    file: File,
    mode: Mode,
    path: Option<PathBuf>,
    seekable: bool,
    eof: bool,
}

impl FileHandle {
    fn new(file: File, mode: Mode, path: Option<PathBuf>) -> Self {
        let seekable = file
            .metadata()
            .map(|m| m.file_type().is_file())
            .unwrap_or(false);
        FileHandle {
            file,
            mode,
            path,
            seekable,
            eof: false,
        }
    }

    /// Open the file pointed by `path` with an fopen-style `mode`.
    ///
    /// An invalid mode string yields an
    /// [`InvalidType`](../enum.ErrorCode.html) error and a failure to open
    /// the file an [`OpenFailed`](../enum.ErrorCode.html) error.
    pub fn open<P: AsRef<Path>>(path: P, mode: &str) -> Result<Self> {
        let mode = Mode::parse(mode)?;
        let path = path.as_ref().to_path_buf();
        let file = mode.open_options().open(&path).map_err(Error::Open)?;
        debug!(path = %path.display(), mode = %mode, "opened file handle");
        Ok(FileHandle::new(file, mode, Some(path)))
    }

    /// Create a private, anonymous temporary file open for reading and
    /// writing.
    pub fn temporary() -> Result<Self> {
        let file = tempfile::tempfile().map_err(Error::Open)?;
        debug!("opened temporary file handle");
        Ok(FileHandle::anonymous(file))
    }

    /// Adopt a file without path open for reading and writing.
    pub(crate) fn anonymous(file: File) -> Self {
        FileHandle::new(file, Mode::read_write(), None)
    }

    /// Adopt an already open `file`. `mode` must describe how `file` was
    /// opened.
    pub fn from_file(file: File, mode: &str) -> Result<Self> {
        Ok(FileHandle::new(file, Mode::parse(mode)?, None))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn into_file(self) -> File {
        self.file
    }
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.file.read(buf)?;
        if n < buf.len() {
            self.eof = true;
        }
        Ok(n)
    }
}

impl Write for FileHandle {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl Seek for FileHandle {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        let pos = self.file.seek(pos)?;
        self.eof = false;
        Ok(pos)
    }
}

impl Handle for FileHandle {
    fn mode(&self) -> &str {
        self.mode.as_str()
    }

    fn kind(&self) -> &'static str {
        "STDIO"
    }

    fn size(&self) -> Option<u64> {
        self.file.metadata().ok().map(|m| m.len())
    }

    fn eof(&self) -> bool {
        self.eof
    }

    fn is_seekable(&self) -> bool {
        self.seekable
    }

    fn uri(&self) -> Option<String> {
        self.path.as_ref().map(|p| p.display().to_string())
    }
}
